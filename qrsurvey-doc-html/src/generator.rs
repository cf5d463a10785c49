//! Form and share-page generation.

use qrsurvey::qr::{QrError, QrMatrix, QrStyle};
use qrsurvey::{Question, QuestionKind, Survey};

/// How a page is wrapped and styled.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// `<title>` of the page. Forms fall back to the survey title.
    pub title: Option<String>,
    /// Embed the built-in stylesheet.
    pub include_styles: bool,
    /// Emit `<!DOCTYPE html>` and the html/head/body shell; otherwise only
    /// the body content.
    pub full_document: bool,
    /// Prefix of every CSS class, e.g. `survey` gives `survey-form`.
    pub class_prefix: String,
}

impl HtmlOptions {
    /// A full, styled document with the `survey` class prefix.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "survey".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Line-oriented markup writer with two-space indentation.
struct Markup {
    out: String,
    depth: usize,
}

impl Markup {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write an opening tag line and indent what follows.
    fn open(&mut self, tag: &str) {
        self.line(tag);
        self.depth += 1;
    }

    /// Dedent and write a closing tag line.
    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(tag);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Generate a fillable form for a decoded survey.
///
/// The form has no action: submitting it never leaves the page.
pub fn respondent_form_html(survey: &Survey, options: &HtmlOptions) -> String {
    let prefix = options.class_prefix.as_str();
    let title = options.title.as_deref().unwrap_or(survey.title());
    let mut doc = Markup::new();

    begin_page(&mut doc, title, options);
    doc.open(&format!("<form class=\"{prefix}-form\">"));
    doc.line(&format!(
        "<h1 class=\"{prefix}-title\">{}</h1>",
        escape_html(survey.title())
    ));
    doc.open(&format!("<div class=\"{prefix}-questions\">"));
    for (index, question) in survey.questions().iter().enumerate() {
        write_question(&mut doc, question, index + 1, prefix);
    }
    doc.close("</div>");
    doc.line(&format!(
        "<button type=\"submit\" class=\"{prefix}-submit\">Submit</button>"
    ));
    doc.close("</form>");
    end_page(&mut doc, options);

    doc.finish()
}

/// Generate a page showing the QR code for `content` as inline SVG, with
/// the encoded text printed underneath.
pub fn share_page_html(
    content: &str,
    style: &QrStyle,
    options: &HtmlOptions,
) -> Result<String, QrError> {
    let svg = QrMatrix::encode(content)?.to_svg(style);
    let prefix = options.class_prefix.as_str();
    let title = options.title.as_deref().unwrap_or("QR code");
    let mut doc = Markup::new();

    begin_page(&mut doc, title, options);
    doc.open(&format!("<figure class=\"{prefix}-share\">"));
    doc.line(&format!("<div class=\"{prefix}-qr\">{svg}</div>"));
    doc.line(&format!(
        "<figcaption class=\"{prefix}-content\"><code>{}</code></figcaption>",
        escape_html(content)
    ));
    doc.close("</figure>");
    end_page(&mut doc, options);

    Ok(doc.finish())
}

fn begin_page(doc: &mut Markup, title: &str, options: &HtmlOptions) {
    if !options.full_document {
        return;
    }
    doc.line("<!DOCTYPE html>");
    doc.line("<html lang=\"en\">");
    doc.open("<head>");
    doc.line("<meta charset=\"UTF-8\">");
    doc.line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    doc.line(&format!("<title>{}</title>", escape_html(title)));
    if options.include_styles {
        write_styles(doc, &options.class_prefix);
    }
    doc.close("</head>");
    doc.line("<body>");
}

fn end_page(doc: &mut Markup, options: &HtmlOptions) {
    if options.full_document {
        doc.line("</body>");
        doc.line("</html>");
    }
}

fn write_question(doc: &mut Markup, question: &Question, position: usize, prefix: &str) {
    let field = format!("q{}", question.id());
    let label = escape_html(&format!("{position}. {}", question.text()));

    match question.kind() {
        QuestionKind::FreeText => {
            doc.open(&format!("<div class=\"{prefix}-field\">"));
            doc.line(&format!("<label for=\"{field}\">{label}</label>"));
            doc.line(&format!(
                "<input type=\"text\" id=\"{field}\" name=\"{field}\" \
                 class=\"{prefix}-input\" required>"
            ));
            doc.close("</div>");
        }
        QuestionKind::MultipleChoice(mcq) => {
            doc.open(&format!(
                "<fieldset class=\"{prefix}-fieldset {prefix}-choice\">"
            ));
            doc.line(&format!("<legend>{label}</legend>"));
            for (index, option) in mcq.options().iter().enumerate() {
                let option_id = format!("{field}-{index}");
                let option = escape_html(option);
                doc.open(&format!("<div class=\"{prefix}-option\">"));
                doc.line(&format!(
                    "<input type=\"radio\" id=\"{option_id}\" name=\"{field}\" \
                     value=\"{option}\" required>"
                ));
                doc.line(&format!("<label for=\"{option_id}\">{option}</label>"));
                doc.close("</div>");
            }
            doc.close("</fieldset>");
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_styles(doc: &mut Markup, prefix: &str) {
    let rules = [
        format!(".{prefix}-form, .{prefix}-share {{ max-width: 36rem; margin: 2rem auto; }}"),
        format!(".{prefix}-form, .{prefix}-share {{ padding: 1rem; font-family: sans-serif; }}"),
        format!(".{prefix}-field, .{prefix}-fieldset {{ margin: 1rem 0; }}"),
        format!(".{prefix}-field label {{ display: block; margin-bottom: 0.25rem; }}"),
        format!(".{prefix}-input {{ width: 100%; padding: 0.5rem; }}"),
        format!(".{prefix}-option {{ margin: 0.25rem 0; }}"),
        format!(".{prefix}-submit {{ margin-top: 1rem; padding: 0.5rem 1.25rem; }}"),
        format!(".{prefix}-qr svg {{ width: 100%; max-width: 24rem; }}"),
        format!(".{prefix}-content {{ margin-top: 0.5rem; word-break: break-all; }}"),
    ];
    doc.open("<style>");
    for rule in &rules {
        doc.line(rule);
    }
    doc.close("</style>");
}
