//! QR rendering.
//!
//! Content is always encoded as one byte-mode segment at error correction
//! level M, in the smallest version that fits. The same [`QrMatrix`] feeds
//! every output: raster previews, raster downloads and SVG.
//!
//! Rasters use a fixed two-tone scheme and a fixed quiet-zone margin, both
//! taken from [`QrStyle`].

mod panel;
mod style;

pub use panel::{PanelState, QrPanel, QrPreview, QrTicket, RenderJob, spawn_render};
pub use style::{HexColor, QrStyle};

pub use image::RgbaImage;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba};
use qrcode::bits::Bits;
use qrcode::{Color, EcLevel, QrCode, Version};

/// File name of the downloadable image.
pub const DOWNLOAD_FILE_NAME: &str = "qr-code.png";

const EC_LEVEL: EcLevel = EcLevel::M;

/// Error type for QR rendering.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("Nothing to encode")]
    EmptyContent,

    #[error("Content is too long for a QR code ({0} bytes)")]
    TooLong(usize),

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render worker stopped before producing a result")]
    WorkerLost,
}

/// Whether `content` can be turned into a code at all.
///
/// Blank input keeps the generate action disabled.
pub fn is_generatable(content: &str) -> bool {
    !content.trim().is_empty()
}

/// The module grid of one QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    version: i16,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encode `content` exactly as given, in a single byte segment.
    pub fn encode(content: &str) -> Result<Self, QrError> {
        if !is_generatable(content) {
            return Err(QrError::EmptyContent);
        }
        let data = content.as_bytes();
        for v in 1..=40 {
            let version = Version::Normal(v);
            let mut bits = Bits::new(version);
            if bits.push_byte_data(data).is_err() || bits.push_terminator(EC_LEVEL).is_err() {
                continue;
            }
            let code = QrCode::with_bits(bits, EC_LEVEL)?;
            tracing::debug!(version = v, bytes = data.len(), "encoded QR matrix");
            return Ok(Self::from_code(&code, v));
        }
        Err(QrError::TooLong(data.len()))
    }

    fn from_code(code: &QrCode, version: i16) -> Self {
        Self {
            width: code.width(),
            version,
            dark: code
                .to_colors()
                .into_iter()
                .map(|c| c == Color::Dark)
                .collect(),
        }
    }

    /// Modules per side, without margin.
    pub fn width(&self) -> usize {
        self.width
    }

    /// QR version (1 to 40).
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Whether the module at (`x`, `y`) is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Rasterize into a square image `max(size, modules)` pixels wide.
    ///
    /// Modules are whole pixels; the code is centred and the leftover
    /// border is filled with the light color.
    pub fn to_image(&self, size: u32, style: &QrStyle) -> RgbaImage {
        let layout = Layout::new(self.width, size, style.margin);
        let dark = Rgba(style.dark.rgba());
        let light = Rgba(style.light.rgba());

        let mut image = RgbaImage::from_pixel(layout.dimension, layout.dimension, light);
        for y in 0..self.width {
            for x in 0..self.width {
                if !self.is_dark(x, y) {
                    continue;
                }
                let (px, py) = layout.module_origin(x, y);
                for dy in 0..layout.module_px {
                    for dx in 0..layout.module_px {
                        image.put_pixel(px + dx, py + dy, dark);
                    }
                }
            }
        }
        image
    }

    /// Render as a standalone SVG document, one unit per module.
    pub fn to_svg(&self, style: &QrStyle) -> String {
        let margin = style.margin as usize;
        let side = self.width + 2 * margin;
        let mut path = String::new();
        for y in 0..self.width {
            for x in 0..self.width {
                if self.is_dark(x, y) {
                    path.push_str(&format!("M{} {}h1v1h-1z", x + margin, y + margin));
                }
            }
        }
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {side} {side}\" \
             shape-rendering=\"crispEdges\">\
             <rect width=\"{side}\" height=\"{side}\" fill=\"{light}\"/>\
             <path fill=\"{dark}\" d=\"{path}\"/></svg>",
            light = style.light,
            dark = style.dark,
        )
    }
}

/// Pixel layout of a rasterized matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    dimension: u32,
    module_px: u32,
    offset: u32,
    margin: u32,
}

impl Layout {
    fn new(width: usize, size: u32, margin: u32) -> Self {
        let modules = width as u32 + 2 * margin;
        let module_px = (size / modules).max(1);
        let code_px = modules * module_px;
        let dimension = size.max(code_px);
        Self {
            dimension,
            module_px,
            offset: (dimension - code_px) / 2,
            margin,
        }
    }

    fn module_origin(&self, x: usize, y: usize) -> (u32, u32) {
        (
            self.offset + (x as u32 + self.margin) * self.module_px,
            self.offset + (y as u32 + self.margin) * self.module_px,
        )
    }
}

/// Render `content` at an arbitrary size.
pub fn render(content: &str, size: u32, style: &QrStyle) -> Result<RgbaImage, QrError> {
    let matrix = QrMatrix::encode(content)?;
    Ok(matrix.to_image(size, style))
}

/// Render the small on-screen preview.
pub fn render_preview(content: &str, style: &QrStyle) -> Result<RgbaImage, QrError> {
    render(content, style.preview_size, style)
}

/// Render the large downloadable image, encoding `content` afresh.
pub fn render_download(content: &str, style: &QrStyle) -> Result<RgbaImage, QrError> {
    render(content, style.download_size, style)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, QrError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render the download image and write it to `dir/qr-code.png`.
pub fn save_download(content: &str, style: &QrStyle, dir: &Path) -> Result<PathBuf, QrError> {
    let path = dir.join(DOWNLOAD_FILE_NAME);
    save_png(content, style.download_size, style, &path)?;
    Ok(path)
}

/// Render `content` at `size` and write a PNG to `path`.
pub fn save_png(content: &str, size: u32, style: &QrStyle, path: &Path) -> Result<(), QrError> {
    let png = encode_png(&render(content, size, style)?)?;
    std::fs::write(path, png).map_err(|source| QrError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), size, "saved QR image");
    Ok(())
}
