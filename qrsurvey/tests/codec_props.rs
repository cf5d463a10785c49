//! Property tests for the link codec.

use proptest::prelude::*;
use qrsurvey::codec::{decode_survey_url, encode_survey, trimmed};
use qrsurvey::{MultipleChoiceQuestion, Question, QuestionId, Survey};
use url::Url;

fn text_strategy() -> impl Strategy<Value = String> {
    " ?[A-Za-z0-9éü❤][A-Za-z0-9 ,.?!&=+/%#éü❤]{0,24} ?"
}

fn question_strategy() -> impl Strategy<Value = (String, Option<Vec<String>>)> {
    (
        text_strategy(),
        prop::option::of(
            prop::collection::vec(text_strategy(), 2..=6).prop_filter(
                "options must be distinct once trimmed",
                |options| MultipleChoiceQuestion::new(options.clone()).first_duplicate().is_none(),
            ),
        ),
    )
}

fn survey_strategy() -> impl Strategy<Value = Survey> {
    (text_strategy(), prop::collection::vec(question_strategy(), 1..8)).prop_map(
        |(title, questions)| {
            let questions = questions
                .into_iter()
                .enumerate()
                .map(|(i, (text, options))| {
                    let id = QuestionId::new(i as u64 + 1);
                    match options {
                        Some(options) => Question::multiple_choice(id, text, options),
                        None => Question::free_text(id, text),
                    }
                })
                .collect();
            Survey::new(title, questions)
        },
    )
}

proptest! {
    /// Property: decoding an encoded link yields the trimmed survey
    #[test]
    fn prop_link_round_trip(survey in survey_strategy()) {
        let base = Url::parse("https://qrsurvey.app/take?lang=en").unwrap();
        let link = encode_survey(&survey, &base).unwrap();
        let decoded = decode_survey_url(link.as_str()).unwrap();
        prop_assert_eq!(decoded, trimmed(&survey));
    }

    /// Property: arbitrary input never panics the decoder
    #[test]
    fn prop_decode_garbage_is_an_error_not_a_panic(
        t in "[A-Za-z0-9_-]{0,40}",
        q in "[A-Za-z0-9_-]{0,80}",
    ) {
        let _ = decode_survey_url(&format!("https://qrsurvey.app/take?t={t}&q={q}"));
    }
}
