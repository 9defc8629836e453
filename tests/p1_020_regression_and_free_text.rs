// P1-020: Regression and free-text values
// Test: range checks on submitted numbers, text captions, bad task options
// Expected: out-of-range and malformed values are rejected, good ones stick

mod test_helpers;

use annotate::config::ColumnsConfig;
use annotate::export::{OutputFormat, render_export};
use annotate::{
    AnnotationRecord, AnnotationSession, ConfigurationError, Error, Example, LabelValue,
    OptionSpec, SessionOptions, TaskSpec, TaskType, ValidationError, WidgetState,
};
use serde_json::json;
use test_helpers::*;

fn rejection(result: annotate::Result<annotate::Step<&'static str>>) -> ValidationError {
    match result {
        Err(Error::Validation(err)) => err,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn out_of_range_score_is_rejected_then_accepted() {
    let mut s = session(["a"], score_task());
    s.advance().unwrap();

    assert!(matches!(
        rejection(s.submit(LabelValue::Number(11.0))),
        ValidationError::OutOfRange { .. }
    ));
    assert_eq!(s.current_position(), 0);
    assert!(!s.results()[0].changed);

    assert!(s.submit(LabelValue::Number(5.0)).unwrap().is_complete());
    assert_eq!(s.results()[0].value, LabelValue::Number(5.0));
}

#[test]
fn integer_range_keeps_values_between_steps() {
    let mut s = session(["a", "b"], score_task());
    s.advance().unwrap();
    s.submit(LabelValue::Number(5.5)).unwrap();
    assert_eq!(s.results()[0].value, LabelValue::Number(5.5));
    assert!(s.results()[0].changed);

    let table = render_export(
        &[scored(5.5), scored(4.0)],
        &score_task(),
        &ColumnsConfig::default(),
        OutputFormat::Table,
    );
    assert_eq!(table[0]["label"], json!(5.5));
    assert_eq!(table[1]["label"], json!(4));
}

fn scored(value: f64) -> AnnotationRecord<Example> {
    let mut record = AnnotationRecord::new(Example::new("x"));
    record.value = LabelValue::Number(value);
    record.changed = true;
    record
}

#[test]
fn regression_wants_finite_numbers() {
    let mut s = session(["a"], score_task());
    s.advance().unwrap();

    assert_eq!(
        rejection(s.submit(LabelValue::Number(f64::NAN))),
        ValidationError::NotFinite
    );
    assert!(matches!(
        rejection(s.submit(LabelValue::label("5"))),
        ValidationError::WrongShape { .. }
    ));
}

#[test]
fn fractional_range_accepts_fractions() {
    let task = TaskSpec::new(TaskType::Regression, OptionSpec::parse_range("0,1").unwrap())
        .unwrap();
    let mut s = session(["a"], task);
    s.advance().unwrap();
    s.submit(LabelValue::Number(0.25)).unwrap();
    assert_eq!(s.results()[0].value, LabelValue::Number(0.25));
}

#[test]
fn slider_starts_at_zero_and_shows_the_stored_score() {
    let mut s = session(["a", "b"], score_task());
    let first = s.advance().unwrap();
    assert!(matches!(
        first.intent().unwrap().widget,
        WidgetState::Slider { value, .. } if value == 0.0
    ));

    s.submit(LabelValue::Number(7.0)).unwrap();
    let back = s.retreat();
    assert!(matches!(
        back.intent().unwrap().widget,
        WidgetState::Slider { value, .. } if value == 7.0
    ));
}

#[test]
fn free_text_caption_is_recorded_and_shown_again() {
    let mut s = session(["img-1.png", "img-2.png"], TaskSpec::FreeText);
    s.advance().unwrap();
    s.submit(LabelValue::text("a cat on a mat")).unwrap();

    let back = s.retreat();
    assert_eq!(
        back.intent().unwrap().widget,
        WidgetState::TextArea {
            text: "a cat on a mat".into()
        }
    );
    assert_eq!(s.results()[0].value, LabelValue::text("a cat on a mat"));
}

#[test]
fn bad_task_descriptions_fail_construction() {
    let configure = |task: &str, options| {
        AnnotationSession::configure(["a"], task, options, SessionOptions::default())
            .map(|_| ())
    };

    assert!(matches!(
        configure("sentiment", OptionSpec::labels(["pos"])),
        Err(ConfigurationError::UnknownTaskType(_))
    ));
    assert!(matches!(
        configure("regression", OptionSpec::labels(["pos"])),
        Err(ConfigurationError::OptionShape { .. })
    ));
    assert!(matches!(
        configure("regression", OptionSpec::parse_range("3,3").unwrap()),
        Err(ConfigurationError::EmptyRange { .. })
    ));
    assert!(matches!(
        configure("regression", OptionSpec::parse_range("0,10,0").unwrap()),
        Err(ConfigurationError::InvalidStep(_))
    ));
    assert!(matches!(
        configure("single-label-classification", OptionSpec::None),
        Err(ConfigurationError::OptionShape { .. })
    ));
    assert!(matches!(
        configure("multi-label-classification", OptionSpec::labels(Vec::<String>::new())),
        Err(ConfigurationError::NoOptions { .. })
    ));
    assert!(configure("free-text", OptionSpec::None).is_ok());
}

#[test]
fn task_is_inferred_from_the_options() {
    assert_eq!(
        TaskSpec::infer(OptionSpec::labels(["x", "y"])).unwrap().task_type(),
        TaskType::SingleLabel
    );
    assert_eq!(
        TaskSpec::infer(OptionSpec::parse_range("1,5").unwrap()).unwrap().task_type(),
        TaskType::Regression
    );
    assert_eq!(TaskSpec::infer(OptionSpec::None).unwrap(), TaskSpec::FreeText);
}
