// P2-010: Terminal front end
// Test: scripted input lines drive a session through the console
// Expected: labels, commands and rejections behave like the buttons they replace

mod test_helpers;

use std::io::Cursor;

use annotate::console::{Console, RunOutcome};
use annotate::{AnnotationSession, LabelValue, SessionOptions};
use test_helpers::*;

fn run(
    session: &mut AnnotationSession<&'static str>,
    input: &str,
) -> (RunOutcome, String) {
    let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
    let outcome = console.run(session).expect("console run");
    let output = String::from_utf8(console.into_output()).expect("utf-8 output");
    (outcome, output)
}

#[test]
fn scripted_session_completes() {
    let mut s = session(["a", "b", "c"], sentiment_task());
    let (outcome, output) = run(&mut s, "1\n:skip\nneg\n");

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(
        values(&s),
        vec![
            ("a", LabelValue::label("pos")),
            ("b", LabelValue::Unset),
            ("c", LabelValue::label("neg")),
        ]
    );
    assert!(output.starts_with("0 of 3 Examples annotated, Current Position: 1 \na\n"));
    assert!(output.contains("[1] pos  [2] neg"));
    assert!(output.contains("2 of 3 Examples annotated, Current Position: 3 \nAnnotation done.\n"));
}

#[test]
fn bad_input_is_reported_and_reprompted() {
    let mut s = session(["a", "b"], sentiment_task());
    let (outcome, output) = run(&mut s, "maybe\n:back\n:frobnicate\npos\n:quit\n");

    assert_eq!(outcome, RunOutcome::Quit);
    assert!(output.contains("rejected: 'maybe' is not one of the configured labels"));
    assert!(output.contains("going back is not available here"));
    assert!(output.contains("rejected: unknown command ':frobnicate' (try :help)"));
    assert_eq!(s.results()[0].value, LabelValue::label("pos"));
    assert_eq!(s.current_position(), 1);
}

#[test]
fn skip_is_refused_on_the_last_example() {
    let mut s = session(["only"], sentiment_task());
    let (outcome, output) = run(&mut s, ":skip\n");

    assert_eq!(outcome, RunOutcome::EndOfInput);
    assert!(output.contains("skipping is not available here"));
    assert_eq!(s.current_position(), 0);
}

#[test]
fn regression_input_is_range_checked() {
    let mut s = session(["a"], score_task());
    let (outcome, output) = run(&mut s, "11\nten\n5\n");

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(output.contains("value in [0, 10], step 1 (current: 0)"));
    assert!(output.contains("rejected: 11 is outside the range [0, 10]"));
    assert!(output.contains("rejected: regression expects a number"));
    assert_eq!(s.results()[0].value, LabelValue::Number(5.0));
}

#[test]
fn multi_label_answers_are_comma_separated() {
    let mut s = session(["pets", "empty"], pets_task());
    let (outcome, _) = run(&mut s, "dog, 1\n\n");

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(s.results()[0].value, LabelValue::labels(["cat", "dog"]));
    assert_eq!(s.results()[1].value, LabelValue::Labels(Vec::new()));
    assert!(s.results()[1].changed);
}

#[test]
fn going_back_resumes_where_the_user_left() {
    let mut s = session(["a", "b"], sentiment_task());
    let (_, output) = run(&mut s, "pos\n:back\n");
    assert!(output.contains("[1] pos ✓  [2] neg"));

    let (outcome, _) = run(&mut s, "neg\nneg\n");
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(
        values(&s),
        vec![("a", LabelValue::label("neg")), ("b", LabelValue::label("neg"))]
    );
}

#[test]
fn dropdown_lists_one_option_per_line() {
    let options = SessionOptions {
        use_dropdown: true,
        ..SessionOptions::default()
    };
    let mut s = session_with(&["a", "b"], sentiment_task(), options);
    let (_, output) = run(&mut s, "neg\n:back\n");

    assert!(output.contains("  1) pos\n  2) neg\n"));
    assert!(output.contains("  1) pos\n* 2) neg\n"));
    assert_eq!(s.results()[0].value, LabelValue::label("neg"));
}
