// P1-050: Per-example and final callbacks
// Test: hook ordering, failing hooks, completion reported once
// Expected: records are written before hooks run; failures surface to the caller

mod test_helpers;

use std::cell::RefCell;
use std::rc::Rc;

use annotate::{AnnotationSession, CallbackError, Error, LabelValue, SessionPhase};
use test_helpers::*;

#[test]
fn example_hook_sees_each_accepted_submit_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut s = AnnotationSession::builder(["a", "b", "c"], sentiment_task())
        .on_example(move |example, value| {
            log.borrow_mut().push((example.to_string(), value.clone()));
            Ok(())
        })
        .build();

    s.advance().unwrap();
    s.submit(LabelValue::label("pos")).unwrap();
    s.submit(LabelValue::label("typo")).unwrap_err();
    s.skip().unwrap();
    s.submit(LabelValue::label("neg")).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            ("a".to_string(), LabelValue::label("pos")),
            ("c".to_string(), LabelValue::label("neg")),
        ]
    );
}

#[test]
fn failing_example_hook_keeps_the_record_and_the_cursor() {
    let mut s = AnnotationSession::builder(["a", "b"], sentiment_task())
        .on_example(|_, _| Err(CallbackError::new("storage unavailable")))
        .build();
    s.advance().unwrap();

    let err = s.submit(LabelValue::label("pos")).unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert!(err.to_string().contains("storage unavailable"));
    assert_eq!(s.current_position(), 0);
    assert!(s.results()[0].changed);
    assert_eq!(s.results()[0].value, LabelValue::label("pos"));

    assert_eq!(shown(&s.advance().unwrap()), "b");
}

#[test]
fn final_hook_runs_once_with_all_records() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let log = calls.clone();
    let mut s = AnnotationSession::builder(["a", "b"], sentiment_task())
        .on_complete(move |records| {
            log.borrow_mut().push(records.iter().filter(|r| r.changed).count());
            Ok(())
        })
        .build();

    s.advance().unwrap();
    s.submit(LabelValue::label("pos")).unwrap();
    assert!(calls.borrow().is_empty());
    s.submit(LabelValue::label("neg")).unwrap();
    assert_eq!(*calls.borrow(), vec![2]);

    s.retreat();
    assert!(s.advance().unwrap().is_complete());
    assert_eq!(*calls.borrow(), vec![2]);
}

#[test]
fn failing_final_hook_still_completes() {
    let mut s = AnnotationSession::builder(["a"], sentiment_task())
        .on_complete(|_| Err(CallbackError::new("upload failed")))
        .build();
    s.advance().unwrap();

    let err = s.submit(LabelValue::label("pos")).unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert_eq!(s.phase(), SessionPhase::Complete);
    assert!(s.advance().unwrap().is_complete());
}

#[test]
fn keep_going_never_reports_completion() {
    let called = Rc::new(RefCell::new(false));
    let flag = called.clone();
    let mut s = AnnotationSession::builder(["a"], sentiment_task())
        .options(annotate::SessionOptions {
            stop_at_last_example: false,
            ..Default::default()
        })
        .on_complete(move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        })
        .build();
    s.advance().unwrap();
    s.submit(LabelValue::label("pos")).unwrap();
    s.advance().unwrap();
    assert!(!*called.borrow());
}
