// Test helper functions for building sessions and datasets
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use annotate::{
    AnnotationSession, LabelValue, OptionSpec, SessionOptions, Step, TaskSpec, TaskType,
};

/// Single-label task over `pos`/`neg`.
pub fn sentiment_task() -> TaskSpec {
    TaskSpec::new(TaskType::SingleLabel, OptionSpec::labels(["pos", "neg"]))
        .expect("valid label set")
}

/// Multi-label task over `cat`/`dog`/`bird`.
pub fn pets_task() -> TaskSpec {
    TaskSpec::new(TaskType::MultiLabel, OptionSpec::labels(["cat", "dog", "bird"]))
        .expect("valid label set")
}

/// Regression task over the integer range 0..=10 with step 1.
pub fn score_task() -> TaskSpec {
    TaskSpec::new(
        TaskType::Regression,
        OptionSpec::parse_range("0,10,1").expect("valid range"),
    )
    .expect("valid range")
}

pub fn session<const N: usize>(
    examples: [&'static str; N],
    task: TaskSpec,
) -> AnnotationSession<&'static str> {
    AnnotationSession::builder(examples, task).build()
}

pub fn session_with(
    examples: &[&'static str],
    task: TaskSpec,
    options: SessionOptions,
) -> AnnotationSession<&'static str> {
    AnnotationSession::builder(examples.iter().copied(), task)
        .options(options)
        .build()
}

/// The example shown by `step`, panicking on any other step.
pub fn shown<E: Clone>(step: &Step<E>) -> E {
    step.intent()
        .map(|intent| intent.example.clone())
        .expect("an example should be on screen")
}

/// `(example, value)` pairs of the session's records.
pub fn values<E: Clone>(session: &AnnotationSession<E>) -> Vec<(E, LabelValue)> {
    session
        .results()
        .iter()
        .map(|r| (r.example.clone(), r.value.clone()))
        .collect()
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}
