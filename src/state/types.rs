use std::fmt;

use serde_json::{Map, Value};

use crate::task::LabelValue;

/// One row of a tabular dataset.
///
/// `content` is what gets shown to the annotator. Columns that the session
/// does not interpret are kept in `extra` so they survive the table export.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub content: Value,
    pub id: Option<Value>,
    pub extra: Map<String, Value>,
}

impl Example {
    pub fn new(content: impl Into<Value>) -> Self {
        Self {
            content: content.into(),
            id: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Text used for display and as the key in mapping exports.
    pub fn text(&self) -> String {
        value_text(&self.content)
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Strings print bare; everything else prints as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// An example together with its current label.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord<E> {
    pub example: E,
    pub value: LabelValue,
    /// Set once the value was explicitly submitted.
    pub changed: bool,
    /// Identifier shown in the progress text, if the input had one.
    pub id: Option<String>,
}

impl<E> AnnotationRecord<E> {
    pub fn new(example: E) -> Self {
        Self {
            example,
            value: LabelValue::Unset,
            changed: false,
            id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress(usize),
    Complete,
}

/// Navigation and cosmetic switches for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub shuffle: bool,
    pub allow_back: bool,
    pub allow_skip: bool,
    pub reset_multi_label_on_submit: bool,
    /// When false, moving past the last example steps back onto it instead
    /// of completing the session.
    pub stop_at_last_example: bool,
    /// Offer single-label options as a drop-down list with a submit button.
    pub use_dropdown: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            shuffle: false,
            allow_back: true,
            allow_skip: true,
            reset_multi_label_on_submit: true,
            stop_at_last_example: true,
            use_dropdown: false,
        }
    }
}
