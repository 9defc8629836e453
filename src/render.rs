//! Render intents handed to whatever draws the session.
//!
//! A [`RenderIntent`] is an owned snapshot; front ends never hold references
//! into the session's records.

use crate::progress::ProgressSummary;
use crate::task::{LabelValue, NumericRange, TaskSpec};

/// Result of a session transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<E> {
    /// Nothing has been shown yet.
    NotStarted,
    Show(RenderIntent<E>),
    Complete,
}

impl<E> Step<E> {
    pub fn intent(&self) -> Option<&RenderIntent<E>> {
        match self {
            Step::Show(intent) => Some(intent),
            Step::NotStarted | Step::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderIntent<E> {
    pub example: E,
    pub current_value: LabelValue,
    pub position: usize,
    pub total: usize,
    pub changed: bool,
    pub id: Option<String>,
    pub widget: WidgetState,
    pub navigation: NavigationState,
}

/// Which controls are usable for the example on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub back: bool,
    pub skip: bool,
    pub submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub label: String,
    pub on: bool,
}

/// Input widget for the task, pre-populated with the example's value.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Buttons {
        options: Vec<String>,
        selected: Option<String>,
    },
    /// Single-label choice from a drop-down list, sent with an explicit submit.
    Dropdown {
        options: Vec<String>,
        selected: Option<String>,
    },
    Toggles(Vec<Toggle>),
    Slider {
        range: NumericRange,
        value: f64,
    },
    TextArea {
        text: String,
    },
}

impl WidgetState {
    /// Build the widget for `value`. `carried` is a multi-label selection to
    /// show when the example has none of its own.
    pub fn new(task: &TaskSpec, value: &LabelValue, carried: Option<&[String]>) -> Self {
        match task {
            TaskSpec::SingleLabel(options) => WidgetState::Buttons {
                options: options.clone(),
                selected: match value {
                    LabelValue::Label(label) => Some(label.clone()),
                    _ => None,
                },
            },
            TaskSpec::MultiLabel(options) => WidgetState::Toggles(
                options
                    .iter()
                    .map(|label| Toggle {
                        label: label.clone(),
                        on: if value.is_set() {
                            value.has_label(label)
                        } else {
                            carried.is_some_and(|c| c.contains(label))
                        },
                    })
                    .collect(),
            ),
            TaskSpec::Regression(range) => WidgetState::Slider {
                range: *range,
                value: match value {
                    LabelValue::Number(number) => *number,
                    _ => range.initial_value(),
                },
            },
            TaskSpec::FreeText => WidgetState::TextArea {
                text: match value {
                    LabelValue::Text(text) => text.clone(),
                    _ => String::new(),
                },
            },
        }
    }

    /// Show single-label options as a drop-down list instead of buttons.
    pub fn into_dropdown(self) -> Self {
        match self {
            WidgetState::Buttons { options, selected } => {
                WidgetState::Dropdown { options, selected }
            }
            other => other,
        }
    }

    /// Position of the selected option in a button row or drop-down list.
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            WidgetState::Buttons { options, selected }
            | WidgetState::Dropdown { options, selected } => {
                let selected = selected.as_ref()?;
                options.iter().position(|o| o == selected)
            }
            _ => None,
        }
    }

    /// Labels switched on in a toggle widget.
    pub fn toggled_labels(&self) -> Vec<String> {
        match self {
            WidgetState::Toggles(toggles) => toggles
                .iter()
                .filter(|t| t.on)
                .map(|t| t.label.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Something that can draw a session step.
pub trait Renderer<E> {
    type Error;

    fn render(&mut self, step: &Step<E>, progress: &ProgressSummary) -> Result<(), Self::Error>;
}
