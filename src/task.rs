//! Task types, their option specifications and label values.
//!
//! A [`TaskSpec`] is the validated, immutable description of what is being
//! collected. Every submitted [`LabelValue`] goes through
//! [`TaskSpec::validate`] before it reaches a record.

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::{ConfigurationError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    SingleLabel,
    MultiLabel,
    Regression,
    FreeText,
}

impl TaskType {
    pub fn name(&self) -> &'static str {
        match self {
            TaskType::SingleLabel => "single-label-classification",
            TaskType::MultiLabel => "multi-label-classification",
            TaskType::Regression => "regression",
            TaskType::FreeText => "free-text",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-label-classification" | "single-label" | "classification" => {
                Ok(TaskType::SingleLabel)
            }
            "multi-label-classification" | "multi-label" | "multilabel-classification" => {
                Ok(TaskType::MultiLabel)
            }
            "regression" => Ok(TaskType::Regression),
            "free-text" | "captioning" => Ok(TaskType::FreeText),
            _ => Err(ConfigurationError::UnknownTaskType(s.to_string())),
        }
    }
}

/// Loosely shaped options as supplied by a caller, before they are checked
/// against a task type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionSpec {
    #[default]
    None,
    Labels(Vec<String>),
    /// `(min, max)` or `(min, max, step)`.
    Range(Vec<Number>),
}

impl OptionSpec {
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSpec::Labels(labels.into_iter().map(Into::into).collect())
    }

    /// Parse `"min,max"` or `"min,max,step"`. Integers stay integers so the
    /// range can be recognised as integral.
    pub fn parse_range(text: &str) -> Result<Self, ConfigurationError> {
        let mut bounds = Vec::new();
        for part in text.split(',') {
            let part = part.trim();
            let number = if let Ok(int) = part.parse::<i64>() {
                Number::from(int)
            } else {
                part.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .ok_or_else(|| ConfigurationError::NotANumber(part.to_string()))?
            };
            bounds.push(number);
        }
        Ok(OptionSpec::Range(bounds))
    }
}

/// Inclusive numeric range of a regression task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
    /// All bounds were integers; sliders snap to whole numbers.
    pub integer: bool,
}

impl NumericRange {
    pub fn new(min: f64, max: f64, step: Option<f64>) -> Result<Self, ConfigurationError> {
        for bound in [Some(min), Some(max), step].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ConfigurationError::NotANumber(bound.to_string()));
            }
        }
        if min >= max {
            return Err(ConfigurationError::EmptyRange { min, max });
        }
        if let Some(step) = step {
            if step <= 0.0 {
                return Err(ConfigurationError::InvalidStep(step));
            }
        }
        Ok(Self {
            min,
            max,
            step,
            integer: false,
        })
    }

    fn from_numbers(numbers: &[Number]) -> Result<Self, ConfigurationError> {
        let as_f64 = |n: &Number| {
            n.as_f64()
                .ok_or_else(|| ConfigurationError::NotANumber(n.to_string()))
        };
        let (min, max, step) = match numbers {
            [min, max] => (as_f64(min)?, as_f64(max)?, None),
            [min, max, step] => (as_f64(min)?, as_f64(max)?, Some(as_f64(step)?)),
            _ => {
                return Err(ConfigurationError::OptionShape {
                    task: TaskType::Regression.name(),
                    expected: "a range (min, max) or (min, max, step)",
                });
            }
        };
        let mut range = Self::new(min, max, step)?;
        range.integer = numbers.iter().all(|n| n.is_i64() || n.is_u64());
        Ok(range)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Starting value for a slider on an unlabeled example.
    pub fn initial_value(&self) -> f64 {
        0.0_f64.clamp(self.min, self.max)
    }

    /// Round to the nearest step from `min` and clamp into the range.
    pub fn snap(&self, value: f64) -> f64 {
        let step = match (self.step, self.integer) {
            (Some(step), _) => step,
            (None, true) => 1.0,
            (None, false) => return value.clamp(self.min, self.max),
        };
        let steps = ((value - self.min) / step).round();
        (self.min + steps * step).clamp(self.min, self.max)
    }

    fn validate(&self, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite);
        }
        if !self.contains(value) {
            return Err(ValidationError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// The label recorded for one example.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LabelValue {
    #[default]
    Unset,
    Label(String),
    Labels(Vec<String>),
    Number(f64),
    Text(String),
}

impl LabelValue {
    pub fn label(label: impl Into<String>) -> Self {
        LabelValue::Label(label.into())
    }

    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelValue::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn text(text: impl Into<String>) -> Self {
        LabelValue::Text(text.into())
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, LabelValue::Unset)
    }

    /// Whether `label` is (one of) the chosen label(s).
    pub fn has_label(&self, label: &str) -> bool {
        match self {
            LabelValue::Label(chosen) => chosen == label,
            LabelValue::Labels(chosen) => chosen.iter().any(|c| c == label),
            _ => false,
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Unset => f.write_str("(unset)"),
            LabelValue::Label(label) => f.write_str(label),
            LabelValue::Labels(labels) => f.write_str(&labels.join(", ")),
            LabelValue::Number(value) => write!(f, "{value}"),
            LabelValue::Text(text) => f.write_str(text),
        }
    }
}

/// A validated task: the type together with its fixed options.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSpec {
    SingleLabel(Vec<String>),
    MultiLabel(Vec<String>),
    Regression(NumericRange),
    FreeText,
}

impl TaskSpec {
    pub fn new(task: TaskType, options: OptionSpec) -> Result<Self, ConfigurationError> {
        match (task, options) {
            (TaskType::SingleLabel, OptionSpec::Labels(labels)) => {
                Ok(TaskSpec::SingleLabel(checked_labels(task, labels)?))
            }
            (TaskType::MultiLabel, OptionSpec::Labels(labels)) => {
                Ok(TaskSpec::MultiLabel(checked_labels(task, labels)?))
            }
            (TaskType::SingleLabel | TaskType::MultiLabel, _) => {
                Err(ConfigurationError::OptionShape {
                    task: task.name(),
                    expected: "a list of labels",
                })
            }
            (TaskType::Regression, OptionSpec::Range(numbers)) => {
                Ok(TaskSpec::Regression(NumericRange::from_numbers(&numbers)?))
            }
            (TaskType::Regression, _) => Err(ConfigurationError::OptionShape {
                task: task.name(),
                expected: "a range (min, max) or (min, max, step)",
            }),
            (TaskType::FreeText, OptionSpec::None) => Ok(TaskSpec::FreeText),
            (TaskType::FreeText, ignored) => {
                tracing::warn!(?ignored, "free-text tasks take no options; ignoring them");
                Ok(TaskSpec::FreeText)
            }
        }
    }

    /// Pick the task from the option shape alone: labels classify, a range
    /// regresses, nothing means free text.
    pub fn infer(options: OptionSpec) -> Result<Self, ConfigurationError> {
        let task = match &options {
            OptionSpec::Labels(_) => TaskType::SingleLabel,
            OptionSpec::Range(_) => TaskType::Regression,
            OptionSpec::None => TaskType::FreeText,
        };
        Self::new(task, options)
    }

    pub fn task_type(&self) -> TaskType {
        match self {
            TaskSpec::SingleLabel(_) => TaskType::SingleLabel,
            TaskSpec::MultiLabel(_) => TaskType::MultiLabel,
            TaskSpec::Regression(_) => TaskType::Regression,
            TaskSpec::FreeText => TaskType::FreeText,
        }
    }

    /// Configured labels; empty for regression and free text.
    pub fn labels(&self) -> &[String] {
        match self {
            TaskSpec::SingleLabel(labels) | TaskSpec::MultiLabel(labels) => labels,
            TaskSpec::Regression(_) | TaskSpec::FreeText => &[],
        }
    }

    /// Check `value` against the task and return its normalized form.
    /// Multi-label selections come back deduplicated in option order.
    pub fn validate(&self, value: LabelValue) -> Result<LabelValue, ValidationError> {
        match (self, value) {
            (TaskSpec::SingleLabel(labels), LabelValue::Label(label) | LabelValue::Text(label)) => {
                if labels.contains(&label) {
                    Ok(LabelValue::Label(label))
                } else {
                    Err(ValidationError::UnknownOption(label))
                }
            }
            (TaskSpec::SingleLabel(_), _) => Err(ValidationError::WrongShape {
                task: TaskType::SingleLabel.name(),
                expected: "one label",
            }),
            (TaskSpec::MultiLabel(labels), LabelValue::Labels(chosen)) => {
                if let Some(unknown) = chosen.iter().find(|c| !labels.contains(c)) {
                    return Err(ValidationError::UnknownOption(unknown.clone()));
                }
                Ok(LabelValue::Labels(
                    labels
                        .iter()
                        .filter(|label| chosen.contains(label))
                        .cloned()
                        .collect(),
                ))
            }
            (TaskSpec::MultiLabel(_), _) => Err(ValidationError::WrongShape {
                task: TaskType::MultiLabel.name(),
                expected: "a set of labels",
            }),
            (TaskSpec::Regression(range), LabelValue::Number(value)) => {
                range.validate(value).map(LabelValue::Number)
            }
            (TaskSpec::Regression(_), _) => Err(ValidationError::WrongShape {
                task: TaskType::Regression.name(),
                expected: "a number",
            }),
            (TaskSpec::FreeText, LabelValue::Text(text) | LabelValue::Label(text)) => {
                Ok(LabelValue::Text(text))
            }
            (TaskSpec::FreeText, _) => Err(ValidationError::WrongShape {
                task: TaskType::FreeText.name(),
                expected: "text",
            }),
        }
    }

    /// JSON form of a value as written by the exporters.
    pub fn value_to_json(&self, value: &LabelValue) -> Value {
        match value {
            LabelValue::Unset => Value::Null,
            LabelValue::Label(text) | LabelValue::Text(text) => Value::String(text.clone()),
            LabelValue::Labels(labels) => {
                Value::Array(labels.iter().cloned().map(Value::String).collect())
            }
            LabelValue::Number(number) => match self {
                TaskSpec::Regression(_) if number.fract() == 0.0 => Value::from(*number as i64),
                _ => Number::from_f64(*number).map_or(Value::Null, Value::Number),
            },
        }
    }

    /// Read a previously stored single value column back. Empty strings and
    /// nulls are treated as unset.
    pub fn value_from_json(&self, value: &Value) -> Result<LabelValue, ValidationError> {
        match (self, value) {
            (_, Value::Null) => Ok(LabelValue::Unset),
            (TaskSpec::SingleLabel(_), Value::String(s)) if s.is_empty() => Ok(LabelValue::Unset),
            (TaskSpec::SingleLabel(_), Value::String(s)) => {
                self.validate(LabelValue::Label(s.clone()))
            }
            (TaskSpec::Regression(_), Value::Number(n)) => {
                let number = n.as_f64().ok_or(ValidationError::NotFinite)?;
                self.validate(LabelValue::Number(number))
            }
            (TaskSpec::FreeText, Value::String(s)) => Ok(LabelValue::Text(s.clone())),
            (TaskSpec::MultiLabel(_), Value::Array(items)) => {
                let mut chosen = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => chosen.push(s.clone()),
                        _ => return Err(self.shape_error()),
                    }
                }
                self.validate(LabelValue::Labels(chosen))
            }
            _ => Err(self.shape_error()),
        }
    }

    fn shape_error(&self) -> ValidationError {
        let expected = match self {
            TaskSpec::SingleLabel(_) => "one label",
            TaskSpec::MultiLabel(_) => "a set of labels",
            TaskSpec::Regression(_) => "a number",
            TaskSpec::FreeText => "text",
        };
        ValidationError::WrongShape {
            task: self.task_type().name(),
            expected,
        }
    }
}

fn checked_labels(task: TaskType, labels: Vec<String>) -> Result<Vec<String>, ConfigurationError> {
    if labels.is_empty() {
        return Err(ConfigurationError::NoOptions { task: task.name() });
    }
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    Ok(unique)
}
