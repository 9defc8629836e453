//! Label examples one at a time.
//!
//! An [`AnnotationSession`] walks a list of examples with a cursor, accepts
//! labels for a fixed [`TaskSpec`] (single-label, multi-label, regression or
//! free text) and hands [`RenderIntent`]s to whatever front end draws them.
//! The crate ships a terminal front end ([`console`]) and, behind the `gui`
//! feature, a slint window in the `annotate` binary.

pub mod analyse;
pub mod classes;
pub mod config;
pub mod console;
pub mod decorate;
pub mod error;
pub mod export;
pub mod logging;
pub mod progress;
pub mod render;
pub mod state;
pub mod task;
pub mod utils;

pub use error::{
    CallbackError, ConfigurationError, DatasetError, Error, ExportError, Result, ValidationError,
};
pub use progress::ProgressSummary;
pub use render::{NavigationState, RenderIntent, Renderer, Step, Toggle, WidgetState};
pub use state::{AnnotationRecord, AnnotationSession, Example, SessionOptions, SessionPhase};
pub use task::{LabelValue, NumericRange, OptionSpec, TaskSpec, TaskType};
