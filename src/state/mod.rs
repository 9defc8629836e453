//! Session state for the annotator.
//!
//! This module contains:
//! - Records, examples and session options
//! - The annotation session and its transitions
//! - Dataset loading from JSON lists and tables

mod dataset;
mod session;
mod types;

pub use dataset::*;
pub use session::*;
pub use types::*;
