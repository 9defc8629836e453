//! Callback handlers for the annotation window.
//!
//! - `navigation` - skip ahead and go back
//! - `labeling` - choose, toggle and submit values

pub mod labeling;
pub mod navigation;
