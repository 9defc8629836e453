use std::fmt;

/// Annotation progress, recomputed from the records on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub annotated: usize,
    pub total: usize,
    /// Cursor: -1 before the first example, `total` once finished.
    pub position: isize,
    pub id: Option<String>,
}

impl ProgressSummary {
    /// One-based position for display, pinned to the last example once the
    /// session has run past it.
    pub fn display_position(&self) -> usize {
        if self.position >= self.total as isize {
            self.total
        } else {
            (self.position + 1).max(0) as usize
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.annotated
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} Examples annotated, Current Position: {} ",
            self.annotated,
            self.total,
            self.display_position()
        )?;
        if let Some(id) = &self.id {
            write!(f, "(id: {id}) ")?;
        }
        Ok(())
    }
}
