//! Helpers to summarize finished annotations.

use crate::state::AnnotationRecord;

/// Number of explicitly labeled examples carrying each label, in label order.
pub fn annotations_per_label<E>(
    records: &[AnnotationRecord<E>],
    labels: &[String],
) -> Vec<(String, usize)> {
    labels
        .iter()
        .map(|label| {
            let count = records
                .iter()
                .filter(|r| r.changed && r.value.has_label(label))
                .count();
            (label.clone(), count)
        })
        .collect()
}
