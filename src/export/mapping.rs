// Mapping export: changed examples keyed by their text

use serde_json::{Map, Value};

use crate::state::{AnnotationRecord, Example};
use crate::task::TaskSpec;

/// Only explicitly submitted examples appear. Examples whose text collides
/// keep the value of the later record.
pub fn to_mapping(records: &[AnnotationRecord<Example>], task: &TaskSpec) -> Value {
    let mut mapping = Map::new();
    for record in records.iter().filter(|r| r.changed) {
        mapping.insert(record.example.text(), task.value_to_json(&record.value));
    }
    Value::Object(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{LabelValue, OptionSpec, TaskType};
    use serde_json::json;

    #[test]
    fn only_changed_records_are_mapped() {
        let task = TaskSpec::new(TaskType::Regression, OptionSpec::parse_range("0,10").unwrap())
            .unwrap();
        let mut scored = AnnotationRecord::new(Example::new("a"));
        scored.value = LabelValue::Number(7.0);
        scored.changed = true;
        let mut stale = AnnotationRecord::new(Example::new("b"));
        stale.value = LabelValue::Number(3.0);

        assert_eq!(to_mapping(&[scored, stale], &task), json!({"a": 7}));
    }
}
