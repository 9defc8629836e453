//! The annotation session: records, cursor and transitions.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::{CallbackError, ConfigurationError, Result, ValidationError};
use crate::progress::ProgressSummary;
use crate::render::{NavigationState, RenderIntent, Step, WidgetState};
use crate::state::types::{AnnotationRecord, SessionOptions, SessionPhase};
use crate::task::{LabelValue, OptionSpec, TaskSpec, TaskType};

/// Called after every accepted submit with the example and its new value.
pub type ExampleHook<E> = Box<dyn FnMut(&E, &LabelValue) -> Result<(), CallbackError>>;
/// Called once, the first time the session completes.
pub type FinalHook<E> = Box<dyn FnMut(&[AnnotationRecord<E>]) -> Result<(), CallbackError>>;

pub struct SessionBuilder<E> {
    records: Vec<AnnotationRecord<E>>,
    task: TaskSpec,
    options: SessionOptions,
    on_example: Option<ExampleHook<E>>,
    on_complete: Option<FinalHook<E>>,
}

impl<E> SessionBuilder<E> {
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_example(
        mut self,
        hook: impl FnMut(&E, &LabelValue) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_example = Some(Box::new(hook));
        self
    }

    pub fn on_complete(
        mut self,
        hook: impl FnMut(&[AnnotationRecord<E>]) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Build, shuffling with the thread-local generator if requested.
    pub fn build(self) -> AnnotationSession<E> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    /// Build, shuffling with `rng` if requested.
    pub fn build_with_rng<R: Rng + ?Sized>(mut self, rng: &mut R) -> AnnotationSession<E> {
        if self.options.shuffle {
            self.records.shuffle(rng);
        }
        debug!(
            task = %self.task.task_type(),
            examples = self.records.len(),
            shuffled = self.options.shuffle,
            "annotation session created"
        );
        AnnotationSession {
            records: self.records,
            cursor: -1,
            task: self.task,
            options: self.options,
            on_example: self.on_example,
            on_complete: self.on_complete,
            completion_reported: false,
            carried_toggles: None,
        }
    }
}

pub struct AnnotationSession<E> {
    records: Vec<AnnotationRecord<E>>,
    cursor: isize,
    task: TaskSpec,
    options: SessionOptions,
    on_example: Option<ExampleHook<E>>,
    on_complete: Option<FinalHook<E>>,
    completion_reported: bool,
    /// Last multi-label selection, kept when toggles are not reset.
    carried_toggles: Option<Vec<String>>,
}

impl<E: fmt::Debug> fmt::Debug for AnnotationSession<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationSession")
            .field("records", &self.records)
            .field("cursor", &self.cursor)
            .field("task", &self.task)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E> AnnotationSession<E> {
    pub fn builder(examples: impl IntoIterator<Item = E>, task: TaskSpec) -> SessionBuilder<E> {
        Self::from_records(examples.into_iter().map(AnnotationRecord::new).collect(), task)
    }

    /// Start from records that may already carry labels, e.g. a table that
    /// was annotated before.
    pub fn from_records(records: Vec<AnnotationRecord<E>>, task: TaskSpec) -> SessionBuilder<E> {
        SessionBuilder {
            records,
            task,
            options: SessionOptions::default(),
            on_example: None,
            on_complete: None,
        }
    }

    /// Validate the task name and option shape, then build.
    pub fn configure(
        examples: impl IntoIterator<Item = E>,
        task: &str,
        options: OptionSpec,
        session_options: SessionOptions,
    ) -> Result<Self, ConfigurationError> {
        let task_type: TaskType = task.parse()?;
        let spec = TaskSpec::new(task_type, options)?;
        Ok(Self::builder(examples, spec).options(session_options).build())
    }

    pub fn current_position(&self) -> isize {
        self.cursor
    }

    pub fn phase(&self) -> SessionPhase {
        match self.active_index() {
            Some(index) => SessionPhase::InProgress(index),
            None if self.cursor < 0 => SessionPhase::NotStarted,
            None => SessionPhase::Complete,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn task(&self) -> &TaskSpec {
        &self.task
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn results(&self) -> &[AnnotationRecord<E>] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AnnotationRecord<E>> {
        self.records
    }

    /// Explicitly submitted examples with their values, in session order.
    pub fn changed_results(&self) -> impl Iterator<Item = (&E, &LabelValue)> {
        self.records
            .iter()
            .filter(|r| r.changed)
            .map(|r| (&r.example, &r.value))
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary {
            annotated: self.records.iter().filter(|r| r.changed).count(),
            total: self.records.len(),
            position: self.cursor,
            id: self
                .active_index()
                .and_then(|index| self.records[index].id.clone()),
        }
    }

    fn active_index(&self) -> Option<usize> {
        usize::try_from(self.cursor)
            .ok()
            .filter(|&index| index < self.records.len())
    }

    fn end(&self) -> isize {
        self.records.len() as isize
    }
}

impl<E: Clone> AnnotationSession<E> {
    /// The step for the current cursor, without moving.
    pub fn current(&self) -> Step<E> {
        match self.phase() {
            SessionPhase::NotStarted => Step::NotStarted,
            SessionPhase::InProgress(index) => Step::Show(self.intent_at(index)),
            SessionPhase::Complete => Step::Complete,
        }
    }

    /// Move to the next example, completing the session past the last one.
    ///
    /// With `stop_at_last_example` off, moving past the end steps back onto
    /// the last example instead.
    pub fn advance(&mut self) -> Result<Step<E>, CallbackError> {
        let end = self.end();
        if self.cursor < end {
            self.cursor += 1;
        }
        if self.cursor < end {
            debug!(position = self.cursor, "advanced");
            return Ok(self.current());
        }
        if !self.options.stop_at_last_example && end > 0 {
            self.cursor = end - 1;
            debug!(position = self.cursor, "reached the end; staying on the last example");
            return Ok(self.current());
        }
        self.complete()
    }

    /// Step back one example. A no-op at the first example or when going
    /// back is disabled; from a completed session it returns to the last
    /// example.
    pub fn retreat(&mut self) -> Step<E> {
        if self.options.allow_back && self.cursor > 0 {
            self.cursor = (self.cursor - 1).min(self.end() - 1);
            debug!(position = self.cursor, "retreated");
        }
        self.current()
    }

    /// Move on without touching the current record.
    pub fn skip(&mut self) -> Result<Step<E>, CallbackError> {
        if !self.options.allow_skip {
            return Ok(self.current());
        }
        self.advance()
    }

    /// Record `value` for the current example and move on.
    ///
    /// The record is written before the per-example callback runs. If the
    /// callback fails the value stays committed, the error is returned and
    /// the cursor does not move.
    pub fn submit(&mut self, value: LabelValue) -> Result<Step<E>> {
        let index = self.active_index().ok_or(ValidationError::NoActiveExample)?;
        let value = self.task.validate(value).inspect_err(|err| {
            tracing::warn!(position = index, %err, "submission rejected");
        })?;

        let record = &mut self.records[index];
        record.value = value.clone();
        record.changed = true;
        info!(position = index, value = %value, "label submitted");

        if !self.options.reset_multi_label_on_submit {
            if let LabelValue::Labels(labels) = &value {
                self.carried_toggles = Some(labels.clone());
            }
        }
        if let Some(hook) = self.on_example.as_mut() {
            hook(&self.records[index].example, &value)?;
        }
        Ok(self.advance()?)
    }

    fn complete(&mut self) -> Result<Step<E>, CallbackError> {
        if !self.completion_reported {
            self.completion_reported = true;
            info!(
                annotated = self.records.iter().filter(|r| r.changed).count(),
                total = self.records.len(),
                "annotation done"
            );
            if let Some(hook) = self.on_complete.as_mut() {
                hook(self.records.as_slice())?;
            }
        }
        Ok(Step::Complete)
    }

    fn intent_at(&self, index: usize) -> RenderIntent<E> {
        let record = &self.records[index];
        let last = self.records.len() - 1;
        let mut widget =
            WidgetState::new(&self.task, &record.value, self.carried_toggles.as_deref());
        if self.options.use_dropdown {
            widget = widget.into_dropdown();
        }
        RenderIntent {
            example: record.example.clone(),
            current_value: record.value.clone(),
            position: index,
            total: self.records.len(),
            changed: record.changed,
            id: record.id.clone(),
            widget,
            navigation: NavigationState {
                back: self.options.allow_back && index > 0,
                skip: self.options.allow_skip && index < last,
                submit: true,
            },
        }
    }
}
