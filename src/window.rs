//! Slint front end: draws session steps into the [`AppWindow`].

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use slint::{ComponentHandle, ModelRc, SharedString, VecModel};

use annotate::decorate::{self, DisplayOptions};
use annotate::{
    AnnotationSession, Error, Example, ProgressSummary, Renderer, SessionPhase, Step, WidgetState,
};

use crate::callbacks;
use crate::{AppWindow, OptionButton};

pub type SharedSession = Rc<RefCell<AnnotationSession<Example>>>;

// Matches the `task-kind` values in appwindow.slint.
const KIND_BUTTONS: i32 = 0;
const KIND_TOGGLES: i32 = 1;
const KIND_SLIDER: i32 = 2;
const KIND_TEXT: i32 = 3;
pub const KIND_DROPDOWN: i32 = 4;

#[derive(Clone)]
pub struct WindowRenderer {
    ui: slint::Weak<AppWindow>,
    display: DisplayOptions,
}

impl Renderer<Example> for WindowRenderer {
    type Error = Infallible;

    fn render(
        &mut self,
        step: &Step<Example>,
        progress: &ProgressSummary,
    ) -> Result<(), Infallible> {
        let Some(ui) = self.ui.upgrade() else {
            return Ok(());
        };
        ui.set_progress_text(progress.to_string().into());
        match step {
            Step::NotStarted => {}
            Step::Complete => {
                ui.set_done(true);
                ui.set_back_enabled(false);
                ui.set_skip_enabled(false);
                ui.set_example_text("Annotation done.".into());
            }
            Step::Show(intent) => {
                let segments = decorate::decorate(&intent.example.text(), &self.display);
                ui.set_done(false);
                ui.set_example_text(decorate::to_plain(&segments).into());
                ui.set_back_enabled(intent.navigation.back);
                ui.set_skip_enabled(intent.navigation.skip);
                show_widget(&ui, &intent.widget);
            }
        }
        Ok(())
    }
}

fn show_widget(ui: &AppWindow, widget: &WidgetState) {
    match widget {
        WidgetState::Buttons { options, selected } => {
            ui.set_task_kind(KIND_BUTTONS);
            set_options(
                ui,
                options
                    .iter()
                    .map(|label| (label.as_str(), selected.as_ref() == Some(label))),
            );
        }
        WidgetState::Dropdown { options, .. } => {
            ui.set_task_kind(KIND_DROPDOWN);
            let labels: Vec<SharedString> = options.iter().map(|o| o.as_str().into()).collect();
            ui.set_option_labels(ModelRc::new(VecModel::from(labels)));
            let index = widget.selected_index().unwrap_or(0);
            ui.set_dropdown_index(i32::try_from(index).unwrap_or(0));
        }
        WidgetState::Toggles(toggles) => {
            ui.set_task_kind(KIND_TOGGLES);
            set_options(ui, toggles.iter().map(|t| (t.label.as_str(), t.on)));
        }
        WidgetState::Slider { range, value } => {
            ui.set_task_kind(KIND_SLIDER);
            ui.set_slider_minimum(range.min as f32);
            ui.set_slider_maximum(range.max as f32);
            ui.set_slider_value(*value as f32);
        }
        WidgetState::TextArea { text } => {
            ui.set_task_kind(KIND_TEXT);
            ui.set_caption_text(text.as_str().into());
        }
    }
}

fn set_options<'a>(ui: &AppWindow, options: impl Iterator<Item = (&'a str, bool)>) {
    let buttons: Vec<OptionButton> = options
        .map(|(label, selected)| OptionButton {
            label: label.into(),
            selected,
        })
        .collect();
    ui.set_options(ModelRc::new(VecModel::from(buttons)));
}

/// Draw the outcome of a session operation, or report why it failed.
pub fn present(
    ui: &AppWindow,
    renderer: &WindowRenderer,
    session: &SharedSession,
    outcome: Result<Step<Example>, Error>,
) {
    match outcome {
        Ok(step) => {
            let progress = session.borrow().progress_summary();
            ui.set_status_text("".into());
            renderer
                .clone()
                .render(&step, &progress)
                .unwrap_or_else(|never| match never {});
        }
        Err(Error::Validation(err)) => {
            ui.set_status_text(format!("rejected: {err}").into());
        }
        Err(err) => {
            tracing::error!(%err, "annotation step failed");
            ui.set_status_text(err.to_string().into());
        }
    }
}

/// Open the window on `session` and block until it is closed.
pub fn run(session: SharedSession, display: DisplayOptions) -> Result<(), slint::PlatformError> {
    let ui = AppWindow::new()?;
    let renderer = WindowRenderer {
        ui: ui.as_weak(),
        display,
    };

    callbacks::navigation::setup_navigation_callbacks(&ui, session.clone(), renderer.clone());
    callbacks::labeling::setup_labeling_callbacks(&ui, session.clone(), renderer.clone());

    let first = {
        let mut s = session.borrow_mut();
        match s.phase() {
            SessionPhase::NotStarted => s.advance().map_err(Error::from),
            _ => Ok(s.current()),
        }
    };
    present(&ui, &renderer, &session, first);

    ui.run()
}
