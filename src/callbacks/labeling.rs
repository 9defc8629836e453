//! Labeling callbacks.
//!
//! Single-label buttons submit on click. Toggles only flip their button and
//! the drop-down list, slider and text area keep their own state; those are
//! sent with `submit`.

use annotate::{LabelValue, TaskSpec};
use slint::{ComponentHandle, Model};

use crate::AppWindow;
use crate::window::{KIND_DROPDOWN, SharedSession, WindowRenderer, present};

pub fn setup_labeling_callbacks(ui: &AppWindow, session: SharedSession, renderer: WindowRenderer) {
    setup_choose(ui, session.clone(), renderer.clone());
    setup_toggle(ui);
    setup_submit(ui, session, renderer);
}

fn setup_choose(ui: &AppWindow, session: SharedSession, renderer: WindowRenderer) {
    let ui_weak = ui.as_weak();
    ui.on_choose(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let Some(option) = usize::try_from(index)
            .ok()
            .and_then(|i| ui.get_options().row_data(i))
        else {
            return;
        };
        let outcome = session
            .borrow_mut()
            .submit(LabelValue::Label(option.label.to_string()));
        present(&ui, &renderer, &session, outcome);
    });
}

fn setup_toggle(ui: &AppWindow) {
    let ui_weak = ui.as_weak();
    ui.on_toggle(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let Ok(index) = usize::try_from(index) else { return };
        let options = ui.get_options();
        if let Some(mut option) = options.row_data(index) {
            option.selected = !option.selected;
            options.set_row_data(index, option);
        }
    });
}

fn setup_submit(ui: &AppWindow, session: SharedSession, renderer: WindowRenderer) {
    let ui_weak = ui.as_weak();
    ui.on_submit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let value = match session.borrow().task() {
            TaskSpec::SingleLabel(labels) if ui.get_task_kind() == KIND_DROPDOWN => {
                let chosen = usize::try_from(ui.get_dropdown_index())
                    .ok()
                    .and_then(|i| labels.get(i));
                let Some(label) = chosen else { return };
                LabelValue::Label(label.clone())
            }
            TaskSpec::SingleLabel(_) => return,
            TaskSpec::MultiLabel(_) => LabelValue::Labels(
                ui.get_options()
                    .iter()
                    .filter(|o| o.selected)
                    .map(|o| o.label.to_string())
                    .collect(),
            ),
            TaskSpec::Regression(range) => {
                LabelValue::Number(range.snap(f64::from(ui.get_slider_value())))
            }
            TaskSpec::FreeText => LabelValue::Text(ui.get_caption_text().to_string()),
        };
        let outcome = session.borrow_mut().submit(value);
        present(&ui, &renderer, &session, outcome);
    });
}
