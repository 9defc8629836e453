//! Navigation callbacks: `next` skips the example, `prev` goes back.

use annotate::Error;
use slint::ComponentHandle;

use crate::AppWindow;
use crate::window::{SharedSession, WindowRenderer, present};

/// Sets up all navigation-related callbacks on the UI.
pub fn setup_navigation_callbacks(
    ui: &AppWindow,
    session: SharedSession,
    renderer: WindowRenderer,
) {
    setup_skip(ui, session.clone(), renderer.clone());
    setup_back(ui, session, renderer);
}

fn setup_skip(ui: &AppWindow, session: SharedSession, renderer: WindowRenderer) {
    let ui_weak = ui.as_weak();
    ui.on_skip(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let outcome = session.borrow_mut().skip().map_err(Error::from);
        present(&ui, &renderer, &session, outcome);
    });
}

fn setup_back(ui: &AppWindow, session: SharedSession, renderer: WindowRenderer) {
    let ui_weak = ui.as_weak();
    ui.on_back(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let step = session.borrow_mut().retreat();
        present(&ui, &renderer, &session, Ok(step));
    });
}
