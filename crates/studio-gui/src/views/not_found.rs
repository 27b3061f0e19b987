//! Fallback screen for paths the route table does not know.

use egui::{RichText, Ui};

use crate::state::AppState;

/// Not-found view: shows the unmatched path and a way back home.
pub struct NotFoundView;

impl NotFoundView {
    pub fn show(ui: &mut Ui, state: &mut AppState, path: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.heading("Page not found");
            ui.add_space(8.0);
            ui.label(RichText::new(path).weak());
            ui.add_space(16.0);
            if ui.button("Go home").clicked() {
                state.go_home();
            }
        });
    }
}
