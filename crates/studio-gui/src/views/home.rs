//! Welcome screen, the view behind the root route.

use egui::{RichText, Ui};

/// Heading shown on the welcome screen.
pub const WELCOME_TITLE: &str = "Welcome to Studio Shell";

/// Subtitle naming the stack the shell is built on.
pub const WELCOME_TAGLINE: &str = "Built with Rust, eframe, and egui";

/// Home screen view. Stateless; renders static descriptive text.
pub struct HomeView;

impl HomeView {
    pub fn show(ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.heading(RichText::new(WELCOME_TITLE).size(32.0));
            ui.add_space(8.0);
            ui.label(RichText::new(WELCOME_TAGLINE).weak());
        });
    }
}
