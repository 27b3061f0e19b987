//! Development-mode inspector.
//!
//! A floating window over the current store snapshot and query cache
//! contents. Attached only when the shell runs outside production mode.

use eframe::egui;
use studio_core::RouterContext;

pub struct Inspector;

impl Inspector {
    /// Show the inspector window while `open` is true; `open` is cleared
    /// when the user closes the window.
    pub fn show(ctx: &egui::Context, context: &RouterContext, open: &mut bool) {
        egui::Window::new("Inspector")
            .open(open)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.heading("Store");
                {
                    let store = context.store.borrow();
                    if store.state().is_empty() {
                        ui.weak("no slices registered");
                    } else {
                        match serde_json::to_string_pretty(store.state()) {
                            Ok(json) => {
                                ui.monospace(json);
                            }
                            Err(error) => {
                                ui.label(format!("state not serializable: {error}"));
                            }
                        }
                    }
                }

                ui.separator();
                ui.heading("Queries");
                let queries = context.queries.borrow();
                if queries.is_empty() {
                    ui.weak("no cached queries");
                } else {
                    for entry in queries.snapshot() {
                        ui.horizontal(|ui| {
                            ui.monospace(entry.key.to_string());
                            ui.weak(format!("age {}s", entry.age.as_secs()));
                            if entry.stale {
                                ui.colored_label(ui.visuals().warn_fg_color, "stale");
                            }
                        });
                    }
                }
            });
    }
}
