//! Studio Shell - application scaffold.
//!
//! Wires a state store, a path router, and a data-fetching cache together
//! and mounts a single welcome screen, natively or in the browser.

use studio_gui::app::StudioApp;
use studio_gui::state::EnvMode;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use eframe::egui;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let env = EnvMode::detect();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Studio Shell")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Studio Shell",
        options,
        Box::new(move |cc| Ok(Box::new(StudioApp::new(cc, env)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Route log output to the browser console.
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let env = EnvMode::detect();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        // The host page must provide the anchor canvas before the shell
        // can render anything; a missing anchor is fatal.
        let canvas = document
            .get_element_by_id("root")
            .expect("anchor element #root not found")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("#root is not a canvas element");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(StudioApp::new(cc, env)?))),
            )
            .await
            .expect("failed to start studio shell");
    });
}
