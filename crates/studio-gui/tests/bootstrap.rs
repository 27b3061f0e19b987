//! Bootstrap and view behavior, driven without opening a window.

use studio_core::{Action, RouteId, RouterError};
use studio_gui::app::{PERSIST_ACTION_KINDS, StudioApp};
use studio_gui::state::{AppState, EnvMode};
use studio_gui::views::{HomeView, NotFoundView, WELCOME_TAGLINE, WELCOME_TITLE};

#[test]
fn bootstrap_resolves_the_initial_location_to_home() {
    let app = StudioApp::bootstrap(EnvMode::Development).unwrap();

    let resolved = app.router().resolve(&app.state().location).unwrap();
    assert_eq!(resolved.id, RouteId::Home);
    assert!(resolved.params.is_empty());
}

#[test]
fn bootstrap_starts_with_an_empty_store_and_cache() {
    let app = StudioApp::bootstrap(EnvMode::Production).unwrap();
    let context = app.router().context();

    assert!(context.store.borrow().state().is_empty());
    assert!(context.queries.borrow().is_empty());
}

#[test]
fn bootstrap_cache_uses_the_five_and_ten_minute_policy() {
    let app = StudioApp::bootstrap(EnvMode::Development).unwrap();
    let policy = app.router().context().queries.borrow().policy();

    assert_eq!(policy.stale_after.as_secs(), 5 * 60);
    assert_eq!(policy.evict_after.as_secs(), 10 * 60);
}

#[test]
fn dispatch_before_any_slice_is_a_shape_no_op() {
    let app = StudioApp::bootstrap(EnvMode::Development).unwrap();
    let context = app.router().context();

    context.store.borrow_mut().dispatch(Action::new("anything"));
    for kind in PERSIST_ACTION_KINDS {
        context
            .store
            .borrow_mut()
            .dispatch(Action::opaque(kind, Box::new(())));
    }

    assert!(context.store.borrow().state().is_empty());
}

#[test]
fn navigating_anywhere_else_is_a_defined_not_found() {
    let app = StudioApp::bootstrap(EnvMode::Development).unwrap();

    let err = app.router().resolve("/reports").unwrap_err();
    assert!(matches!(err, RouterError::NotFound { path } if path == "/reports"));
}

#[test]
fn home_view_renders_the_welcome_text_without_panicking() {
    assert!(WELCOME_TITLE.contains("Welcome"));
    assert!(!WELCOME_TAGLINE.is_empty());

    let ctx = egui::Context::default();
    let _ = ctx.run(Default::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| HomeView::show(ui));
    });
}

#[test]
fn not_found_view_renders_the_unmatched_path() {
    let mut state = AppState::default();
    state.navigate("/missing");

    let ctx = egui::Context::default();
    let _ = ctx.run(Default::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            NotFoundView::show(ui, &mut state, "/missing");
        });
    });

    // No click happened, so the location is unchanged.
    assert_eq!(state.location, "/missing");
}
