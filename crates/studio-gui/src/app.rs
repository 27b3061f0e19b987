//! Main application struct and `eframe::App` implementation.

use anyhow::Context as _;
use eframe::egui;
use studio_core::{
    CachePolicy, QueryCache, RouteId, Router, RouterContext, RouterError, StoreBuilder,
};

use crate::inspector::Inspector;
use crate::state::{AppState, EnvMode};
use crate::views::{HomeView, NotFoundView};

/// Action kinds exchanged with a persistence layer during rehydration.
/// None are dispatched yet; the store is configured to skip the
/// serializability check for them.
pub const PERSIST_ACTION_KINDS: [&str; 2] = ["persist/PERSIST", "persist/REHYDRATE"];

/// Main application struct.
pub struct StudioApp {
    state: AppState,
    env: EnvMode,
    router: Router,
}

impl StudioApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, env: EnvMode) -> anyhow::Result<Self> {
        Self::bootstrap(env)
    }

    /// Compose the scaffold in startup order: the query cache, then the
    /// store, then the router with both injected as its context.
    pub fn bootstrap(env: EnvMode) -> anyhow::Result<Self> {
        let queries = QueryCache::new(CachePolicy::default());
        let store = StoreBuilder::default()
            // Feature slices register here.
            .ignore_serializability(PERSIST_ACTION_KINDS)
            .build()
            .context("store construction")?;
        let router =
            Router::new(RouterContext::new(store, queries)).context("route table construction")?;

        tracing::info!(env = ?env, "studio shell bootstrapped");
        Ok(Self {
            state: AppState::default(),
            env,
            router,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn env(&self) -> EnvMode {
        self.env
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.env.is_development() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.toggle_value(&mut self.state.inspector_open, "Inspector");
                    ui.weak(self.state.location.as_str());
                });
            });
            Inspector::show(ctx, self.router.context(), &mut self.state.inspector_open);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.router.resolve(&self.state.location) {
                Ok(resolved) => match resolved.id {
                    RouteId::Home => HomeView::show(ui),
                },
                Err(RouterError::NotFound { path }) => {
                    NotFoundView::show(ui, &mut self.state, &path);
                }
                Err(error) => {
                    // Pattern errors were ruled out when the table compiled.
                    tracing::error!(%error, "route resolution failed");
                }
            }
        });
    }
}
