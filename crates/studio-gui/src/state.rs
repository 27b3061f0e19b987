//! Shell-local state: execution environment and current location.

/// Execution environment, read from the `STUDIO_ENV` variable.
///
/// Development mode attaches the inspector; production mode does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
}

impl EnvMode {
    /// Read the mode from the process environment.
    pub fn detect() -> Self {
        Self::from_value(std::env::var("STUDIO_ENV").ok().as_deref())
    }

    /// Only the exact value `production` disables development tooling.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Navigation and UI state owned by the shell.
pub struct AppState {
    /// Current location, resolved against the route table every frame.
    pub location: String,
    /// Whether the inspector window is open (development mode only).
    pub inspector_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            location: "/".to_string(),
            inspector_open: false,
        }
    }
}

impl AppState {
    /// Point the shell at a new location.
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.location = path.into();
        tracing::debug!(path = %self.location, "navigate");
    }

    /// Navigate to the root path.
    pub fn go_home(&mut self) {
        self.navigate("/");
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, EnvMode};

    #[test]
    fn only_the_exact_production_value_is_production() {
        assert_eq!(EnvMode::from_value(Some("production")), EnvMode::Production);
        assert_eq!(EnvMode::from_value(Some("Production")), EnvMode::Development);
        assert_eq!(EnvMode::from_value(Some("prod")), EnvMode::Development);
        assert_eq!(EnvMode::from_value(Some("")), EnvMode::Development);
        assert_eq!(EnvMode::from_value(None), EnvMode::Development);
    }

    #[test]
    fn state_starts_at_the_root_with_the_inspector_closed() {
        let state = AppState::default();
        assert_eq!(state.location, "/");
        assert!(!state.inspector_open);
    }

    #[test]
    fn navigation_updates_the_location() {
        let mut state = AppState::default();
        state.navigate("/missing");
        assert_eq!(state.location, "/missing");
        state.go_home();
        assert_eq!(state.location, "/");
    }
}
