//! View components: one per registered route, plus the not-found fallback.

mod home;
mod not_found;

pub use home::{HomeView, WELCOME_TAGLINE, WELCOME_TITLE};
pub use not_found::NotFoundView;
