//! Studio Shell - application shell library.
//!
//! Exposes the shell internals so tests can drive bootstrap, navigation,
//! and views without opening a window.

pub mod app;
pub mod inspector;
pub mod state;
pub mod views;
