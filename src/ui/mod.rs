//! User Interface module
//!
//! Terminal UI using ratatui with adaptive layouts.

pub mod app;

pub use app::App;
