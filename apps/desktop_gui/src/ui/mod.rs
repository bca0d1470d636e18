//! UI layer for the desktop GUI: the single search screen.

pub mod app;

pub use app::JobSearchApp;
