//! UI layer for the analyser GUI: app shell and panels.

pub mod app;

pub use app::AnalyserApp;
