//! Native egui-based UI for the converter
//!
//! A single window: amount entry, two currency pickers, result, history and
//! a light/dark theme toggle.

mod app;
mod theme;
mod widgets;

pub use app::run;
