//! Core data models and traits

mod converter;
mod error;
mod history;
mod rate_source;
mod rate_table;
mod theme_mode;

pub use converter::*;
pub use error::*;
pub use history::*;
pub use rate_source::*;
pub use rate_table::*;
pub use theme_mode::*;
