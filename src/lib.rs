pub mod chart;
pub mod config;
pub mod errors;
pub mod expenses;
pub mod format;
pub mod receipt;
pub mod store;
pub mod tui;
