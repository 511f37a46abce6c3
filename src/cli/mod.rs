//! CLI command handlers

pub mod commands;

pub use commands::{append, color, column, read, sheet_id, sheets, InputItems};
