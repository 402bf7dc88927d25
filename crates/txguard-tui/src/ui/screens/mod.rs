//! Screen modules for different views

pub mod detail;
pub mod error;
pub mod history;
pub mod pin_entry;
