//! txguard TUI Library
//!
//! Terminal front end for the transaction history viewer: screens, the
//! PIN modal overlay and the glue between the draw loop and the async
//! auth gate.

pub mod app;
pub mod feedback;
pub mod ui;

pub use app::App;
