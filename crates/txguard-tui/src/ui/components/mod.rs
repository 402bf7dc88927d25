//! Reusable UI components

pub mod amount;
