//! Infrastructure adapters. Implement outbound ports.
//!
//! Slack, spreadsheet sinks, view rendering, terminal UI. Map errors to DomainError.

pub mod render;
pub mod sheets;
pub mod slack;
pub mod ui;
