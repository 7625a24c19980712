//! standup-sync: Slack standup ingestion with Hexagonal Architecture.
//!
//! Parses free-text standup messages into yesterday/today/blocker fields and
//! publishes them as a spreadsheet and rendered reports.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
