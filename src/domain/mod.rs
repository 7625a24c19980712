//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here: duration parsing, section
//! extraction, cell normalization and report aggregation. Dependencies flow
//! inward.

pub mod duration;
pub mod entities;
pub mod errors;
pub mod extract;
pub mod normalize;
pub mod report;

pub use entities::{
    ChannelHistory, Column, DurationToken, EnrichedMessage, ExportSummary, MemberMessage,
    MemberReport, Message, PmoReport, Profile, ReportTable, StandupReport, TimeUnit, UserSummary,
};
pub use errors::DomainError;
