//! Slack adapter. Channel history, channel info and profile lookups over the Web API.

pub mod client;
pub mod mapper;

pub use client::SlackGateway;
