//! Rendering surface. Turns tables and summaries into Markdown views.

pub mod markdown;

pub use markdown::MarkdownRenderer;
