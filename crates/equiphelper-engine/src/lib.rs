//! equiphelper-engine: Headless core for the equipHelper client
//!
//! This crate provides the domain logic for equipHelper, including:
//! - Message model and transcript state machine
//! - Durable transcript persistence
//! - The static equipment catalog
//! - Query dispatch to the Q&A endpoint
//! - Transcript formatting and document export

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod format;
pub mod message;
pub mod pdf;
pub mod store;
pub mod transcript;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use dispatch::{DispatchError, QueryDispatcher};
pub use export::{
    export_transcript, DocumentRenderer, ExportError, DOCUMENT_FILE_NAME, DOCUMENT_TITLE,
};
pub use format::{split_paragraphs, wrap_for_export};
pub use message::{welcome_message, Message, Sender, ASSISTANT_NAME, DISPATCH_FAILURE_REPLY};
pub use pdf::PdfRenderer;
pub use store::{StoreError, TranscriptStore};
pub use transcript::{SubmissionTicket, Transcript};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
