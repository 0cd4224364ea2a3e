pub mod client;
pub mod narrator;
pub mod prompt;

pub use client::*;
pub use narrator::*;
pub use prompt::*;

use thiserror::Error;

/// Failures while talking to the text-generation service.
///
/// All of these are fatal to the run: there is no retry and a failed
/// explanation aborts the remaining batch.
#[derive(Error, Debug)]
pub enum NarrateError {
    #[error("Cannot reach the chat service at {0}")]
    Connection(String),

    #[error("Chat service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),
}
