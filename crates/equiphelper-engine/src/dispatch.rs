//! Query dispatch to the Q&A endpoint.
//!
//! Thin HTTP wrapper around one `POST {"question": ...}` call. Response
//! parsing is a pure function so the wire contract is testable without
//! a network. Every failure mode degrades to the fixed failure reply;
//! nothing here is surfaced as an error to the caller.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::message::DISPATCH_FAILURE_REPLY;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Error type for dispatch internals.
///
/// Never escapes [`QueryDispatcher::ask`]; kept public for the
/// lower-level [`QueryDispatcher::request_answer`] used by callers that
/// want the cause (e.g. CLI diagnostics).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed answer payload: {0}")]
    Parse(String),
}

#[derive(serde::Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

/// Submits questions to the external Q&A endpoint.
pub struct QueryDispatcher {
    http: reqwest::Client,
    endpoint: String,
}

impl QueryDispatcher {
    /// Build a dispatcher for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| DispatchError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint this dispatcher posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask a question and resolve to displayable answer text.
    ///
    /// On any failure (transport, status, malformed payload) the fixed
    /// failure reply is returned instead; the cause is logged.
    pub async fn ask(&self, question: &str) -> String {
        match self.request_answer(question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Dispatch failed");
                DISPATCH_FAILURE_REPLY.to_string()
            }
        }
    }

    /// Ask a question, surfacing the failure cause.
    pub async fn request_answer(&self, question: &str) -> Result<String, DispatchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(DispatchError::Status { status, body: text });
        }

        parse_answer(&text)
    }
}

/// Extract the answer string from a response body.
///
/// Rejects non-JSON bodies and payloads whose `answer` field is missing
/// or not a string; past this boundary the answer is always `String`.
fn parse_answer(body: &str) -> Result<String, DispatchError> {
    let parsed: AskResponse =
        serde_json::from_str(body).map_err(|e| DispatchError::Parse(e.to_string()))?;
    Ok(parsed.answer)
}
