//! Candidate-side capture flow: fetch the session, then walk the questions
//! with a reading countdown, a bounded recording and a retried upload.

pub mod client;
pub mod device;
pub mod driver;
pub mod machine;
pub mod upload;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("camera or microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("capture device error: {0}")]
    Device(String),

    #[error("upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("candidate left the flow")]
    Abandoned,
}

pub type CaptureResult<T> = std::result::Result<T, CaptureError>;
