//! Error types

use thiserror::Error;

/// Failures of an image trace draw
///
/// None of these are fatal: a trace that fails renders nothing and the
///   next draw starts over.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load {source_ref}: {reason}")]
    Load { source_ref: String, reason: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid trace configuration: {0}")]
    Config(String),

    #[error("Invalid trace json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
