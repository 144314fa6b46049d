//! Unified error type for monogram.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating an avatar.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested output container is not supported.
    #[error("Unsupported format '{0}'. Valid: png, jpeg, webp")]
    UnsupportedFormat(String),

    /// A font file could not be used.
    #[error("Font unavailable at {}: {reason}", .path.display())]
    FontUnavailable {
        /// Path of the font that was tried.
        path: PathBuf,
        /// Why the font could not be used.
        reason: String,
    },

    /// The rasterizer failed while drawing.
    #[error("Render error: {0}")]
    Render(String),

    /// The rasterizer failed while encoding the canvas.
    #[error("Encode error: {0}")]
    Encode(String),
}
