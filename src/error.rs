//! Error type shared by every loader operation.
//!
//! Nothing here is recovered locally: a failed read, parse or decode is
//! returned to the caller as one of these variants.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The file is missing or could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The frame sidecar is not valid JSON or has the wrong value types.
    #[error("malformed frame data in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// raylib refused to decode the image.
    #[error("cannot decode image {}: {reason}", path.display())]
    Image { path: PathBuf, reason: String },

    /// A frame entry does not hold exactly four numbers.
    #[error("frame {index} of \"{key}\" has {len} values, expected 4 (x, y, w, h)")]
    FrameArity {
        key: String,
        index: usize,
        len: usize,
    },

    #[error("path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AssetError>;
