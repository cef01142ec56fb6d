//! Library error type.
//!
//! Exclusion queries never fail: "no exclusion" is `None`. Errors only come
//! from loading shape images and from invalid layout parameters.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("failed to fetch shape image `{url}`: {source}")]
    ImageFetch {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode shape image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
