use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Not a GIF file: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    OversizedUpload(u64, u64),

    #[error("Invalid image dimensions: {0}x{1}. Each must be between {2} and {3} pixels")]
    InvalidDimension(u32, u32, u32, u32),

    #[error("Invalid scale percentage: {0}. Must be between {1} and {2}")]
    InvalidScale(u32, u32, u32),

    #[error("Invalid numeric value for {0}: \"{1}\"")]
    InvalidNumber(&'static str, String),

    #[error("Unknown preset size: {0}")]
    UnknownPreset(String),

    #[error("Unsupported resize strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("No frames found in GIF")]
    NoFrames,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Stamp size limit exceeded: {0} bytes, maximum allowed {1} bytes")]
    StampOversize(u64, u64),
}

pub type Result<T> = std::result::Result<T, ResizeError>;
