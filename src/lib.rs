pub mod cli;
pub mod constants;
pub mod document;
pub mod error;
pub mod info;
pub mod logger;
pub mod options;
pub mod presets;
pub mod processing;
pub mod server;
pub mod stamp;
pub mod utils;

pub use document::{GifDocument, LoopCount};
pub use error::{ResizeError, Result};
pub use options::{ResizeRequest, ResizeStrategy};
pub use presets::PresetSize;
pub use processing::{
    process_gif_pipeline, resize_document, resize_gif_file, ResizeResult, SourceStats,
};
pub use server::{serve, ServerConfig};
pub use stamp::{create_stamp, create_stamp_file, StampOptimization};
