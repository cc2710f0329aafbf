/// Maximum accepted upload/input size in megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 200;
pub const MAX_FILE_SIZE: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Valid range for any resolved target dimension, in pixels.
pub const MIN_IMAGE_SIZE: u32 = 10;
pub const MAX_IMAGE_SIZE: u32 = 2000;

/// Valid range for the percentage-scale strategy.
pub const MIN_SCALE_PERCENT: u32 = 10;
pub const MAX_SCALE_PERCENT: u32 = 200;
pub const DEFAULT_SCALE_PERCENT: u32 = 100;

/// Frame delay assumed when a frame carries none, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

// Chat-stamp constraints (Slack emoji rules)
pub const STAMP_SIZE: u32 = 128;
pub const STAMP_MAX_FRAMES: usize = 50;
pub const STAMP_MAX_SIZE_KB: u64 = 128;
pub const STAMP_MAX_SIZE_BYTES: u64 = STAMP_MAX_SIZE_KB * 1024;
/// Frame decimation stops once this few frames remain.
pub const STAMP_MIN_FRAMES: usize = 8;

/// Trade-off between encoding speed and palette quality (1-30).
pub const GIF_ENCODER_SPEED: i32 = 10;

pub const GIF_SIGNATURE_87A: &[u8; 6] = b"GIF87a";
pub const GIF_SIGNATURE_89A: &[u8; 6] = b"GIF89a";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8501;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
