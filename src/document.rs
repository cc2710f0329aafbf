use crate::constants::{DEFAULT_FRAME_DELAY_MS, GIF_SIGNATURE_87A, GIF_SIGNATURE_89A};
use crate::error::{ResizeError, Result};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Frame, ImageDecoder};
use std::io::Cursor;

/// Loop behavior carried by the Netscape application extension.
///
/// A GIF without the extension (or with a stored count of 0) is treated as
/// infinite, which is what the original always re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Finite(u16),
}

/// A decoded GIF: composited RGBA frames with their delays, the global
/// canvas dimensions, and the loop count. Owned for the duration of one
/// request and dropped once the output buffer exists.
pub struct GifDocument {
    frames: Vec<Frame>,
    width: u32,
    height: u32,
    loop_count: LoopCount,
    source_size: u64,
}

impl GifDocument {
    /// Decode a GIF byte stream into a frame sequence.
    ///
    /// # Arguments
    /// * `bytes` - The raw GIF file contents
    ///
    /// # Returns
    /// * `Ok(GifDocument)` with at least one frame
    /// * `Err(ResizeError::UnsupportedFormat)` if the signature is not GIF
    /// * `Err(ResizeError::ImageProcessing)` if the stream is corrupt
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        validate_gif_signature(bytes)?;

        let decoder = GifDecoder::new(Cursor::new(bytes))?;
        let (width, height) = decoder.dimensions();
        let frames = decoder.into_frames().collect_frames()?;

        if frames.is_empty() {
            return Err(ResizeError::NoFrames);
        }

        let loop_count = read_loop_count(bytes);

        Ok(Self {
            frames,
            width,
            height,
            loop_count,
            source_size: bytes.len() as u64,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Size of the encoded source, in bytes.
    pub fn source_size(&self) -> u64 {
        self.source_size
    }

    /// Per-frame display delays in milliseconds, rounded.
    pub fn frame_delays_ms(&self) -> Vec<u32> {
        self.frames.iter().map(|f| delay_ms(f)).collect()
    }

    /// Delay of the first frame, the figure the original app reported.
    pub fn first_frame_delay_ms(&self) -> u32 {
        self.frames.first().map(delay_ms).unwrap_or(DEFAULT_FRAME_DELAY_MS)
    }

    /// Total animation duration for a single loop, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(delay_ms(f))).sum()
    }
}

fn delay_ms(frame: &Frame) -> u32 {
    let (numer, denom) = frame.delay().numer_denom_ms();
    if denom == 0 {
        return DEFAULT_FRAME_DELAY_MS;
    }
    (f64::from(numer) / f64::from(denom)).round() as u32
}

/// Check the GIF87a/GIF89a magic so non-GIF uploads are rejected before any
/// decode work or partial output.
pub fn validate_gif_signature(bytes: &[u8]) -> Result<()> {
    if bytes.len() >= 6 && (&bytes[..6] == GIF_SIGNATURE_87A || &bytes[..6] == GIF_SIGNATURE_89A) {
        return Ok(());
    }
    Err(ResizeError::UnsupportedFormat(
        "missing GIF87a/GIF89a signature".to_string(),
    ))
}

/// Read the Netscape loop count with the gif crate. The extension block
/// precedes the first image descriptor, so one frame read is enough to
/// surface it.
fn read_loop_count(bytes: &[u8]) -> LoopCount {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    options.allow_unknown_blocks(true);

    let mut decoder = match options.read_info(Cursor::new(bytes)) {
        Ok(decoder) => decoder,
        Err(_) => return LoopCount::Infinite,
    };
    let _ = decoder.read_next_frame();

    match decoder.repeat() {
        gif::Repeat::Infinite => LoopCount::Infinite,
        gif::Repeat::Finite(0) => LoopCount::Infinite,
        gif::Repeat::Finite(n) => LoopCount::Finite(n),
    }
}
