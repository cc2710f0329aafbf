/// Chat-stamp output: 128x128 GIFs conforming to Slack's emoji rules
/// (at most 50 frames, at most 128 KB for the lightweight level).
use crate::constants::{
    STAMP_MAX_FRAMES, STAMP_MAX_SIZE_BYTES, STAMP_MIN_FRAMES, STAMP_SIZE,
};
use crate::document::GifDocument;
use crate::error::{ResizeError, Result};
use crate::info;
use crate::processing::{
    resize_document, resize_document_limited, validate_file_exists, ResizeResult,
};
use crate::utils::{create_progress_spinner, format_file_size, print_resize_summary};
use image::{Delay, Frame};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How aggressively the stamp is squeezed under the Slack limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampOptimization {
    /// Plain 128x128 resize.
    Standard,
    /// 128x128, truncated to the first 50 frames.
    Optimized,
    /// 128x128, ≤50 frames, decimated until the output fits in 128 KB.
    Lightweight,
}

impl StampOptimization {
    pub fn all() -> [StampOptimization; 3] {
        [
            StampOptimization::Standard,
            StampOptimization::Optimized,
            StampOptimization::Lightweight,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StampOptimization::Standard => "standard",
            StampOptimization::Optimized => "optimized",
            StampOptimization::Lightweight => "lightweight",
        }
    }
}

impl fmt::Display for StampOptimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StampOptimization {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(StampOptimization::Standard),
            "optimized" => Ok(StampOptimization::Optimized),
            "lightweight" => Ok(StampOptimization::Lightweight),
            _ => Err(ResizeError::UnsupportedStrategy(format!(
                "unknown stamp optimization level: {}",
                s
            ))),
        }
    }
}

/// Produce a 128x128 stamp GIF at the requested optimization level.
///
/// The lightweight level keeps halving the frame count (folding the dropped
/// frames' delays into the survivors, so one playback loop keeps its
/// duration) until the encoded output fits the 128 KB ceiling. Below 8
/// frames we give up and report the size that could not be met.
pub fn create_stamp(doc: &GifDocument, level: StampOptimization) -> Result<ResizeResult> {
    match level {
        StampOptimization::Standard => resize_document(doc, STAMP_SIZE, STAMP_SIZE),
        StampOptimization::Optimized => {
            resize_document_limited(doc, STAMP_SIZE, STAMP_SIZE, STAMP_MAX_FRAMES)
        }
        StampOptimization::Lightweight => {
            let mut result =
                resize_document_limited(doc, STAMP_SIZE, STAMP_SIZE, STAMP_MAX_FRAMES)?;

            while result.byte_size() > STAMP_MAX_SIZE_BYTES {
                let decimated = GifDocument::decode(&result.bytes)?;
                if decimated.frame_count() / 2 < STAMP_MIN_FRAMES {
                    return Err(ResizeError::StampOversize(
                        result.byte_size(),
                        STAMP_MAX_SIZE_BYTES,
                    ));
                }
                let frames = decimate_frames(decimated.frames(), 2);
                result = crate::processing::resize_frames(
                    &frames,
                    decimated.loop_count(),
                    STAMP_SIZE,
                    STAMP_SIZE,
                )?;
            }

            Ok(result)
        }
    }
}

/// Keep every `stride`-th frame, folding the delays of the dropped frames
/// into the kept one so total playback duration is unchanged.
pub fn decimate_frames(frames: &[Frame], stride: usize) -> Vec<Frame> {
    frames
        .chunks(stride.max(1))
        .map(|chunk| {
            let total_ms: u32 = chunk
                .iter()
                .map(|f| {
                    let (numer, denom) = f.delay().numer_denom_ms();
                    if denom == 0 {
                        0
                    } else {
                        (f64::from(numer) / f64::from(denom)).round() as u32
                    }
                })
                .sum();
            let first = &chunk[0];
            Frame::from_parts(
                first.buffer().clone(),
                first.left(),
                first.top(),
                Delay::from_numer_denom_ms(total_ms, 1),
            )
        })
        .collect()
}

/// CLI entry point: read a GIF, build the stamp, write it out.
pub fn create_stamp_file(input: &Path, output: &Path, level: StampOptimization) -> Result<()> {
    info!("🎯 Creating {} stamp from {:?}", level, input);

    validate_file_exists(input)?;
    let bytes = fs::read(input)?;
    crate::options::validate_file_size(bytes.len() as u64)?;

    let pb = create_progress_spinner("Optimizing stamp...");
    let doc = GifDocument::decode(&bytes)?;
    let result = create_stamp(&doc, level)?;
    pb.finish_with_message("✅ Stamp ready");

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &result.bytes)?;

    info!(
        "📐 Stamp: {}x{}, {} frames, {}",
        result.width,
        result.height,
        result.frame_count,
        format_file_size(result.byte_size())
    );
    print_resize_summary(bytes.len() as u64, result.byte_size());

    Ok(())
}
