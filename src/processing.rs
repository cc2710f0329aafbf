use crate::constants::GIF_ENCODER_SPEED;
use crate::document::{GifDocument, LoopCount};
use crate::error::{ResizeError, Result};
use crate::options::{validate_file_size, validate_image_size, ResizeRequest};
use crate::utils::{create_progress_spinner, download_filename, is_gif_file, print_resize_summary};
use crate::{info, verbose, warn};
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{DynamicImage, Frame};
use std::fs;
use std::path::Path;

/// The engine's output: an encoded GIF plus the metadata the presentation
/// layer reports. Never persisted server-side.
#[derive(Debug, Clone)]
pub struct ResizeResult {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

impl ResizeResult {
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl LoopCount {
    fn to_repeat(self) -> Repeat {
        match self {
            LoopCount::Infinite => Repeat::Infinite,
            LoopCount::Finite(n) => Repeat::Finite(n),
        }
    }
}

/// Resample every frame of `doc` to exactly (width, height) and re-encode,
/// carrying each frame's original delay and the document's loop count.
///
/// The target size is validated again here so the engine stays safe even if
/// the options model was bypassed.
pub fn resize_document(doc: &GifDocument, width: u32, height: u32) -> Result<ResizeResult> {
    resize_frames(doc.frames(), doc.loop_count(), width, height)
}

/// Same as [`resize_document`] but keeps at most `max_frames` frames.
/// Used by the stamp optimizer.
pub fn resize_document_limited(
    doc: &GifDocument,
    width: u32,
    height: u32,
    max_frames: usize,
) -> Result<ResizeResult> {
    let frames = doc.frames();
    let kept = frames.len().min(max_frames);
    resize_frames(&frames[..kept], doc.loop_count(), width, height)
}

pub(crate) fn resize_frames(
    frames: &[Frame],
    loop_count: LoopCount,
    width: u32,
    height: u32,
) -> Result<ResizeResult> {
    validate_image_size(width, height)?;
    if frames.is_empty() {
        return Err(ResizeError::NoFrames);
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_ENCODER_SPEED);
        encoder.set_repeat(loop_count.to_repeat())?;

        for frame in frames {
            let delay = frame.delay();
            let resized = DynamicImage::ImageRgba8(frame.buffer().clone())
                .resize_exact(width, height, FilterType::Lanczos3)
                .into_rgba8();
            encoder.encode_frame(Frame::from_parts(resized, 0, 0, delay))?;
        }
    }

    Ok(ResizeResult {
        bytes,
        width,
        height,
        frame_count: frames.len(),
    })
}

/// Before/after figures reported alongside the output.
#[derive(Debug, Clone, Copy)]
pub struct SourceStats {
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    pub byte_size: u64,
}

impl SourceStats {
    pub fn from_document(doc: &GifDocument) -> Self {
        Self {
            width: doc.width(),
            height: doc.height(),
            frame_count: doc.frame_count(),
            byte_size: doc.source_size(),
        }
    }
}

/// Core pipeline shared by the web handler and the CLI:
/// bound input size -> decode -> resolve target -> resize.
///
/// # Arguments
/// * `bytes` - Raw uploaded/read GIF contents
/// * `request` - The validated option selections
///
/// # Returns
/// * `Ok((SourceStats, ResizeResult))` - Source figures and the encoded output
/// * `Err(ResizeError)` - Rejected input or a decode/encode failure
pub fn process_gif_pipeline(
    bytes: &[u8],
    request: &ResizeRequest,
) -> Result<(SourceStats, ResizeResult)> {
    validate_file_size(bytes.len() as u64)?;
    let doc = GifDocument::decode(bytes)?;
    let source = SourceStats::from_document(&doc);
    let (width, height) = request.resolve_target(doc.width(), doc.height())?;
    let result = resize_document(&doc, width, height)?;
    Ok((source, result))
}

/// Validates that a file exists at the given path.
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ResizeError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// CLI entry point: resize a GIF file on disk and print before/after stats.
pub fn resize_gif_file(input: &Path, output: &Path, request: &ResizeRequest) -> Result<()> {
    info!("🎞️  Resizing GIF: {:?}", input);
    info!("📁 Output: {:?}", output);

    validate_file_exists(input)?;
    if !is_gif_file(input) {
        warn!("Input extension is not .gif: {:?}", input);
    }

    let metadata = fs::metadata(input)?;
    validate_file_size(metadata.len())?;

    let pb = create_progress_spinner("Resizing GIF...");
    let bytes = fs::read(input)?;
    let (source, result) = process_gif_pipeline(&bytes, request)?;
    pb.finish_with_message("✅ Resize complete");

    info!(
        "📊 Original: {} bytes ({}x{}, {} frames)",
        source.byte_size, source.width, source.height, source.frame_count
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &result.bytes)?;

    info!(
        "📐 New size: {}x{} ({} frames)",
        result.width, result.height, result.frame_count
    );
    print_resize_summary(source.byte_size, result.byte_size());
    verbose!(
        "Suggested download name: {}",
        download_filename(
            input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "animation.gif".to_string())
                .as_str(),
            result.width,
            result.height
        )
    );

    Ok(())
}
