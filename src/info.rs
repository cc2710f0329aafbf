use crate::document::{GifDocument, LoopCount};
use crate::error::{ResizeError, Result};
use crate::presets::PresetSize;
use crate::utils::format_file_size;
use std::fs;
use std::path::Path;

/// Print the summary the web form shows for an uploaded GIF.
pub fn print_gif_info(input_path: &Path) -> Result<()> {
    if !input_path.exists() {
        return Err(ResizeError::FileNotFound(input_path.to_path_buf()));
    }

    println!("📊 Analyzing GIF: {:?}", input_path);

    let bytes = fs::read(input_path)?;
    crate::options::validate_file_size(bytes.len() as u64)?;
    let doc = GifDocument::decode(&bytes)?;

    println!("📋 Basic Information:");
    println!("  📁 File: {:?}", input_path);
    println!("  📏 Dimensions: {}x{} pixels", doc.width(), doc.height());
    println!("  🎞️  Frames: {}", doc.frame_count());
    println!(
        "  📦 File size: {} ({} bytes)",
        format_file_size(doc.source_size()),
        doc.source_size()
    );
    println!("  ⏱️  Frame delay: {} ms", doc.first_frame_delay_ms());
    match doc.loop_count() {
        LoopCount::Infinite => println!("  🔁 Loop: infinite"),
        LoopCount::Finite(n) => println!("  🔁 Loop: {} times", n),
    }

    let aspect_ratio = f64::from(doc.width()) / f64::from(doc.height().max(1));
    println!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);

    println!("\n💡 Resize Suggestions:");
    if doc.width() > 512 || doc.height() > 512 {
        println!("  🎯 Large canvas: a preset ({}) keeps chat uploads small", PresetSize::Square512);
    }
    if doc.width() != doc.height() {
        println!("  📏 Non-square: enable keep-aspect-ratio to avoid distortion with presets");
    }
    if doc.frame_count() > 50 {
        println!("  🎭 {} frames: the lightweight stamp level will decimate to fit chat limits", doc.frame_count());
    }

    Ok(())
}

/// Detailed per-frame analysis, the deeper cut of the `info` subcommand.
pub fn print_detailed_info(input_path: &Path) -> Result<()> {
    let bytes = fs::read(input_path)?;
    let doc = GifDocument::decode(&bytes)?;

    println!("\n🔍 Detailed GIF Analysis:");
    for _ in 0..60 {
        print!("═");
    }
    println!();

    let delays = doc.frame_delays_ms();
    let min_delay = delays.iter().min().copied().unwrap_or(0);
    let max_delay = delays.iter().max().copied().unwrap_or(0);

    println!("🎨 Animation Properties:");
    println!("  Frames: {}", doc.frame_count());
    println!("  Frame delay: {}-{} ms", min_delay, max_delay);
    println!(
        "  Single loop duration: {:.2} s",
        doc.total_duration_ms() as f64 / 1000.0
    );

    let total_pixels = u64::from(doc.width()) * u64::from(doc.height());
    let megapixels = total_pixels as f64 / 1_000_000.0;

    println!("\n📊 Calculated Metrics:");
    println!("  Canvas pixels: {}", total_pixels);
    println!("  Megapixels per frame: {:.2} MP", megapixels);
    println!(
        "  Estimated decoded memory: {:.2} MB",
        estimate_memory_usage(&doc)
    );

    for _ in 0..60 {
        print!("═");
    }
    println!();

    Ok(())
}

/// Decoded frames are RGBA, 4 bytes per pixel per frame.
fn estimate_memory_usage(doc: &GifDocument) -> f64 {
    let per_frame = u64::from(doc.width()) * u64::from(doc.height()) * 4;
    let total = per_frame * doc.frame_count() as u64;
    total as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_missing_file() {
        let result = print_gif_info(Path::new("nonexistent.gif"));
        assert!(matches!(result, Err(ResizeError::FileNotFound(_))));
    }
}
