use gif_resizer::constants::GIF_ENCODER_SPEED;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Encode a small animated GIF in memory.
pub fn create_gif_bytes(width: u32, height: u32, frame_count: usize, delay_ms: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, GIF_ENCODER_SPEED);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        for i in 0..frame_count {
            let shade = (i * 50 % 256) as u8;
            let buffer =
                RgbaImage::from_pixel(width, height, image::Rgba([shade, 100, 255 - shade, 255]));
            encoder
                .encode_frame(Frame::from_parts(
                    buffer,
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                ))
                .unwrap();
        }
    }
    bytes
}

/// Write a test GIF into `dir` and return its path.
pub fn create_test_gif(dir: &Path, name: &str, width: u32, height: u32, frames: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, create_gif_bytes(width, height, frames, 100)).unwrap();
    path
}

/// Write a file with a GIF extension but non-GIF contents.
pub fn create_fake_gif(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not actually a gif").unwrap();
    path
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
