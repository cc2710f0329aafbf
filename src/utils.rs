/// Helper functions shared by the CLI and the web layer.
use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use crate::info;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Check whether a path looks like a GIF file by extension.
pub fn is_gif_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gif"))
        .unwrap_or(false)
}

/// Create a progress spinner with consistent styling.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(PROGRESS_SPINNER_TEMPLATE)
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Format a byte count in human-readable form (e.g. "1.2 MB", "512 KB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Byte-size change as a percentage; positive means the output grew.
pub fn calculate_size_change(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (new_size as f64 - original_size as f64) / original_size as f64 * 100.0
}

/// Download name reflecting the applied resize:
/// "cat.gif" at 64x64 becomes "cat_resized_64x64.gif".
pub fn download_filename(original_name: &str, width: u32, height: u32) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("animation");
    format!("{}_resized_{}x{}.gif", stem, width, height)
}

/// Print the before/after byte sizes and the change percentage.
pub fn print_resize_summary(original_size: u64, new_size: u64) {
    let change = calculate_size_change(original_size, new_size);

    info!(
        "📈 Output size: {} ({} bytes)",
        format_file_size(new_size),
        new_size
    );

    if change <= 0.0 {
        info!("✅ File size reduced by {:.1}%", change.abs());
    } else {
        info!("⚠️  File size increased by {:.1}%", change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gif_file() {
        assert!(is_gif_file(Path::new("test.gif")));
        assert!(is_gif_file(Path::new("test.GIF")));
        assert!(!is_gif_file(Path::new("test.png")));
        assert!(!is_gif_file(Path::new("test")));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_calculate_size_change() {
        assert_eq!(calculate_size_change(1000, 800), -20.0);
        assert_eq!(calculate_size_change(1000, 1200), 20.0);
        assert_eq!(calculate_size_change(1000, 1000), 0.0);
        assert_eq!(calculate_size_change(0, 500), 0.0);
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("cat.gif", 64, 64), "cat_resized_64x64.gif");
        assert_eq!(
            download_filename("my animation.gif", 480, 320),
            "my animation_resized_480x320.gif"
        );
        assert_eq!(download_filename("", 10, 10), "animation_resized_10x10.gif");
    }
}
