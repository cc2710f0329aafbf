use crate::constants::{
    MAX_FILE_SIZE, MAX_IMAGE_SIZE, MAX_SCALE_PERCENT, MIN_IMAGE_SIZE, MIN_SCALE_PERCENT,
};
use crate::error::{ResizeError, Result};
use crate::presets::PresetSize;

/// How the target size is derived from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStrategy {
    /// Explicit width and height in pixels.
    Custom { width: u32, height: u32 },
    /// Percentage of the original dimensions.
    Scale { percent: u32 },
    /// One of the fixed preset resolutions.
    Preset(PresetSize),
}

impl ResizeStrategy {
    /// Build a strategy from the loose CLI flags.
    ///
    /// Exactly one of `--width`/`--height`, `--scale`, or `--preset` must be
    /// given; anything else is rejected rather than guessed at.
    pub fn from_cli_args(
        width: Option<u32>,
        height: Option<u32>,
        scale: Option<u32>,
        preset: Option<&str>,
    ) -> Result<Self> {
        match (width, height, scale, preset) {
            (Some(width), Some(height), None, None) => Ok(ResizeStrategy::Custom { width, height }),
            (None, None, Some(percent), None) => Ok(ResizeStrategy::Scale { percent }),
            (None, None, None, Some(name)) => Ok(ResizeStrategy::Preset(name.parse()?)),
            (Some(_), None, None, None) | (None, Some(_), None, None) => {
                Err(ResizeError::UnsupportedStrategy(
                    "custom size needs both --width and --height".to_string(),
                ))
            }
            (None, None, None, None) => Err(ResizeError::UnsupportedStrategy(
                "specify a target: --width/--height, --scale, or --preset".to_string(),
            )),
            _ => Err(ResizeError::UnsupportedStrategy(
                "--width/--height, --scale, and --preset are mutually exclusive".to_string(),
            )),
        }
    }
}

/// One validated user submission. Immutable once built; resolving it
/// against the source dimensions is a pure function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    pub strategy: ResizeStrategy,
    pub keep_aspect_ratio: bool,
}

impl ResizeRequest {
    pub fn new(strategy: ResizeStrategy, keep_aspect_ratio: bool) -> Self {
        Self {
            strategy,
            keep_aspect_ratio,
        }
    }

    /// Resolve the strategy into a validated (width, height) pair.
    ///
    /// # Arguments
    /// * `original_width` / `original_height` - dimensions of the decoded GIF
    ///
    /// # Returns
    /// * `Ok((width, height))` - both guaranteed within [10, 2000]
    /// * `Err(ResizeError)` - if the strategy resolves outside the bounds
    pub fn resolve_target(&self, original_width: u32, original_height: u32) -> Result<(u32, u32)> {
        let (width, height) = match self.strategy {
            ResizeStrategy::Custom { width, height } => {
                validate_image_size(width, height)?;
                (width, height)
            }
            ResizeStrategy::Scale { percent } => {
                validate_scale_percent(percent)?;
                let width = scale_dimension(original_width, percent);
                let height = scale_dimension(original_height, percent);
                validate_image_size(width, height)?;
                (width, height)
            }
            ResizeStrategy::Preset(preset) => preset.dimensions(),
        };

        if self.keep_aspect_ratio {
            Ok(fit_to_aspect_ratio(
                width,
                height,
                original_width,
                original_height,
            ))
        } else {
            Ok((width, height))
        }
    }
}

/// Validate a resolved target size against the [10, 2000] pixel bounds.
pub fn validate_image_size(width: u32, height: u32) -> Result<()> {
    if width < MIN_IMAGE_SIZE
        || height < MIN_IMAGE_SIZE
        || width > MAX_IMAGE_SIZE
        || height > MAX_IMAGE_SIZE
    {
        return Err(ResizeError::InvalidDimension(
            width,
            height,
            MIN_IMAGE_SIZE,
            MAX_IMAGE_SIZE,
        ));
    }
    Ok(())
}

/// Validate a scale percentage against the [10, 200] bounds.
pub fn validate_scale_percent(percent: u32) -> Result<()> {
    if !(MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&percent) {
        return Err(ResizeError::InvalidScale(
            percent,
            MIN_SCALE_PERCENT,
            MAX_SCALE_PERCENT,
        ));
    }
    Ok(())
}

/// Reject inputs above the upload ceiling before any decode work happens.
pub fn validate_file_size(len: u64) -> Result<()> {
    if len > MAX_FILE_SIZE {
        return Err(ResizeError::OversizedUpload(len, MAX_FILE_SIZE));
    }
    Ok(())
}

fn scale_dimension(dimension: u32, percent: u32) -> u32 {
    (f64::from(dimension) * f64::from(percent) / 100.0).round() as u32
}

/// Fit the original aspect ratio into the target box.
///
/// The driving dimension is the one with the smaller scale factor; both
/// output dimensions are the originals times that factor, rounded to the
/// nearest integer and re-clamped to the pixel bounds.
pub fn fit_to_aspect_ratio(
    target_width: u32,
    target_height: u32,
    original_width: u32,
    original_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (target_width, target_height);
    }

    let scale_w = f64::from(target_width) / f64::from(original_width);
    let scale_h = f64::from(target_height) / f64::from(original_height);
    let scale = scale_w.min(scale_h);

    let width = (f64::from(original_width) * scale).round() as u32;
    let height = (f64::from(original_height) * scale).round() as u32;

    (
        width.clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE),
        height.clamp(MIN_IMAGE_SIZE, MAX_IMAGE_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_strategy_exact() {
        let request = ResizeRequest::new(ResizeStrategy::Custom { width: 320, height: 240 }, false);
        assert_eq!(request.resolve_target(640, 480).unwrap(), (320, 240));
    }

    #[test]
    fn test_custom_strategy_out_of_bounds() {
        let request = ResizeRequest::new(ResizeStrategy::Custom { width: 5, height: 240 }, false);
        let result = request.resolve_target(640, 480);
        assert!(matches!(result, Err(ResizeError::InvalidDimension(5, 240, _, _))));

        let request = ResizeRequest::new(ResizeStrategy::Custom { width: 320, height: 2001 }, false);
        assert!(request.resolve_target(640, 480).is_err());
    }

    #[test]
    fn test_scale_identity_at_100() {
        let request = ResizeRequest::new(ResizeStrategy::Scale { percent: 100 }, false);
        assert_eq!(request.resolve_target(640, 480).unwrap(), (640, 480));
    }

    #[test]
    fn test_scale_rounds_to_nearest() {
        // 55 * 0.5 = 27.5 rounds away from zero
        let request = ResizeRequest::new(ResizeStrategy::Scale { percent: 50 }, false);
        assert_eq!(request.resolve_target(55, 100).unwrap(), (28, 50));
    }

    #[test]
    fn test_scale_out_of_range() {
        let request = ResizeRequest::new(ResizeStrategy::Scale { percent: 5 }, false);
        assert!(matches!(
            request.resolve_target(640, 480),
            Err(ResizeError::InvalidScale(5, _, _))
        ));

        let request = ResizeRequest::new(ResizeStrategy::Scale { percent: 201 }, false);
        assert!(request.resolve_target(640, 480).is_err());
    }

    #[test]
    fn test_scale_resolving_below_minimum_is_rejected() {
        // 20px at 10% would be 2px, well under the floor
        let request = ResizeRequest::new(ResizeStrategy::Scale { percent: 10 }, false);
        assert!(matches!(
            request.resolve_target(20, 20),
            Err(ResizeError::InvalidDimension(2, 2, _, _))
        ));
    }

    #[test]
    fn test_preset_ignores_input_size() {
        let request = ResizeRequest::new(ResizeStrategy::Preset(PresetSize::Square256), false);
        assert_eq!(request.resolve_target(33, 1999).unwrap(), (256, 256));
        assert_eq!(request.resolve_target(1999, 33).unwrap(), (256, 256));
    }

    #[test]
    fn test_aspect_ratio_derives_height_from_width() {
        // 100x50 original, 50x50 box: width drives, height follows
        let request =
            ResizeRequest::new(ResizeStrategy::Custom { width: 50, height: 50 }, true);
        assert_eq!(request.resolve_target(100, 50).unwrap(), (50, 25));
    }

    #[test]
    fn test_aspect_ratio_derives_width_from_height() {
        let request =
            ResizeRequest::new(ResizeStrategy::Custom { width: 400, height: 100 }, true);
        assert_eq!(request.resolve_target(200, 100).unwrap(), (200, 100));

        let request =
            ResizeRequest::new(ResizeStrategy::Custom { width: 400, height: 50 }, true);
        assert_eq!(request.resolve_target(200, 100).unwrap(), (100, 50));
    }

    #[test]
    fn test_aspect_ratio_derived_dimension_reclamped() {
        // 2000x100 fitted into 200x200 derives exactly the 10px floor;
        // 1000x25 would derive 5px and gets clamped back up to it
        let request =
            ResizeRequest::new(ResizeStrategy::Custom { width: 200, height: 200 }, true);
        assert_eq!(request.resolve_target(2000, 100).unwrap(), (200, 10));
        assert_eq!(request.resolve_target(1000, 25).unwrap(), (200, 10));
    }

    #[test]
    fn test_aspect_ratio_with_preset() {
        let request = ResizeRequest::new(ResizeStrategy::Preset(PresetSize::Square128), true);
        assert_eq!(request.resolve_target(100, 50).unwrap(), (128, 64));
    }

    #[test]
    fn test_fit_to_aspect_ratio_rounding() {
        // scale = 0.25, 101 * 0.25 = 25.25 -> 25
        assert_eq!(fit_to_aspect_ratio(25, 200, 100, 101), (25, 25));
        // half-way case rounds away from zero: 50 * 0.45 = 22.5 -> 23
        assert_eq!(fit_to_aspect_ratio(45, 1000, 100, 50), (45, 23));
    }

    #[test]
    fn test_from_cli_args_combinations() {
        assert_eq!(
            ResizeStrategy::from_cli_args(Some(64), Some(48), None, None).unwrap(),
            ResizeStrategy::Custom { width: 64, height: 48 }
        );
        assert_eq!(
            ResizeStrategy::from_cli_args(None, None, Some(50), None).unwrap(),
            ResizeStrategy::Scale { percent: 50 }
        );
        assert_eq!(
            ResizeStrategy::from_cli_args(None, None, None, Some("256x256")).unwrap(),
            ResizeStrategy::Preset(PresetSize::Square256)
        );
    }

    #[test]
    fn test_from_cli_args_rejects_partial_custom() {
        let result = ResizeStrategy::from_cli_args(Some(64), None, None, None);
        assert!(matches!(result, Err(ResizeError::UnsupportedStrategy(_))));
    }

    #[test]
    fn test_from_cli_args_rejects_conflicts() {
        let result = ResizeStrategy::from_cli_args(Some(64), Some(48), Some(50), None);
        assert!(matches!(result, Err(ResizeError::UnsupportedStrategy(_))));

        let result = ResizeStrategy::from_cli_args(None, None, Some(50), Some("64x64"));
        assert!(matches!(result, Err(ResizeError::UnsupportedStrategy(_))));

        let result = ResizeStrategy::from_cli_args(None, None, None, None);
        assert!(matches!(result, Err(ResizeError::UnsupportedStrategy(_))));
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(1024).is_ok());
        assert!(validate_file_size(MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            validate_file_size(MAX_FILE_SIZE + 1),
            Err(ResizeError::OversizedUpload(_, _))
        ));
    }
}
