/// Fixed target resolutions offered as convenience options
///
/// This module provides type-safe preset handling, replacing string-based
/// size selection with a proper enum and validation.

use crate::error::{ResizeError, Result};
use std::fmt;
use std::str::FromStr;

/// The enumerated preset table offered by the form and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSize {
    Square64,
    Square128,
    Square256,
    Square480,
    Square512,
}

impl PresetSize {
    /// Target (width, height) for this preset
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PresetSize::Square64 => (64, 64),
            PresetSize::Square128 => (128, 128),
            PresetSize::Square256 => (256, 256),
            PresetSize::Square480 => (480, 480),
            PresetSize::Square512 => (512, 512),
        }
    }

    /// Canonical name as shown in the form ("64x64", "128x128", ...)
    pub fn name(&self) -> &'static str {
        match self {
            PresetSize::Square64 => "64x64",
            PresetSize::Square128 => "128x128",
            PresetSize::Square256 => "256x256",
            PresetSize::Square480 => "480x480",
            PresetSize::Square512 => "512x512",
        }
    }

    /// All presets, in the order they are rendered
    pub fn all() -> [PresetSize; 5] {
        [
            PresetSize::Square64,
            PresetSize::Square128,
            PresetSize::Square256,
            PresetSize::Square480,
            PresetSize::Square512,
        ]
    }

    /// Preset names for CLI help text
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|p| p.name()).collect()
    }
}

impl fmt::Display for PresetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PresetSize {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "64x64" | "64" => Ok(PresetSize::Square64),
            "128x128" | "128" => Ok(PresetSize::Square128),
            "256x256" | "256" => Ok(PresetSize::Square256),
            "480x480" | "480" => Ok(PresetSize::Square480),
            "512x512" | "512" => Ok(PresetSize::Square512),
            _ => Err(ResizeError::UnknownPreset(s.to_string())),
        }
    }
}
