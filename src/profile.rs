//! # Conversion Profiles
//!
//! Typed replacements for the option labels shown to the user
//! ("320 × Auto", "20 fps (Balanced)", ...). Labels are parsed once at the
//! CLI boundary; the pipeline only ever sees these types.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Target usage of the GIF, each with a fixed output width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Profile picture, 320 px wide
    Avatar,
    /// Profile banner, 600 px wide
    Banner,
}

impl Profile {
    pub fn width(self) -> u32 {
        match self {
            Profile::Avatar => 320,
            Profile::Banner => 600,
        }
    }

    /// Frame rate preselected for this profile
    pub fn default_frame_rate(self) -> FrameRate {
        match self {
            Profile::Avatar => FpsPreset::Balanced.frame_rate(),
            Profile::Banner => FpsPreset::Compact.frame_rate(),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Profile::Avatar => "Optimized for profile pictures",
            Profile::Banner => "Optimized for profile banners",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Avatar => write!(f, "Profile avatar"),
            Profile::Banner => write!(f, "Profile banner"),
        }
    }
}

/// Named frame rates offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsPreset {
    Fluid,
    Cinema,
    Balanced,
    Compact,
    LowWeight,
}

impl FpsPreset {
    pub const ALL: [FpsPreset; 5] = [
        FpsPreset::Fluid,
        FpsPreset::Cinema,
        FpsPreset::Balanced,
        FpsPreset::Compact,
        FpsPreset::LowWeight,
    ];

    pub fn fps(self) -> u32 {
        match self {
            FpsPreset::Fluid => 30,
            FpsPreset::Cinema => 24,
            FpsPreset::Balanced => 20,
            FpsPreset::Compact => 15,
            FpsPreset::LowWeight => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FpsPreset::Fluid => "fluid",
            FpsPreset::Cinema => "cinema",
            FpsPreset::Balanced => "balanced",
            FpsPreset::Compact => "compact",
            FpsPreset::LowWeight => "low-weight",
        }
    }

    pub fn frame_rate(self) -> FrameRate {
        FrameRate(NonZeroU32::new(self.fps()).unwrap_or(NonZeroU32::MIN))
    }
}

/// Output frame rate, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FrameRate(NonZeroU32);

impl FrameRate {
    pub fn new(fps: u32) -> Result<Self, ConvertError> {
        NonZeroU32::new(fps)
            .map(Self)
            .ok_or_else(|| ConvertError::Validation("Frame rate must be greater than 0".to_string()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = ConvertError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FrameRate> for u32 {
    fn from(value: FrameRate) -> Self {
        value.get()
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.get())
    }
}

impl FromStr for FrameRate {
    type Err = ConvertError;

    /// Accepts `20`, `balanced` or the menu label `20 fps (Balanced)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(preset) = FpsPreset::ALL
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(preset.frame_rate());
        }

        let numeric = trimmed.split_whitespace().next().unwrap_or_default();
        let fps: u32 = numeric
            .parse()
            .map_err(|_| ConvertError::Validation(format!("Invalid frame rate: {:?}", s)))?;
        Self::new(fps)
    }
}

/// Requested output width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidthSelection {
    /// Keep the source video's width
    Source,
    /// Downscale to this width, height follows the aspect ratio
    Fixed(NonZeroU32),
}

impl WidthSelection {
    pub fn fixed(width: u32) -> Result<Self, ConvertError> {
        NonZeroU32::new(width)
            .map(Self::Fixed)
            .ok_or_else(|| ConvertError::Validation("Width must be greater than 0".to_string()))
    }
}

impl From<Profile> for WidthSelection {
    fn from(profile: Profile) -> Self {
        // Profile widths are non-zero constants
        WidthSelection::Fixed(NonZeroU32::new(profile.width()).unwrap_or(NonZeroU32::MIN))
    }
}

impl fmt::Display for WidthSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthSelection::Source => write!(f, "Original"),
            WidthSelection::Fixed(width) => write!(f, "{} × Auto", width),
        }
    }
}

impl FromStr for WidthSelection {
    type Err = ConvertError;

    /// Accepts `320`, `320px`, `320px (Standard)`, `original` or `source`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("original") || trimmed.eq_ignore_ascii_case("source") {
            return Ok(WidthSelection::Source);
        }

        let numeric = trimmed.split("px").next().unwrap_or_default().trim();
        let width: u32 = numeric
            .parse()
            .map_err(|_| ConvertError::Validation(format!("Invalid width: {:?}", s)))?;
        Self::fixed(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_widths() {
        assert_eq!(Profile::Avatar.width(), 320);
        assert_eq!(Profile::Banner.width(), 600);
        assert_eq!(WidthSelection::from(Profile::Banner), WidthSelection::fixed(600).unwrap());
    }

    #[test]
    fn test_profile_default_frame_rates() {
        assert_eq!(Profile::Avatar.default_frame_rate().get(), 20);
        assert_eq!(Profile::Banner.default_frame_rate().get(), 15);
    }

    #[test]
    fn test_frame_rate_parsing() {
        assert_eq!("24".parse::<FrameRate>().unwrap().get(), 24);
        assert_eq!("20 fps (Balanced)".parse::<FrameRate>().unwrap().get(), 20);
        assert_eq!("low-weight".parse::<FrameRate>().unwrap().get(), 10);
        assert_eq!("Fluid".parse::<FrameRate>().unwrap().get(), 30);
        assert!("0".parse::<FrameRate>().is_err());
        assert!("fast".parse::<FrameRate>().is_err());
        assert!("".parse::<FrameRate>().is_err());
    }

    #[test]
    fn test_width_parsing() {
        assert_eq!("320".parse::<WidthSelection>().unwrap(), WidthSelection::fixed(320).unwrap());
        assert_eq!(
            "320px (Standard)".parse::<WidthSelection>().unwrap(),
            WidthSelection::fixed(320).unwrap()
        );
        assert_eq!("Original".parse::<WidthSelection>().unwrap(), WidthSelection::Source);
        assert_eq!("source".parse::<WidthSelection>().unwrap(), WidthSelection::Source);
    }

    #[test]
    fn test_width_garbage_is_validation_error() {
        for input in ["", "wide", "px", "-320", "0"] {
            let err = input.parse::<WidthSelection>().unwrap_err();
            assert!(matches!(err, ConvertError::Validation(_)), "input {:?}", input);
        }
    }

    #[test]
    fn test_frame_rate_serde_rejects_zero() {
        assert_eq!(serde_json::from_str::<FrameRate>("15").unwrap().get(), 15);
        assert!(serde_json::from_str::<FrameRate>("0").is_err());
    }
}
