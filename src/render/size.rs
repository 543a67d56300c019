use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

// =============================================================================
// Icon Size
// =============================================================================

/// A supported output size. Icons are always square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconSize {
    /// 192×192, the standard home-screen icon
    Px192,
    /// 512×512, the splash-screen icon
    Px512,
}

impl IconSize {
    /// Every supported size, smallest first.
    pub const ALL: [IconSize; 2] = [IconSize::Px192, IconSize::Px512];

    /// Edge length in pixels.
    pub const fn pixels(self) -> u32 {
        match self {
            IconSize::Px192 => 192,
            IconSize::Px512 => 512,
        }
    }

    /// Look up a size by edge length.
    pub fn from_pixels(pixels: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.pixels() == pixels)
    }

    /// Parse the file name segment of an icon path, e.g. `192.png`.
    pub fn from_path_segment(segment: &str) -> Result<Self, RequestError> {
        segment
            .strip_suffix(".png")
            .ok_or_else(|| RequestError::UnsupportedSize(segment.to_string()))?
            .parse()
    }
}

impl FromStr for IconSize {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(Self::from_pixels)
            .ok_or_else(|| RequestError::UnsupportedSize(s.to_string()))
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

// =============================================================================
// Icon Request
// =============================================================================

/// A validated request for one application icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Public application identifier, as it appeared in the URL
    pub application_id: String,

    /// Output size
    pub size: IconSize,
}

impl IconRequest {
    pub fn new(application_id: impl Into<String>, size: IconSize) -> Self {
        Self {
            application_id: application_id.into(),
            size,
        }
    }
}
