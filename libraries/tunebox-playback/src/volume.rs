//! Volume control
//!
//! Volume is a 0-100% level from a linear slider, handed to the playback
//! resource as a linear gain in [0, 1].

use serde::{Deserialize, Serialize};

/// Level at and above which the full-volume icon is shown
const FULL_ICON_THRESHOLD: u8 = 50;

/// Volume indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeIcon {
    /// Level is 0
    Muted,

    /// Level is below 50
    Low,

    /// Level is 50 or above
    Full,
}

impl VolumeIcon {
    /// Pick the indicator for a level
    pub fn for_level(level: u8) -> Self {
        match level {
            0 => VolumeIcon::Muted,
            l if l < FULL_ICON_THRESHOLD => VolumeIcon::Low,
            _ => VolumeIcon::Full,
        }
    }
}

/// Volume controller with linear scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain for the playback resource
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }

    /// Indicator matching the current level
    pub fn icon(&self) -> VolumeIcon {
        VolumeIcon::for_level(self.level)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50)
    }
}
