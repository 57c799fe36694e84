//! Display theme

use serde::{Deserialize, Serialize};

/// Display mode of the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label shown on the theme toggle
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark Mode",
            Theme::Light => "Light Mode",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}
