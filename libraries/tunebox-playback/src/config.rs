//! Player configuration
//!
//! Precedence (highest wins):
//! 1) Environment variables (prefix `TUNEBOX__`, `__` as nested separator)
//! 2) TOML source (file on disk or a string embedded in the host)
//! 3) Struct defaults

use crate::error::{PlayerError, Result};
use crate::theme::Theme;
use crate::types::{Track, TrackSource, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

const ENV_PREFIX: &str = "TUNEBOX";

/// Startup settings for the controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 50)
    pub volume: u8,

    /// Initial theme (default: dark)
    pub theme: Theme,

    /// Reload track 0 instead of appending when an upload arrives while the
    /// playlist holds exactly one track (default: false)
    pub reload_on_single_track_upload: bool,

    /// Question asked before deleting a track
    pub confirm_delete_message: String,

    /// Notice shown when play is pressed with nothing loaded
    pub no_track_message: String,

    /// Built-in playlist loaded at startup
    pub playlist: Vec<PlaylistEntry>,
}

/// A built-in playlist entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub title: String,
    #[serde(default = "unknown_artist")]
    pub artist: String,
    #[serde(default = "unknown_album")]
    pub album: String,
    /// Bundled asset or remote URI
    #[serde(default)]
    pub src: Option<String>,
}

impl PlaylistEntry {
    fn new(title: &str, artist: &str, src: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            album: "unknown Album".to_string(),
            src: Some(src.to_string()),
        }
    }
}

impl From<PlaylistEntry> for Track {
    fn from(entry: PlaylistEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: entry.title,
            artist: entry.artist,
            album: entry.album,
            source: entry.src.map(TrackSource::Static),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 50,
            theme: Theme::Dark,
            reload_on_single_track_upload: false,
            confirm_delete_message: "Are you sure you want to delete this song?".to_string(),
            no_track_message: "Please upload audio files first!".to_string(),
            playlist: vec![
                PlaylistEntry::new(
                    "Phir kabhi",
                    "Arman Malik & Arijit Singh",
                    "assets/kabhi.mp3",
                ),
                PlaylistEntry::new("Marham", "Aditya Rakhari", "assets/marham.mp3"),
                PlaylistEntry::new("Sahiba", "Aditya Rakhari", "assets/Sahiba.mp3"),
                PlaylistEntry::new("Pal Pal", "Aditya Rakhari", "assets/Pal Pal.mp3"),
            ],
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        Self::finish(builder)
    }

    /// Load configuration from TOML text and the environment
    ///
    /// Used by hosts that embed their settings instead of reading a file.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        Self::finish(builder)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings: PlayerConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(PlayerError::Config(format!(
                "volume must be within 0-100, got {}",
                self.volume
            )));
        }

        if let Some(entry) = self.playlist.iter().find(|e| e.title.trim().is_empty()) {
            return Err(PlayerError::Config(format!(
                "playlist entry with source {:?} has no title",
                entry.src
            )));
        }

        Ok(())
    }

    /// Build the startup playlist
    pub fn tracks(&self) -> Vec<Track> {
        self.playlist.iter().cloned().map(Track::from).collect()
    }
}

fn unknown_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

fn unknown_album() -> String {
    UNKNOWN_ALBUM.to_string()
}
