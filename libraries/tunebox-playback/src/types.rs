//! Core types for playlist management

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Artist shown for tracks without artist metadata
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album shown for tracks without album metadata
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Title shown when the playlist is empty
pub const NO_TRACK_TITLE: &str = "Select a Song";

/// One playlist entry
///
/// Two tracks with identical metadata are still distinct entries; `id` tells
/// them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Entry identity, unique per playlist entry
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Artist name
    #[serde(default = "unknown_artist")]
    pub artist: String,

    /// Album name
    #[serde(default = "unknown_album")]
    pub album: String,

    /// Playable source, if any
    #[serde(default)]
    pub source: Option<TrackSource>,
}

impl Track {
    /// Create a track backed by a static URI
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            source: Some(TrackSource::Static(uri.into())),
        }
    }

    /// URI to hand to the playback resource
    pub fn uri(&self) -> Option<&str> {
        self.source.as_ref().map(TrackSource::uri)
    }
}

/// Where a track's audio comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSource {
    /// A URI that outlives the page (bundled asset, remote file)
    Static(String),

    /// A process-local handle to uploaded file data
    ///
    /// Must be released through the source registry once the owning track is
    /// removed.
    Ephemeral(String),
}

impl TrackSource {
    /// The loadable URI
    pub fn uri(&self) -> &str {
        match self {
            TrackSource::Static(uri) | TrackSource::Ephemeral(uri) => uri,
        }
    }

    /// Whether this source must be released on removal
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, TrackSource::Ephemeral(_))
    }
}

/// Transport state derived from the loaded source and the playing flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No source loaded
    Idle,

    /// Source loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// A file chosen by the user through the file picker
///
/// `payload` is whatever the host needs to build a playable reference:
/// raw bytes natively, a browser `File` handle on the web.
#[derive(Debug, Clone)]
pub struct UploadedFile<F> {
    /// File name including extension
    pub name: String,

    /// Declared media type, e.g. `audio/mpeg`
    pub media_type: String,

    /// File contents or handle
    pub payload: F,
}

impl<F> UploadedFile<F> {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, payload: F) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            payload,
        }
    }
}

fn unknown_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

fn unknown_album() -> String {
    UNKNOWN_ALBUM.to_string()
}
