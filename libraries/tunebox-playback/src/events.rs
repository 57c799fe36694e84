//! Player events
//!
//! Event-based communication for UI synchronization. Events are emitted at
//! key points:
//! - State changes (play/pause/idle)
//! - Track changes (selection, skip, end of track)
//! - Playlist edits (upload, delete)
//! - Volume and theme changes

use crate::theme::Theme;
use crate::types::PlaybackState;
use crate::volume::VolumeIcon;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Transport state changed
    StateChanged { state: PlaybackState },

    /// A different playlist entry became current
    TrackChanged {
        /// Position of the new track
        index: usize,
        /// Identity of the new track
        track_id: Uuid,
    },

    /// Tracks were added or removed
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0-100)
        level: u8,
        icon: VolumeIcon,
    },

    ThemeChanged { theme: Theme },

    /// A user-visible error was reported
    Error { message: String },
}
