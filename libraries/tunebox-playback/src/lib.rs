//! Tunebox - Playlist & Transport Control
//!
//! Platform-agnostic core of the Tunebox player widget.
//!
//! This crate provides:
//! - Playlist navigation with wrap-around (previous/next/select)
//! - Play/pause state mirrored against an external playback resource
//! - Seeking by fractional position
//! - Volume control (linear, 0-100%, tri-state indicator)
//! - Dark/light theme toggling
//! - Uploads appended as tracks backed by ephemeral sources
//! - Confirmed deletion with index adjustment and source release
//!
//! # Architecture
//!
//! `tunebox-playback` never touches a browser API. The host injects its
//! collaborators ([`PlaybackResource`], [`DisplaySurface`], [`PlaylistView`],
//! [`ConfirmationPrompt`], [`SourceRegistry`]) and feeds structured
//! [`Intent`]s and [`MediaEvent`]s into a single controller.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunebox_playback::{Host, Intent, PlayerConfig, PlaylistController};
//!
//! # fn host() -> Host<Vec<u8>> { unimplemented!() }
//! let mut player = PlaylistController::new(PlayerConfig::default(), host());
//!
//! player.dispatch(Intent::TogglePlayPause).ok();
//! player.dispatch(Intent::Next).ok();
//! player.dispatch(Intent::SetVolume(30)).ok();
//!
//! for event in player.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

mod config;
mod controller;
mod error;
mod events;
mod host;
mod intent;
mod theme;
mod time;
pub mod types;
mod upload;
mod volume;

// Public exports
pub use config::{PlayerConfig, PlaylistEntry};
pub use controller::{PlayerState, PlaylistController};
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use host::{
    ConfirmationPrompt, DisplaySurface, Host, PlaybackResource, PlaylistView, SourceRegistry,
};
pub use intent::{Intent, MediaEvent};
pub use theme::Theme;
pub use time::format_elapsed;
pub use types::{PlaybackState, Track, TrackSource, UploadedFile};
pub use upload::{is_audio, title_from_filename, InMemorySourceRegistry};
pub use volume::{Volume, VolumeIcon};
