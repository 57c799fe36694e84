//! Host collaborator traits
//!
//! The controller never touches a DOM, an audio element or a file picker
//! directly. The host (browser binding, test harness) provides these.

use crate::error::Result;
use crate::theme::Theme;
use crate::types::{Track, UploadedFile};
use crate::volume::VolumeIcon;
use std::time::Duration;

/// External media playback resource
///
/// Decodes and outputs audio from a URI. The controller only commands it and
/// reads back its clock; lifecycle signals arrive as
/// [`MediaEvent`](crate::MediaEvent)s.
pub trait PlaybackResource {
    /// Replace the loaded source, superseding any load in flight
    fn load(&mut self, uri: &str);

    /// Drop the loaded source
    fn unload(&mut self);

    /// Begin or resume playback of the loaded source
    ///
    /// # Returns
    /// * `Err(_)` - The host refused to start playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Jump to an absolute position in the loaded source
    fn seek_to(&mut self, position: Duration);

    /// Set output gain in [0, 1]
    fn set_volume(&mut self, gain: f32);

    /// Current playback position
    fn current_time(&self) -> Duration;

    /// Total duration, `None` until metadata is available
    fn duration(&self) -> Option<Duration>;
}

/// "Now playing" panel and transport widgets
pub trait DisplaySurface {
    /// Show title, artist and album of the selected track
    fn set_track_info(&mut self, title: &str, artist: &str, album: &str);

    /// Elapsed time label
    fn set_elapsed(&mut self, text: &str);

    /// Total time label
    fn set_total(&mut self, text: &str);

    /// Progress fill in [0, 1]
    fn set_progress(&mut self, fraction: f64);

    /// Play/pause affordance and the "now playing" indicator
    fn set_playing(&mut self, playing: bool);

    fn set_volume_icon(&mut self, icon: VolumeIcon);

    fn set_theme(&mut self, theme: Theme);

    /// Blocking notice to the user
    fn notify(&mut self, message: &str);
}

/// Playlist listing
///
/// Items rendered by the view raise `Intent::Select` and `Intent::Delete`.
pub trait PlaylistView {
    /// Rebuild the listing
    fn render(&mut self, tracks: &[Track], active: Option<usize>);

    /// Move the "currently active" highlight
    fn set_active(&mut self, active: Option<usize>);
}

/// Synchronous yes/no question to the user
pub trait ConfirmationPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Creates and releases ephemeral playable references for uploaded files
pub trait SourceRegistry<F> {
    /// Make `file` loadable, returning its URI
    fn register(&mut self, file: &UploadedFile<F>) -> Result<String>;

    /// Release a URI previously returned by `register`
    fn release(&mut self, uri: &str);
}

/// Everything the controller needs from its environment
pub struct Host<F> {
    pub resource: Box<dyn PlaybackResource>,
    pub display: Box<dyn DisplaySurface>,
    pub view: Box<dyn PlaylistView>,
    pub prompt: Box<dyn ConfirmationPrompt>,
    pub registry: Box<dyn SourceRegistry<F>>,
}
