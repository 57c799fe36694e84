//! Structured inputs to the controller

use crate::types::UploadedFile;

/// A user request, raised by a control of the player
#[derive(Debug, Clone)]
pub enum Intent<F> {
    /// Start playback if paused
    Play,
    /// Pause playback if playing
    Pause,
    /// The play/pause button
    TogglePlayPause,
    Next,
    Previous,
    /// Playlist item clicked
    Select(usize),
    /// Playlist item delete button clicked
    Delete(usize),
    /// Seek bar clicked at a fractional position in [0, 1]
    Seek(f64),
    /// Volume slider moved to a percentage
    SetVolume(u8),
    /// Files picked for upload
    Upload(Vec<UploadedFile<F>>),
    ToggleTheme,
}

/// A lifecycle signal from the playback resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback position advanced
    TimeAdvanced,
    /// Duration became known
    MetadataReady,
    /// The loaded source played to its end
    Ended,
}
