//! Playlist controller - core orchestration
//!
//! Owns the playlist and transport state and keeps the playback resource,
//! display and playlist view consistent with it.

use crate::{
    config::PlayerConfig,
    error::{PlayerError, Result},
    events::PlayerEvent,
    host::Host,
    intent::{Intent, MediaEvent},
    theme::Theme,
    time::format_elapsed,
    types::{PlaybackState, Track, UploadedFile, NO_TRACK_TITLE, UNKNOWN_ALBUM, UNKNOWN_ARTIST},
    upload::{is_audio, track_from_upload},
    volume::Volume,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Process-wide player state
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub tracks: Vec<Track>,
    /// Always `< tracks.len()` when `tracks` is non-empty, 0 otherwise
    pub current_index: usize,
    /// Mirrors the resource; not guaranteed to be atomically consistent with it
    pub is_playing: bool,
    pub volume: Volume,
    pub theme: Theme,
    /// URI currently loaded into the resource
    pub loaded_source: Option<String>,
}

/// Central playlist and transport management
///
/// Every user intent and resource signal flows through here:
/// - Transport (play, pause, skip, seek)
/// - Selection and deletion of playlist entries
/// - Volume and theme
/// - Uploads extending the playlist
pub struct PlaylistController<F> {
    state: PlayerState,
    host: Host<F>,
    reload_on_single_track_upload: bool,
    confirm_delete_message: String,
    no_track_message: String,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<F> PlaylistController<F> {
    /// Create the controller and load the startup playlist
    ///
    /// Track 0 is loaded paused. An empty playlist leaves the player idle.
    pub fn new(config: PlayerConfig, host: Host<F>) -> Self {
        let tracks = config.tracks();
        info!(tracks = tracks.len(), "initializing playlist");

        let mut controller = Self {
            state: PlayerState {
                tracks,
                current_index: 0,
                is_playing: false,
                volume: Volume::new(config.volume),
                theme: config.theme,
                loaded_source: None,
            },
            host,
            reload_on_single_track_upload: config.reload_on_single_track_upload,
            confirm_delete_message: config.confirm_delete_message,
            no_track_message: config.no_track_message,
            pending_events: Vec::new(),
        };

        controller.apply_volume();
        controller.host.display.set_theme(controller.state.theme);
        controller.render_playlist();
        // Not playing yet, so loading cannot start the resource.
        if let Err(e) = controller.load_track(0) {
            warn!("initial load failed: {}", e);
        }

        controller
    }

    // ===== Dispatch =====

    /// Apply a user intent
    ///
    /// `NoActiveTrack` is shown to the user through the display before being
    /// returned.
    pub fn dispatch(&mut self, intent: Intent<F>) -> Result<()> {
        let result = match intent {
            Intent::Play => self.play(),
            Intent::Pause => self.pause(),
            Intent::TogglePlayPause => self.toggle_play_pause(),
            Intent::Next => self.next_track(),
            Intent::Previous => self.previous_track(),
            Intent::Select(index) => self.load_track(index),
            Intent::Delete(index) => self.delete_track(index).map(|_| ()),
            Intent::Seek(fraction) => {
                self.seek(fraction);
                Ok(())
            }
            Intent::SetVolume(percent) => {
                self.set_volume(percent);
                Ok(())
            }
            Intent::Upload(files) => self.add_uploaded_files(files).map(|_| ()),
            Intent::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
        };

        if let Err(ref e) = result {
            self.report(e);
        }

        result
    }

    /// Apply a playback resource signal
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Result<()> {
        match event {
            MediaEvent::TimeAdvanced => {
                self.on_time_advanced();
                Ok(())
            }
            MediaEvent::MetadataReady => {
                self.on_metadata_ready();
                Ok(())
            }
            MediaEvent::Ended => {
                debug!("track ended, advancing");
                self.next_track()
            }
        }
    }

    // ===== Transport =====

    /// Flip between playing and paused
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.state.loaded_source.is_none() {
            return Err(PlayerError::NoActiveTrack);
        }

        if self.state.is_playing {
            self.host.resource.pause();
        } else {
            self.host.resource.play()?;
        }

        self.state.is_playing = !self.state.is_playing;
        self.host.display.set_playing(self.state.is_playing);
        self.emit_state_changed();
        Ok(())
    }

    /// Start playback if paused
    pub fn play(&mut self) -> Result<()> {
        if self.state.is_playing && self.state.loaded_source.is_some() {
            return Ok(());
        }
        self.toggle_play_pause()
    }

    /// Pause playback if playing
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.is_playing && self.state.loaded_source.is_some() {
            return Ok(());
        }
        self.toggle_play_pause()
    }

    /// Make the track at `index` current
    ///
    /// Out-of-range indices are ignored. Playback continues on the new track
    /// if it was playing before.
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        if index >= self.state.tracks.len() {
            debug!(index, len = self.state.tracks.len(), "ignoring out-of-range track");
            return Ok(());
        }

        self.state.current_index = index;
        let track = &self.state.tracks[index];
        self.host
            .display
            .set_track_info(&track.title, &track.artist, &track.album);

        if let Some(uri) = track.uri() {
            self.host.resource.load(uri);
            self.state.loaded_source = Some(uri.to_string());
        }

        let track_id = track.id;
        self.host.view.set_active(Some(index));
        self.pending_events
            .push(PlayerEvent::TrackChanged { index, track_id });

        if self.state.is_playing {
            if let Err(e) = self.host.resource.play() {
                self.state.is_playing = false;
                self.host.display.set_playing(false);
                self.emit_state_changed();
                return Err(e);
            }
            self.host.display.set_playing(true);
        } else {
            self.host.display.set_playing(false);
        }

        self.emit_state_changed();
        Ok(())
    }

    /// Go to the previous track, wrapping to the last
    pub fn previous_track(&mut self) -> Result<()> {
        let len = self.state.tracks.len();
        if len == 0 {
            return Ok(());
        }

        let target = (self.state.current_index + len - 1) % len;
        self.load_track(target)
    }

    /// Go to the next track, wrapping to the first
    pub fn next_track(&mut self) -> Result<()> {
        let len = self.state.tracks.len();
        if len == 0 {
            return Ok(());
        }

        let target = (self.state.current_index + 1) % len;
        self.load_track(target)
    }

    /// Seek to a fractional position of the loaded track
    ///
    /// Ignored when nothing is loaded or the duration is not known yet.
    pub fn seek(&mut self, fraction: f64) {
        if self.state.loaded_source.is_none() {
            return;
        }

        let Some(duration) = self.known_duration() else {
            debug!("seek before metadata, ignoring");
            return;
        };

        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.host
            .resource
            .seek_to(Duration::from_secs_f64(duration * fraction));
    }

    // ===== Volume & Theme =====

    /// Set volume from a 0-100 slider
    pub fn set_volume(&mut self, percent: u8) {
        self.state.volume.set_level(percent);
        self.apply_volume();
    }

    /// Switch between dark and light display
    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        self.host.display.set_theme(self.state.theme);
        self.pending_events.push(PlayerEvent::ThemeChanged {
            theme: self.state.theme,
        });
    }

    // ===== Resource Signals =====

    /// Refresh progress and elapsed time
    pub fn on_time_advanced(&mut self) {
        let Some(duration) = self.known_duration() else {
            return;
        };

        let current = self.host.resource.current_time().as_secs_f64();
        self.host.display.set_progress(current / duration);
        self.host.display.set_elapsed(&format_elapsed(current));
    }

    /// Show the total time once the duration is known
    pub fn on_metadata_ready(&mut self) {
        if let Some(duration) = self.known_duration() {
            self.host.display.set_total(&format_elapsed(duration));
        }
    }

    // ===== Playlist Edits =====

    /// Append uploaded audio files to the playlist
    ///
    /// Non-audio files are skipped. New tracks are neither selected nor
    /// played. Returns the number of tracks added.
    pub fn add_uploaded_files(&mut self, files: Vec<UploadedFile<F>>) -> Result<usize> {
        if self.reload_on_single_track_upload && self.state.tracks.len() == 1 {
            debug!("single-track playlist, reloading instead of appending");
            self.load_track(0)?;
            return Ok(0);
        }

        let mut added = 0;
        for file in &files {
            if !is_audio(&file.media_type) {
                debug!(name = %file.name, media_type = %file.media_type, "skipping non-audio file");
                continue;
            }

            match self.host.registry.register(file) {
                Ok(uri) => {
                    self.state.tracks.push(track_from_upload(file, uri));
                    added += 1;
                }
                Err(e) => warn!(name = %file.name, "skipping upload: {}", e),
            }
        }

        info!(added, total = self.state.tracks.len(), "uploaded files added");
        self.render_playlist();
        self.emit_playlist_changed();
        Ok(added)
    }

    /// Remove the track at `index` after the user confirms
    ///
    /// Returns the removed track, or `None` when the index is out of range or
    /// the user declined.
    pub fn delete_track(&mut self, index: usize) -> Result<Option<Track>> {
        if index >= self.state.tracks.len() {
            debug!(index, "ignoring delete of out-of-range track");
            return Ok(None);
        }

        if !self.host.prompt.confirm(&self.confirm_delete_message) {
            debug!(index, "delete declined");
            return Ok(None);
        }

        let current = self.state.current_index;
        if index == current {
            self.host.resource.pause();
            self.state.is_playing = false;
            self.host.display.set_playing(false);
            self.emit_state_changed();
        }

        let removed = self.state.tracks.remove(index);
        info!(index, title = %removed.title, "track deleted");

        let mut result = Ok(());
        if index < current {
            self.state.current_index -= 1;
        } else if index == current && !self.state.tracks.is_empty() {
            if self.state.current_index >= self.state.tracks.len() {
                self.state.current_index = 0;
            }
            result = self.load_track(self.state.current_index);
        } else if self.state.tracks.is_empty() {
            self.state.current_index = 0;
            self.host
                .display
                .set_track_info(NO_TRACK_TITLE, UNKNOWN_ARTIST, UNKNOWN_ALBUM);
            self.host.resource.unload();
            self.state.loaded_source = None;
            self.emit_state_changed();
        }

        if let Some(source) = removed.source.as_ref().filter(|s| s.is_ephemeral()) {
            let uri = source.uri();
            // The next track may have no source, leaving the released one loaded
            if self.state.loaded_source.as_deref() == Some(uri) {
                debug!(%uri, "unloading released source");
                self.host.resource.unload();
                self.state.loaded_source = None;
                self.emit_state_changed();
            }
            self.host.registry.release(uri);
        }

        self.render_playlist();
        self.emit_playlist_changed();
        result.map(|()| Some(removed))
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.state.tracks
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.state.tracks.get(self.state.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Derived transport state
    pub fn playback_state(&self) -> PlaybackState {
        match (&self.state.loaded_source, self.state.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    pub fn volume(&self) -> u8 {
        self.state.volume.level()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn known_duration(&self) -> Option<f64> {
        self.host
            .resource
            .duration()
            .map(|d| d.as_secs_f64())
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    fn apply_volume(&mut self) {
        let volume = self.state.volume;
        self.host.resource.set_volume(volume.gain());
        self.host.display.set_volume_icon(volume.icon());
        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: volume.level(),
            icon: volume.icon(),
        });
    }

    fn render_playlist(&mut self) {
        let active = (!self.state.tracks.is_empty()).then_some(self.state.current_index);
        self.host.view.render(&self.state.tracks, active);
    }

    fn report(&mut self, error: &PlayerError) {
        let message = match error {
            PlayerError::NoActiveTrack => self.no_track_message.clone(),
            other => other.to_string(),
        };

        warn!("{}", error);
        if matches!(error, PlayerError::NoActiveTrack) {
            self.host.display.notify(&message);
        }
        self.pending_events.push(PlayerEvent::Error { message });
    }

    fn emit_state_changed(&mut self) {
        let state = self.playback_state();
        self.pending_events.push(PlayerEvent::StateChanged { state });
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PlaylistChanged {
            length: self.state.tracks.len(),
        });
    }
}
