//! Integration tests for the playlist controller
//!
//! These tests drive the controller through its public intents and verify
//! what the injected collaborators were told.


use std::time::Duration;
use test_helpers::*;
use tunebox_playback::{
    Intent, MediaEvent, PlaybackState, PlayerConfig, PlayerError, PlayerEvent, PlaylistEntry,
    Theme, TrackSource, VolumeIcon,
};

// ===== Initialization =====

#[test]
fn initialize_loads_first_track_paused() {
    let h = Harness::with_tracks(4);

    assert_eq!(h.player.current_index(), 0);
    assert!(!h.player.is_playing());
    assert_eq!(h.player.playback_state(), PlaybackState::Paused);

    let rec = h.rec();
    assert_eq!(rec.loaded.as_deref(), Some("assets/track0.mp3"));
    assert_eq!(rec.play_calls, 0);
    assert_eq!(rec.title, "Track 0");
    assert_eq!(rec.artist, "Artist 0");
    assert_eq!(rec.album, "Test Album");
    assert_eq!(rec.gain, Some(0.5));
    assert_eq!(rec.volume_icon, Some(VolumeIcon::Full));
    assert_eq!(rec.theme, Some(Theme::Dark));
    assert_eq!(rec.rendered_titles.len(), 4);
    assert_eq!(rec.active, Some(0));
}

#[test]
fn initialize_with_empty_playlist_stays_idle() {
    let h = Harness::with_tracks(0);

    assert_eq!(h.player.playback_state(), PlaybackState::Idle);
    assert_eq!(h.rec().loaded, None);
    assert_eq!(h.rec().active, None);
}

#[test]
fn default_config_seeds_built_in_playlist() {
    let h = Harness::new(PlayerConfig::default());

    assert_eq!(h.player.tracks().len(), 4);
    assert_eq!(h.rec().title, "Phir kabhi");
    assert_eq!(h.rec().loaded.as_deref(), Some("assets/kabhi.mp3"));
}

// ===== Transport =====

#[test]
fn toggle_play_pause_commands_resource() {
    let mut h = Harness::with_tracks(2);

    h.player.dispatch(Intent::TogglePlayPause).unwrap();
    assert!(h.player.is_playing());
    assert_eq!(h.player.playback_state(), PlaybackState::Playing);
    assert!(h.rec().resource_playing);
    assert_eq!(h.rec().playing_indicator, Some(true));

    h.player.dispatch(Intent::TogglePlayPause).unwrap();
    assert!(!h.player.is_playing());
    assert!(!h.rec().resource_playing);
    assert_eq!(h.rec().playing_indicator, Some(false));
}

#[test]
fn toggle_with_nothing_loaded_reports_no_active_track() {
    let mut h = Harness::with_tracks(0);

    let result = h.player.dispatch(Intent::TogglePlayPause);

    assert!(matches!(result, Err(PlayerError::NoActiveTrack)));
    assert!(!h.player.is_playing());
    assert_eq!(h.player.playback_state(), PlaybackState::Idle);
    assert_eq!(h.rec().notices, vec!["Please upload audio files first!"]);
    assert_eq!(h.rec().play_calls, 0);

    let events = h.player.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::Error { .. })));
}

#[test]
fn play_and_pause_intents_from_idle_fail() {
    let mut h = Harness::with_tracks(0);

    assert!(matches!(
        h.player.dispatch(Intent::Play),
        Err(PlayerError::NoActiveTrack)
    ));
    assert!(matches!(
        h.player.dispatch(Intent::Pause),
        Err(PlayerError::NoActiveTrack)
    ));
    assert_eq!(h.rec().notices.len(), 2);
}

#[test]
fn rejected_play_leaves_player_paused() {
    let mut h = Harness::with_tracks(2);
    h.rec_mut().fail_play = true;

    let result = h.player.dispatch(Intent::Play);

    assert!(matches!(result, Err(PlayerError::Resource(_))));
    assert!(!h.player.is_playing());
    // Only NoActiveTrack is shown as a blocking notice
    assert!(h.rec().notices.is_empty());
}

#[test]
fn switching_tracks_while_playing_keeps_playing() {
    let mut h = Harness::with_tracks(3);
    h.player.dispatch(Intent::Play).unwrap();

    h.player.dispatch(Intent::Next).unwrap();

    assert!(h.player.is_playing());
    assert_eq!(h.player.current_index(), 1);
    let rec = h.rec();
    assert_eq!(rec.loaded.as_deref(), Some("assets/track1.mp3"));
    assert!(rec.resource_playing);
    assert_eq!(rec.play_calls, 2);
    assert_eq!(rec.active, Some(1));
}

#[test]
fn switching_tracks_while_paused_stays_paused() {
    let mut h = Harness::with_tracks(3);

    h.player.dispatch(Intent::Select(2)).unwrap();

    assert!(!h.player.is_playing());
    assert_eq!(h.player.current_index(), 2);
    assert_eq!(h.rec().play_calls, 0);
    assert_eq!(h.rec().title, "Track 2");
    assert_eq!(h.rec().playing_indicator, Some(false));
}

#[test]
fn select_out_of_range_is_ignored() {
    let mut h = Harness::with_tracks(3);
    h.player.dispatch(Intent::Select(1)).unwrap();

    h.player.dispatch(Intent::Select(3)).unwrap();
    h.player.dispatch(Intent::Select(usize::MAX)).unwrap();

    assert_eq!(h.player.current_index(), 1);
    assert_eq!(h.rec().loaded.as_deref(), Some("assets/track1.mp3"));
}

#[test]
fn next_three_times_then_wraps() {
    let mut h = Harness::with_tracks(4);

    for _ in 0..3 {
        h.player.dispatch(Intent::Next).unwrap();
    }
    assert_eq!(h.player.current_index(), 3);

    h.player.dispatch(Intent::Next).unwrap();
    assert_eq!(h.player.current_index(), 0);
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut h = Harness::with_tracks(4);

    h.player.dispatch(Intent::Previous).unwrap();

    assert_eq!(h.player.current_index(), 3);
    assert_eq!(h.rec().title, "Track 3");
}

#[test]
fn ended_signal_advances_to_next_track() {
    let mut h = Harness::with_tracks(2);
    h.player.dispatch(Intent::Select(1)).unwrap();
    h.player.dispatch(Intent::Play).unwrap();

    h.player.handle_media_event(MediaEvent::Ended).unwrap();

    assert_eq!(h.player.current_index(), 0);
    assert!(h.player.is_playing());
    assert_eq!(h.rec().loaded.as_deref(), Some("assets/track0.mp3"));
}

// ===== Seek & Progress =====

#[test]
fn seek_maps_fraction_to_duration() {
    let mut h = Harness::with_tracks(1);
    h.rec_mut().duration = Some(Duration::from_secs(200));

    h.player.dispatch(Intent::Seek(0.25)).unwrap();
    h.player.dispatch(Intent::Seek(1.5)).unwrap();

    assert_eq!(
        h.rec().seeks,
        vec![Duration::from_secs(50), Duration::from_secs(200)]
    );
}

#[test]
fn seek_with_zero_duration_is_ignored() {
    let mut h = Harness::with_tracks(1);
    h.rec_mut().duration = Some(Duration::ZERO);

    h.player.dispatch(Intent::Seek(0.5)).unwrap();
    h.player.handle_media_event(MediaEvent::TimeAdvanced).unwrap();

    assert!(h.rec().seeks.is_empty());
    assert_eq!(h.rec().progress, None);
}

#[test]
fn seek_before_metadata_is_ignored() {
    let mut h = Harness::with_tracks(1);

    h.player.dispatch(Intent::Seek(0.5)).unwrap();

    assert!(h.rec().seeks.is_empty());
}

#[test]
fn seek_with_nothing_loaded_is_ignored() {
    let mut h = Harness::with_tracks(0);
    h.rec_mut().duration = Some(Duration::from_secs(100));

    h.player.dispatch(Intent::Seek(0.5)).unwrap();

    assert!(h.rec().seeks.is_empty());
}

#[test]
fn time_advanced_updates_progress_and_elapsed() {
    let mut h = Harness::with_tracks(1);
    {
        let mut rec = h.rec_mut();
        rec.duration = Some(Duration::from_secs(200));
        rec.current_time = Duration::from_secs_f64(125.9);
    }

    h.player.handle_media_event(MediaEvent::TimeAdvanced).unwrap();

    let rec = h.rec();
    assert_eq!(rec.elapsed, "2:05");
    let progress = rec.progress.unwrap();
    assert!((progress - 0.6295).abs() < 1e-9);
}

#[test]
fn time_advanced_without_duration_is_noop() {
    let mut h = Harness::with_tracks(1);
    h.rec_mut().current_time = Duration::from_secs(10);

    h.player.handle_media_event(MediaEvent::TimeAdvanced).unwrap();

    assert_eq!(h.rec().progress, None);
    assert_eq!(h.rec().elapsed, "");
}

#[test]
fn metadata_ready_sets_total_time() {
    let mut h = Harness::with_tracks(1);
    h.rec_mut().duration = Some(Duration::from_secs_f64(59.99));

    h.player.handle_media_event(MediaEvent::MetadataReady).unwrap();

    assert_eq!(h.rec().total, "0:59");
}

// ===== Volume & Theme =====

#[test]
fn volume_icon_thresholds() {
    let mut h = Harness::with_tracks(1);

    h.player.dispatch(Intent::SetVolume(0)).unwrap();
    assert_eq!(h.rec().volume_icon, Some(VolumeIcon::Muted));
    assert_eq!(h.rec().gain, Some(0.0));

    h.player.dispatch(Intent::SetVolume(49)).unwrap();
    assert_eq!(h.rec().volume_icon, Some(VolumeIcon::Low));

    h.player.dispatch(Intent::SetVolume(50)).unwrap();
    assert_eq!(h.rec().volume_icon, Some(VolumeIcon::Full));

    h.player.dispatch(Intent::SetVolume(100)).unwrap();
    assert_eq!(h.rec().volume_icon, Some(VolumeIcon::Full));
    assert_eq!(h.rec().gain, Some(1.0));
}

#[test]
fn set_volume_does_not_touch_playlist() {
    let mut h = Harness::with_tracks(3);
    h.player.dispatch(Intent::Select(2)).unwrap();
    let renders = h.rec().renders;

    h.player.dispatch(Intent::SetVolume(20)).unwrap();

    assert_eq!(h.player.tracks().len(), 3);
    assert_eq!(h.player.current_index(), 2);
    assert_eq!(h.player.volume(), 20);
    assert_eq!(h.rec().renders, renders);
}

#[test]
fn toggle_theme_flips_display_mode() {
    let mut h = Harness::with_tracks(1);

    h.player.dispatch(Intent::ToggleTheme).unwrap();
    assert_eq!(h.player.theme(), Theme::Light);
    assert_eq!(h.rec().theme, Some(Theme::Light));

    h.player.dispatch(Intent::ToggleTheme).unwrap();
    assert_eq!(h.player.theme(), Theme::Dark);
    assert_eq!(h.rec().theme, Some(Theme::Dark));
    assert!(!h.player.is_playing());
}

// ===== Uploads =====

#[test]
fn upload_appends_only_audio_files() {
    let mut h = Harness::with_tracks(2);
    let renders = h.rec().renders;

    h.player
        .dispatch(Intent::Upload(vec![
            audio_file("song.final.mp3"),
            image_file("cover.png"),
        ]))
        .unwrap();

    let tracks = h.player.tracks();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[2].title, "song.final");
    assert_eq!(tracks[2].artist, "Unknown Artist");
    assert_eq!(tracks[2].album, "Unknown Album");
    assert!(matches!(tracks[2].source, Some(TrackSource::Ephemeral(_))));

    let rec = h.rec();
    assert_eq!(rec.registered.len(), 1);
    assert_eq!(rec.renders, renders + 1);
    assert_eq!(rec.rendered_titles.last().map(String::as_str), Some("song.final"));
}

#[test]
fn upload_preserves_input_order_and_does_not_select() {
    let mut h = Harness::with_tracks(2);
    h.player.dispatch(Intent::Play).unwrap();

    let added = h
        .player
        .add_uploaded_files(vec![audio_file("b.mp3"), audio_file("a.flac")])
        .unwrap();

    assert_eq!(added, 2);
    assert_eq!(h.player.tracks()[2].title, "b");
    assert_eq!(h.player.tracks()[3].title, "a");
    assert_eq!(h.player.current_index(), 0);
    assert_eq!(h.rec().loaded.as_deref(), Some("assets/track0.mp3"));
    assert_eq!(h.rec().play_calls, 1);
}

#[test]
fn upload_skips_files_the_registry_rejects() {
    let mut h = Harness::with_tracks(2);
    let empty = tunebox_playback::UploadedFile::new("empty.mp3", "audio/mpeg", Vec::new());

    let added = h
        .player
        .add_uploaded_files(vec![empty, audio_file("ok.mp3")])
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(h.player.tracks().len(), 3);
}

#[test]
fn upload_into_single_track_playlist_appends_by_default() {
    let mut h = Harness::with_tracks(1);

    h.player
        .dispatch(Intent::Upload(vec![audio_file("new.mp3")]))
        .unwrap();

    assert_eq!(h.player.tracks().len(), 2);
}

#[test]
fn single_track_reload_quirk_when_enabled() {
    let mut h = Harness::new(PlayerConfig {
        reload_on_single_track_upload: true,
        ..config_with_tracks(1)
    });
    let loads_before = h.rec().load_history.len();

    let added = h
        .player
        .add_uploaded_files(vec![audio_file("new.mp3")])
        .unwrap();

    assert_eq!(added, 0);
    assert_eq!(h.player.tracks().len(), 1);
    assert_eq!(h.rec().load_history.len(), loads_before + 1);
    assert!(h.rec().registered.is_empty());
}

#[test]
fn upload_into_empty_playlist_does_not_autoload() {
    let mut h = Harness::with_tracks(0);

    h.player
        .dispatch(Intent::Upload(vec![audio_file("first.mp3")]))
        .unwrap();

    assert_eq!(h.player.tracks().len(), 1);
    assert_eq!(h.player.playback_state(), PlaybackState::Idle);

    // Selecting it loads the ephemeral source
    h.player.dispatch(Intent::Select(0)).unwrap();
    let uri = h.rec().registered[0].clone();
    assert_eq!(h.rec().loaded, Some(uri));
    assert_eq!(h.player.playback_state(), PlaybackState::Paused);
}

// ===== Deletion =====

#[test]
fn delete_requires_confirmation() {
    let mut h = Harness::with_tracks(3);
    h.rec_mut().confirm_answer = false;

    let removed = h.player.delete_track(1).unwrap();

    assert!(removed.is_none());
    assert_eq!(h.player.tracks().len(), 3);
    assert_eq!(
        h.rec().prompts,
        vec!["Are you sure you want to delete this song?"]
    );
}

#[test]
fn delete_out_of_range_does_not_prompt() {
    let mut h = Harness::with_tracks(2);

    assert!(h.player.delete_track(5).unwrap().is_none());
    assert!(h.rec().prompts.is_empty());
}

#[test]
fn delete_before_current_keeps_same_track_selected() {
    let mut h = Harness::with_tracks(4);
    h.player.dispatch(Intent::Select(2)).unwrap();
    h.player.dispatch(Intent::Play).unwrap();

    let removed = h.player.delete_track(0).unwrap().unwrap();

    assert_eq!(removed.title, "Track 0");
    assert_eq!(h.player.current_index(), 1);
    assert_eq!(h.player.current_track().unwrap().title, "Track 2");
    assert!(h.player.is_playing());
    assert_eq!(h.rec().active, Some(1));
}

#[test]
fn delete_after_current_leaves_index_unchanged() {
    let mut h = Harness::with_tracks(4);
    h.player.dispatch(Intent::Select(1)).unwrap();

    h.player.dispatch(Intent::Delete(3)).unwrap();

    assert_eq!(h.player.current_index(), 1);
    assert_eq!(h.player.tracks().len(), 3);
    assert_eq!(h.rec().rendered_titles, vec!["Track 0", "Track 1", "Track 2"]);
}

#[test]
fn delete_current_playing_track_stops_and_loads_next_paused() {
    let mut h = Harness::with_tracks(3);
    h.player.dispatch(Intent::Select(1)).unwrap();
    h.player.dispatch(Intent::Play).unwrap();

    h.player.dispatch(Intent::Delete(1)).unwrap();

    assert!(!h.player.is_playing());
    assert_eq!(h.player.playback_state(), PlaybackState::Paused);
    assert_eq!(h.player.current_index(), 1);
    let rec = h.rec();
    assert_eq!(rec.title, "Track 2");
    assert_eq!(rec.loaded.as_deref(), Some("assets/track2.mp3"));
    assert!(!rec.resource_playing);
    assert_eq!(rec.pause_calls, 1);
}

#[test]
fn delete_current_last_track_clamps_to_first() {
    let mut h = Harness::with_tracks(3);
    h.player.dispatch(Intent::Select(2)).unwrap();

    h.player.dispatch(Intent::Delete(2)).unwrap();

    assert_eq!(h.player.current_index(), 0);
    assert_eq!(h.rec().title, "Track 0");
}

#[test]
fn delete_sole_track_empties_playlist() {
    let mut h = Harness::with_tracks(1);
    h.player.dispatch(Intent::Play).unwrap();

    h.player.dispatch(Intent::Delete(0)).unwrap();

    assert!(h.player.tracks().is_empty());
    assert_eq!(h.player.current_index(), 0);
    assert!(!h.player.is_playing());
    assert_eq!(h.player.playback_state(), PlaybackState::Idle);

    let rec = h.rec();
    assert_eq!(rec.title, "Select a Song");
    assert_eq!(rec.artist, "Unknown Artist");
    assert_eq!(rec.album, "Unknown Album");
    assert_eq!(rec.loaded, None);
    assert_eq!(rec.unloads, 1);
    assert_eq!(rec.active, None);
}

#[test]
fn play_after_emptying_playlist_reports_no_active_track() {
    let mut h = Harness::with_tracks(1);
    h.player.dispatch(Intent::Delete(0)).unwrap();

    let result = h.player.dispatch(Intent::TogglePlayPause);

    assert!(matches!(result, Err(PlayerError::NoActiveTrack)));
}

#[test]
fn delete_releases_ephemeral_sources_only() {
    let mut h = Harness::with_tracks(2);
    h.player
        .dispatch(Intent::Upload(vec![audio_file("upload.mp3")]))
        .unwrap();
    let uri = h.rec().registered[0].clone();

    h.player.dispatch(Intent::Delete(0)).unwrap();
    assert!(h.rec().released.is_empty());

    // Upload is now at index 1
    h.player.dispatch(Intent::Delete(1)).unwrap();
    assert_eq!(h.rec().released, vec![uri]);
}

#[test]
fn deleting_loaded_upload_next_to_sourceless_track_unloads_it() {
    let mut h = Harness::new(PlayerConfig {
        playlist: vec![PlaylistEntry {
            title: "Placeholder".to_string(),
            artist: "Nobody".to_string(),
            album: "None".to_string(),
            src: None,
        }],
        ..PlayerConfig::default()
    });
    h.player
        .dispatch(Intent::Upload(vec![audio_file("u.mp3")]))
        .unwrap();
    h.player.dispatch(Intent::Select(1)).unwrap();
    let uri = h.rec().registered[0].clone();
    assert_eq!(h.rec().loaded, Some(uri.clone()));

    h.player.dispatch(Intent::Delete(1)).unwrap();

    assert_eq!(h.player.current_index(), 0);
    assert_eq!(h.player.playback_state(), PlaybackState::Idle);
    assert_eq!(h.player.state().loaded_source, None);
    {
        let rec = h.rec();
        assert_eq!(rec.released, vec![uri]);
        assert_eq!(rec.loaded, None);
        assert_eq!(rec.unloads, 1);
    }

    let result = h.player.dispatch(Intent::TogglePlayPause);
    assert!(matches!(result, Err(PlayerError::NoActiveTrack)));
    assert!(!h.player.is_playing());
    assert_eq!(h.rec().play_calls, 0);
}

// ===== Events =====

#[test]
fn playlist_edits_emit_events() {
    let mut h = Harness::with_tracks(2);
    h.player.drain_events();

    h.player
        .dispatch(Intent::Upload(vec![audio_file("x.mp3")]))
        .unwrap();
    h.player.dispatch(Intent::Delete(2)).unwrap();

    let lengths: Vec<usize> = h
        .player
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::PlaylistChanged { length } => Some(length),
            _ => None,
        })
        .collect();
    assert_eq!(lengths, vec![3, 2]);
}

#[test]
fn transport_emits_state_changes() {
    let mut h = Harness::with_tracks(2);
    h.player.drain_events();

    h.player.dispatch(Intent::TogglePlayPause).unwrap();
    h.player.dispatch(Intent::TogglePlayPause).unwrap();

    let states: Vec<PlaybackState> = h
        .player
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::StateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(states, vec![PlaybackState::Playing, PlaybackState::Paused]);
}
