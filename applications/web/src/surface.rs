//! DOM-backed display, playlist view and confirmation prompt

use crate::dom;
use crate::markup;
use tracing::warn;
use tunebox_playback::{
    ConfirmationPrompt, DisplaySurface, PlaylistView, Theme, Track, VolumeIcon,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

const PLAYING_CLASS: &str = "playing";
const LIGHT_THEME_CLASS: &str = "light-theme";
const ACTIVE_CLASS: &str = "active";

fn log_failure(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("failed to {}: {:?}", what, e);
    }
}

/// Track info, transport and theme elements
pub struct DomDisplay {
    window: Window,
    body: HtmlElement,
    song_title: Element,
    song_artist: Element,
    song_album: Element,
    current_time: Element,
    total_time: Element,
    progress_fill: HtmlElement,
    play_btn: Element,
    album_art: Element,
    volume_icon: Element,
    theme_toggle: Element,
}

impl DomDisplay {
    pub fn new(window: &Window, document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            window: window.clone(),
            body: document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?,
            song_title: dom::by_id(document, "songTitle")?,
            song_artist: dom::by_id(document, "songArtist")?,
            song_album: dom::by_id(document, "songAlbum")?,
            current_time: dom::by_id(document, "currentTime")?,
            total_time: dom::by_id(document, "totalTime")?,
            progress_fill: dom::by_id(document, "progressFill")?,
            play_btn: dom::by_id(document, "playBtn")?,
            album_art: dom::by_id(document, "albumArt")?,
            volume_icon: dom::by_selector(document, ".volume-icon")?,
            theme_toggle: dom::by_id(document, "themeToggle")?,
        })
    }
}

impl DisplaySurface for DomDisplay {
    fn set_track_info(&mut self, title: &str, artist: &str, album: &str) {
        self.song_title.set_text_content(Some(title));
        self.song_artist.set_text_content(Some(artist));
        self.song_album.set_text_content(Some(album));
    }

    fn set_elapsed(&mut self, text: &str) {
        self.current_time.set_text_content(Some(text));
    }

    fn set_total(&mut self, text: &str) {
        self.total_time.set_text_content(Some(text));
    }

    fn set_progress(&mut self, fraction: f64) {
        let width = format!("{}%", fraction * 100.0);
        log_failure(
            "update progress",
            self.progress_fill.style().set_property("width", &width),
        );
    }

    fn set_playing(&mut self, playing: bool) {
        let classes = self.album_art.class_list();
        if playing {
            self.play_btn.set_inner_html(markup::PAUSE_ICON);
            log_failure("mark album art playing", classes.add_1(PLAYING_CLASS));
        } else {
            self.play_btn.set_inner_html(markup::PLAY_ICON);
            log_failure("unmark album art playing", classes.remove_1(PLAYING_CLASS));
        }
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon
            .set_class_name(markup::volume_icon_class(icon));
    }

    fn set_theme(&mut self, theme: Theme) {
        let classes = self.body.class_list();
        let result = if theme.is_dark() {
            classes.remove_1(LIGHT_THEME_CLASS)
        } else {
            classes.add_1(LIGHT_THEME_CLASS)
        };
        log_failure("switch theme", result);
        self.theme_toggle
            .set_inner_html(&markup::theme_toggle(theme));
    }

    fn notify(&mut self, message: &str) {
        log_failure("show notice", self.window.alert_with_message(message));
    }
}

/// Playlist rendered into `#playlistContainer`
///
/// Clicks are handled by one delegated listener installed by the app, so
/// re-rendering never has to rebind handlers.
pub struct DomPlaylistView {
    container: Element,
}

impl DomPlaylistView {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl PlaylistView for DomPlaylistView {
    fn render(&mut self, tracks: &[Track], active: Option<usize>) {
        self.container
            .set_inner_html(&markup::playlist(tracks, active));
    }

    fn set_active(&mut self, active: Option<usize>) {
        let items = match self.container.query_selector_all(".playlist-item") {
            Ok(items) => items,
            Err(e) => {
                warn!("failed to query playlist items: {:?}", e);
                return;
            }
        };

        for i in 0..items.length() {
            let Some(item) = items.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let is_active = active == Some(i as usize);
            if let Err(e) = item
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, is_active)
            {
                warn!("failed to toggle active item: {:?}", e);
            }
        }
    }
}

/// `window.confirm` prompt
pub struct WindowPrompt {
    window: Window,
}

impl WindowPrompt {
    pub fn new(window: &Window) -> Self {
        Self {
            window: window.clone(),
        }
    }
}

impl ConfirmationPrompt for WindowPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.window
            .confirm_with_message(message)
            .unwrap_or_else(|e| {
                warn!("confirm dialog failed: {:?}", e);
                false
            })
    }
}
