//! Widget wiring
//!
//! Builds the DOM host, creates the controller and translates DOM events into
//! intents and media events.

use crate::audio::AudioElementResource;
use crate::dom;
use crate::registry::ObjectUrlRegistry;
use crate::surface::{DomDisplay, DomPlaylistView, WindowPrompt};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use tunebox_playback::{
    Host, Intent, MediaEvent, PlayerConfig, PlayerEvent, PlaylistController, UploadedFile,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, File, HtmlAudioElement,
    HtmlElement, HtmlInputElement, MouseEvent,
};

/// DOM event carrying each drained [`PlayerEvent`] as JSON in `detail`
pub const PLAYER_EVENT_NAME: &str = "tunebox:event";

type Player = PlaylistController<File>;

/// Shared handle to the controller
///
/// DOM callbacks run to completion one at a time, but a handler can still
/// fire while another holds the controller (e.g. from inside a blocking
/// dialog). Such dispatches are dropped.
#[derive(Clone)]
pub struct App {
    player: Rc<RefCell<Player>>,
    document: Document,
}

impl App {
    /// Build the widget on the current page
    pub fn mount(config: PlayerConfig) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let audio: HtmlAudioElement = dom::by_id(&document, "audioPlayer")?;
        let container: Element = dom::by_id(&document, "playlistContainer")?;
        let slider: HtmlInputElement = dom::by_id(&document, "volumeSlider")?;
        slider.set_value(&config.volume.min(100).to_string());

        let host = Host {
            resource: Box::new(AudioElementResource::new(audio.clone())),
            display: Box::new(DomDisplay::new(&window, &document)?),
            view: Box::new(DomPlaylistView::new(container.clone())),
            prompt: Box::new(WindowPrompt::new(&window)),
            registry: Box::new(ObjectUrlRegistry),
        };

        let app = Self {
            player: Rc::new(RefCell::new(PlaylistController::new(config, host))),
            document,
        };
        app.forward_events();

        app.bind_controls(&slider, &container)?;
        app.bind_media(&audio)?;
        Ok(app)
    }

    /// Apply a user intent
    pub fn dispatch(&self, intent: Intent<File>) {
        let Ok(mut player) = self.player.try_borrow_mut() else {
            warn!("player busy, dropping {:?}", intent);
            return;
        };
        // Failures are already reported to the user by the controller
        if let Err(e) = player.dispatch(intent) {
            debug!("intent not applied: {}", e);
        }
        drop(player);

        self.forward_events();
    }

    fn media(&self, event: MediaEvent) {
        let Ok(mut player) = self.player.try_borrow_mut() else {
            debug!("player busy, dropping {:?}", event);
            return;
        };
        if let Err(e) = player.handle_media_event(event) {
            warn!("media event {:?} failed: {}", event, e);
        }
        drop(player);

        self.forward_events();
    }

    /// Re-publish drained controller events as DOM events
    fn forward_events(&self) {
        let events = match self.player.try_borrow_mut() {
            Ok(mut player) => player.drain_events(),
            Err(_) => return,
        };

        for event in events {
            if let Err(e) = self.emit(&event) {
                warn!("failed to publish {:?}: {:?}", event, e);
            }
        }
    }

    fn emit(&self, event: &PlayerEvent) -> Result<(), JsValue> {
        let json = serde_json::to_string(event).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&json));
        let dom_event = CustomEvent::new_with_event_init_dict(PLAYER_EVENT_NAME, &init)?;
        self.document.dispatch_event(&dom_event)?;
        Ok(())
    }

    // ===== Listeners =====

    fn bind_controls(
        &self,
        slider: &HtmlInputElement,
        container: &Element,
    ) -> Result<(), JsValue> {
        let doc = &self.document;

        self.on_click(doc, "playBtn", || Intent::TogglePlayPause)?;
        self.on_click(doc, "prevBtn", || Intent::Previous)?;
        self.on_click(doc, "nextBtn", || Intent::Next)?;
        self.on_click(doc, "themeToggle", || Intent::ToggleTheme)?;

        let progress_bar: HtmlElement = dom::by_id(doc, "progressBar")?;
        let app = self.clone();
        let bar = progress_bar.clone();
        dom::listen(&progress_bar, "click", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let width = bar.offset_width();
            if width <= 0 {
                return;
            }
            app.dispatch(Intent::Seek(f64::from(event.offset_x()) / f64::from(width)));
        })?;

        let app = self.clone();
        let input = slider.clone();
        dom::listen(slider, "input", move |_: Event| {
            match input.value().parse::<f64>() {
                Ok(value) => app.dispatch(Intent::SetVolume(value.clamp(0.0, 100.0) as u8)),
                Err(_) => warn!("ignoring volume value {:?}", input.value()),
            }
        })?;

        let file_input: HtmlInputElement = dom::by_id(doc, "fileInput")?;
        let app = self.clone();
        let input = file_input.clone();
        dom::listen(&file_input, "change", move |_: Event| {
            let files = picked_files(&input);
            debug!(count = files.len(), "files picked");
            app.dispatch(Intent::Upload(files));
        })?;

        let app = self.clone();
        dom::listen(container, "click", move |event: Event| {
            if let Some(intent) = playlist_intent(&event) {
                event.stop_propagation();
                app.dispatch(intent);
            }
        })?;

        Ok(())
    }

    fn bind_media(&self, audio: &HtmlAudioElement) -> Result<(), JsValue> {
        let signals = [
            ("timeupdate", MediaEvent::TimeAdvanced),
            ("loadedmetadata", MediaEvent::MetadataReady),
            ("ended", MediaEvent::Ended),
        ];

        for (name, signal) in signals {
            let app = self.clone();
            dom::listen(audio, name, move |_: Event| app.media(signal))?;
        }
        Ok(())
    }

    fn on_click(
        &self,
        document: &Document,
        id: &str,
        intent: fn() -> Intent<File>,
    ) -> Result<(), JsValue> {
        let element: Element = dom::by_id(document, id)?;
        let app = self.clone();
        dom::listen(&element, "click", move |_: Event| app.dispatch(intent()))
    }
}

/// Files currently selected in a file input
fn picked_files(input: &HtmlInputElement) -> Vec<UploadedFile<File>> {
    let Some(list) = input.files() else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| UploadedFile::new(file.name(), file.type_(), file))
        .collect()
}

/// Map a click inside the playlist to select or delete
fn playlist_intent(event: &Event) -> Option<Intent<File>> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let item = target.closest(".playlist-item").ok()??;
    let index = item.get_attribute("data-index")?.parse::<usize>().ok()?;

    if target.closest(".delete-btn").ok()?.is_some() {
        Some(Intent::Delete(index))
    } else if target.closest(".playlist-item-info").ok()?.is_some() {
        Some(Intent::Select(index))
    } else {
        None
    }
}
