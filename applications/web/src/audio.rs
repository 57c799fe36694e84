//! `<audio>` element playback resource

use js_sys::Promise;
use std::time::Duration;
use tracing::warn;
use tunebox_playback::{PlaybackResource, PlayerError, Result};
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::HtmlAudioElement;

/// Drives an `<audio>` element
pub struct AudioElementResource {
    audio: HtmlAudioElement,

    // Attached to every play() promise; the browser may refuse playback
    // after the call has returned (autoplay policy, unsupported source).
    on_rejected: Closure<dyn FnMut(JsValue)>,
}

impl AudioElementResource {
    pub fn new(audio: HtmlAudioElement) -> Self {
        let on_rejected = Closure::<dyn FnMut(JsValue)>::new(|reason: JsValue| {
            warn!("playback rejected: {:?}", reason);
        });

        Self { audio, on_rejected }
    }
}

fn seconds(value: f64) -> Option<Duration> {
    (value.is_finite() && value >= 0.0).then(|| Duration::from_secs_f64(value))
}

impl PlaybackResource for AudioElementResource {
    fn load(&mut self, uri: &str) {
        self.audio.set_src(uri);
    }

    fn unload(&mut self) {
        if let Err(e) = self.audio.remove_attribute("src") {
            warn!("failed to clear audio source: {:?}", e);
        }
        self.audio.load();
    }

    fn play(&mut self) -> Result<()> {
        let promise: Promise = self
            .audio
            .play()
            .map_err(|e| PlayerError::resource(format!("{:?}", e)))?;
        // Result promise is not needed
        let _ = promise.catch(&self.on_rejected);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            warn!("failed to pause audio: {:?}", e);
        }
    }

    fn seek_to(&mut self, position: Duration) {
        self.audio.set_current_time(position.as_secs_f64());
    }

    fn set_volume(&mut self, gain: f32) {
        self.audio.set_volume(f64::from(gain));
    }

    fn current_time(&self) -> Duration {
        seconds(self.audio.current_time()).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        // NaN until metadata loads, +inf for live streams
        seconds(self.audio.duration()).filter(|d| !d.is_zero())
    }
}
