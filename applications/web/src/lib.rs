//! Tunebox - Browser Binding
//!
//! Mounts the player widget on a page that provides the expected elements
//! (`#audioPlayer`, `#playBtn`, `#playlistContainer`, ...). Controller events
//! are re-dispatched on `document` as `tunebox:event` custom events with a
//! JSON `detail`.

mod app;
mod audio;
mod dom;
mod logging;
mod markup;
mod registry;
mod surface;

pub use app::{App, PLAYER_EVENT_NAME};
pub use markup::escape_html;

use tunebox_playback::PlayerConfig;
use wasm_bindgen::prelude::*;

/// Settings compiled into the module
const EMBEDDED_CONFIG: &str = include_str!("../player.toml");

/// Entry point, runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let config = PlayerConfig::from_toml_str(EMBEDDED_CONFIG)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mounting tunebox");

    // Listeners keep the app alive
    App::mount(config)?;
    Ok(())
}
