//! Turning picked files into playlist entries

use crate::error::{PlayerError, Result};
use crate::host::SourceRegistry;
use crate::types::{Track, TrackSource, UploadedFile, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use std::collections::HashMap;
use uuid::Uuid;

/// Whether a declared media type is audio
pub fn is_audio(media_type: &str) -> bool {
    media_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("audio/"))
}

/// File name without its final extension
///
/// `"song.final.mp3"` becomes `"song.final"`. A trailing dot or a dot inside a
/// directory component is not an extension.
pub fn title_from_filename(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}

/// Build a playlist entry for an uploaded file backed by `uri`
pub fn track_from_upload<F>(file: &UploadedFile<F>, uri: String) -> Track {
    Track {
        id: Uuid::new_v4(),
        title: title_from_filename(&file.name).to_string(),
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
        source: Some(TrackSource::Ephemeral(uri)),
    }
}

const MEMORY_SCHEME: &str = "mem://";

/// Source registry holding uploaded bytes in memory
///
/// URIs have the form `mem://<uuid>` and stay valid until released.
#[derive(Debug, Default)]
pub struct InMemorySourceRegistry {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemorySourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a registered URI
    pub fn get(&self, uri: &str) -> Option<&[u8]> {
        self.entries.get(uri).map(Vec::as_slice)
    }

    /// Number of live references
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SourceRegistry<Vec<u8>> for InMemorySourceRegistry {
    fn register(&mut self, file: &UploadedFile<Vec<u8>>) -> Result<String> {
        if file.payload.is_empty() {
            return Err(PlayerError::registry(format!("{} is empty", file.name)));
        }

        let uri = format!("{}{}", MEMORY_SCHEME, Uuid::new_v4());
        self.entries.insert(uri.clone(), file.payload.clone());
        Ok(uri)
    }

    fn release(&mut self, uri: &str) {
        self.entries.remove(uri);
    }
}
