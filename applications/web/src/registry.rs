//! Object URL source registry

use tracing::{debug, warn};
use tunebox_playback::{PlayerError, Result, SourceRegistry, UploadedFile};
use web_sys::{File, Url};

/// Backs uploaded files with `blob:` object URLs
///
/// URLs are revoked when their track is deleted; anything still registered
/// lives until the page unloads.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry;

impl SourceRegistry<File> for ObjectUrlRegistry {
    fn register(&mut self, file: &UploadedFile<File>) -> Result<String> {
        let url = Url::create_object_url_with_blob(&file.payload)
            .map_err(|e| PlayerError::registry(format!("{}: {:?}", file.name, e)))?;
        debug!(name = %file.name, %url, "object url created");
        Ok(url)
    }

    fn release(&mut self, uri: &str) {
        match Url::revoke_object_url(uri) {
            Ok(()) => debug!(%uri, "object url revoked"),
            Err(e) => warn!(%uri, "failed to revoke object url: {:?}", e),
        }
    }
}
