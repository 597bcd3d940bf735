//! Application state shared by all handlers.

use std::sync::Arc;

use tagsmith_core::Config;
use tagsmith_storage::Storage;
use tagsmith_tags::{LoftyTagCodec, MediaValidator, TagCodec};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub tags: Arc<dyn TagCodec>,
    /// Guards `POST /upload`: extension and size.
    pub upload_validator: MediaValidator,
    /// Guards cover images on `POST /save-tags`: content type and size.
    pub cover_validator: MediaValidator,
}

impl AppState {
    /// State with the default `lofty` codec and validators derived from `config`.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self::with_codec(config, storage, Arc::new(LoftyTagCodec::new()))
    }

    pub fn with_codec(config: Config, storage: Arc<dyn Storage>, tags: Arc<dyn TagCodec>) -> Self {
        let upload_validator = MediaValidator::new(
            config.max_upload_size_bytes(),
            config.audio_allowed_extensions().to_vec(),
            Vec::new(),
        );
        let cover_validator = MediaValidator::new(
            config.max_cover_size_bytes(),
            Vec::new(),
            config.cover_allowed_content_types().to_vec(),
        );

        Self {
            config,
            storage,
            tags,
            upload_validator,
            cover_validator,
        }
    }
}
