//! OpenAPI documentation, served at `/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tagsmith_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tagsmith API",
        version = "0.1.0",
        description = "MP3 tag editing service. Upload a file to read its ID3 tags, save new tags and a cover image to a tagged copy, download the copy, and clean up."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::save_tags::save_tags,
        handlers::download::download_file,
        handlers::cleanup::cleanup_files,
    ),
    components(schemas(
        models::TagFields,
        models::UploadResponse,
        models::SaveTagsResponse,
        models::CleanupResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "tags", description = "Upload, tag, download and clean up MP3 files")
    )
)]
pub struct ApiDoc;
