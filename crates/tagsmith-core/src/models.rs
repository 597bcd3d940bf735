//! Tag field set and API response bodies.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The five text tags read back from an uploaded file.
///
/// Absent tags are reported as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
}

/// Embedded front-cover image supplied with a save-tags request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Bytes,
    pub mime_type: String,
}

/// Replacement tag values. `None` leaves the existing value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub cover: Option<CoverArt>,
}

impl TagUpdate {
    /// Set a text field by its form name. Empty values count as omitted.
    ///
    /// Returns `false` if `name` is not one of the five tag fields.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "artist" => &mut self.artist,
            "album" => &mut self.album,
            "year" => &mut self.year,
            "genre" => &mut self.genre,
            _ => return false,
        };
        *slot = if value.is_empty() { None } else { Some(value) };
        true
    }

    /// Supplied text fields as `(form name, value)` pairs.
    pub fn text_fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("title", self.title.as_deref()),
            ("artist", self.artist.as_deref()),
            ("album", self.album.as_deref()),
            ("year", self.year.as_deref()),
            ("genre", self.genre.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    /// True when the update would not change the tag container.
    pub fn is_empty(&self) -> bool {
        self.cover.is_none() && self.text_fields().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub file_id: String,
    pub tags: TagFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveTagsResponse {
    pub tagged_file_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleanupResponse {
    pub status: String,
}

impl CleanupResponse {
    pub fn cleaned() -> Self {
        Self {
            status: "cleaned".to_string(),
        }
    }
}
