//! `TagCodec` implementation backed by `lofty`.
//!
//! Files are always probed as MPEG audio, whatever their name, and tags are
//! written to the ID3v2 container.

use std::io::Cursor;
use std::path::Path;

use lofty::config::{ParseOptions, ParsingMode, WriteOptions};
use lofty::file::{FileType, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagType};
use tagsmith_core::{TagFields, TagUpdate};

use crate::codec::{TagCodec, TagError, TagResult};

/// Description stored with every embedded cover.
pub const COVER_DESCRIPTION: &str = "Cover";

#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagCodec;

impl LoftyTagCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Form field name → ID3v2 item key (TIT2, TPE1, TALB, TDRC, TCON).
fn field_to_item_key(field: &str) -> Option<ItemKey> {
    match field {
        "title" => Some(ItemKey::TrackTitle),
        "artist" => Some(ItemKey::TrackArtist),
        "album" => Some(ItemKey::AlbumTitle),
        "year" => Some(ItemKey::RecordingDate),
        "genre" => Some(ItemKey::Genre),
        _ => None,
    }
}

fn parse_options(read_cover_art: bool) -> ParseOptions {
    ParseOptions::new()
        .read_cover_art(read_cover_art)
        .parsing_mode(ParsingMode::BestAttempt)
}

fn get_field(tag: &Tag, field: &str) -> String {
    let value = field_to_item_key(field).and_then(|key| tag.get_string(&key));
    let value = match (value, field) {
        (None, "year") => tag.get_string(&ItemKey::Year),
        (value, _) => value,
    };
    value.unwrap_or_default().to_string()
}

/// Media type from a request's Content-Type, parameters stripped.
fn mime_type_from_content_type(content_type: &str) -> MimeType {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase();

    match essence.as_str() {
        "image/jpeg" | "image/jpg" => MimeType::Jpeg,
        "image/png" => MimeType::Png,
        "image/gif" => MimeType::Gif,
        "image/bmp" => MimeType::Bmp,
        "image/tiff" => MimeType::Tiff,
        _ => MimeType::Unknown(essence),
    }
}

fn cover_picture(data: Vec<u8>, content_type: &str) -> Picture {
    Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime_type_from_content_type(content_type)),
        Some(COVER_DESCRIPTION.into()),
        data,
    )
}

/// ID3v2 tag seeded with the items and pictures of another container, so
/// fields that only exist in e.g. an ID3v1 trailer survive a partial update.
fn id3v2_from(existing: Option<&Tag>) -> Tag {
    let mut id3v2 = Tag::new(TagType::Id3v2);
    if let Some(existing) = existing {
        for item in existing.items() {
            id3v2.insert(item.clone());
        }
        for picture in existing.pictures() {
            id3v2.push_picture(picture.clone());
        }
    }
    id3v2
}

impl TagCodec for LoftyTagCodec {
    fn read_tags(&self, data: &[u8]) -> TagResult<TagFields> {
        let tagged_file = Probe::new(Cursor::new(data))
            .set_file_type(FileType::Mpeg)
            .options(parse_options(false))
            .read()
            .map_err(|e| TagError::Read(e.to_string()))?;

        let Some(tag) = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
        else {
            tracing::debug!(size_bytes = data.len(), "No tag container found");
            return Ok(TagFields::default());
        };

        Ok(TagFields {
            title: get_field(tag, "title"),
            artist: get_field(tag, "artist"),
            album: get_field(tag, "album"),
            year: get_field(tag, "year"),
            genre: get_field(tag, "genre"),
        })
    }

    fn write_tags(&self, path: &Path, update: &TagUpdate) -> TagResult<()> {
        // Cover art must be read so existing pictures survive the rewrite.
        let mut tagged_file = Probe::open(path)
            .map_err(|e| TagError::Read(format!("Failed to open: {e}")))?
            .set_file_type(FileType::Mpeg)
            .options(parse_options(true))
            .read()
            .map_err(|e| TagError::Read(e.to_string()))?;

        if update.is_empty() {
            tracing::debug!(path = %path.display(), "No tag changes requested");
            return Ok(());
        }

        if tagged_file.tag(TagType::Id3v2).is_none() {
            let seeded = id3v2_from(tagged_file.first_tag());
            tracing::debug!(
                path = %path.display(),
                seeded_items = seeded.len(),
                "Creating ID3v2 tag"
            );
            tagged_file.insert_tag(seeded);
        }
        let tag = tagged_file.tag_mut(TagType::Id3v2).ok_or_else(|| {
            TagError::Unsupported("File does not support ID3v2 tags".to_string())
        })?;

        let mut fields_written = Vec::new();
        for (field, value) in update.text_fields() {
            let Some(key) = field_to_item_key(field) else {
                continue;
            };
            tag.insert_text(key, value.to_string());
            fields_written.push(field);
        }

        if let Some(cover) = &update.cover {
            tag.remove_picture_type(PictureType::CoverFront);
            tag.push_picture(cover_picture(cover.data.to_vec(), &cover.mime_type));
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| TagError::Write(format!("Failed to write ID3v2 tag: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            fields = ?fields_written,
            cover = update.cover.is_some(),
            "ID3v2 tag written"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tagsmith_core::CoverArt;

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding.
    const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const FRAME_LEN: usize = 417;

    fn minimal_mp3() -> Vec<u8> {
        let mut data = Vec::with_capacity(FRAME_LEN * 20);
        for _ in 0..20 {
            let mut frame = vec![0u8; FRAME_LEN];
            frame[..4].copy_from_slice(&FRAME_HEADER);
            data.extend_from_slice(&frame);
        }
        data
    }

    /// Bytes following a leading ID3v2 tag, or the whole input if untagged.
    fn strip_id3v2(data: &[u8]) -> &[u8] {
        if data.len() < 10 || &data[..3] != b"ID3" {
            return data;
        }
        let size = data[6..10]
            .iter()
            .fold(0usize, |acc, b| (acc << 7) | (*b as usize & 0x7F));
        let footer = if data[5] & 0x10 != 0 { 10 } else { 0 };
        &data[10 + size + footer..]
    }

    fn write_temp_mp3(dir: &tempfile::TempDir, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("track.mp3");
        std::fs::write(&path, data).unwrap();
        path
    }

    fn update_with(fields: &[(&str, &str)]) -> TagUpdate {
        let mut update = TagUpdate::default();
        for (name, value) in fields {
            assert!(update.set_field(name, value.to_string()));
        }
        update
    }

    fn write_id3v1(path: &Path, fields: &[(ItemKey, &str)]) {
        let mut tag = Tag::new(TagType::Id3v1);
        for (key, value) in fields {
            tag.insert_text(key.clone(), value.to_string());
        }
        tag.save_to_path(path, WriteOptions::default()).unwrap();
    }

    fn read_file_tags(path: &Path) -> TagFields {
        LoftyTagCodec::new()
            .read_tags(&std::fs::read(path).unwrap())
            .unwrap()
    }

    #[test]
    fn test_read_untagged_file_yields_empty_fields() {
        let tags = LoftyTagCodec::new().read_tags(&minimal_mp3()).unwrap();
        assert_eq!(tags, TagFields::default());
    }

    #[test]
    fn test_read_rejects_non_audio() {
        let codec = LoftyTagCodec::new();
        assert!(matches!(
            codec.read_tags(b"definitely not an mp3 file"),
            Err(TagError::Read(_))
        ));
        assert!(codec.read_tags(&[]).is_err());
    }

    #[test]
    fn test_write_then_read_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_mp3(&dir, &minimal_mp3());

        let update = update_with(&[
            ("title", "Song"),
            ("artist", "Artist"),
            ("album", "Album"),
            ("year", "2001"),
            ("genre", "Rock"),
        ]);
        LoftyTagCodec::new().write_tags(&path, &update).unwrap();

        assert_eq!(
            read_file_tags(&path),
            TagFields {
                title: "Song".to_string(),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                year: "2001".to_string(),
                genre: "Rock".to_string(),
            }
        );
    }

    #[test]
    fn test_omitted_fields_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_mp3(&dir, &minimal_mp3());
        let codec = LoftyTagCodec::new();

        codec
            .write_tags(&path, &update_with(&[("title", "A"), ("artist", "B")]))
            .unwrap();
        codec
            .write_tags(&path, &update_with(&[("album", "C"), ("artist", "")]))
            .unwrap();

        let tags = read_file_tags(&path);
        assert_eq!(tags.title, "A");
        assert_eq!(tags.artist, "B");
        assert_eq!(tags.album, "C");
    }

    #[test]
    fn test_id3v1_fields_survive_partial_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_mp3(&dir, &minimal_mp3());
        write_id3v1(
            &path,
            &[(ItemKey::TrackTitle, "A"), (ItemKey::TrackArtist, "B")],
        );

        let before = read_file_tags(&path);
        assert_eq!(before.title, "A");
        assert_eq!(before.artist, "B");

        LoftyTagCodec::new()
            .write_tags(&path, &update_with(&[("album", "C")]))
            .unwrap();

        let after = read_file_tags(&path);
        assert_eq!(after.title, "A");
        assert_eq!(after.artist, "B");
        assert_eq!(after.album, "C");

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert!(tagged_file.tag(TagType::Id3v2).is_some());
    }

    #[test]
    fn test_audio_payload_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let original = minimal_mp3();
        let path = write_temp_mp3(&dir, &original);

        LoftyTagCodec::new()
            .write_tags(&path, &update_with(&[("title", "Song")]))
            .unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[..3], b"ID3");
        assert_eq!(strip_id3v2(&written), original.as_slice());
    }

    #[test]
    fn test_empty_update_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let original = minimal_mp3();
        let path = write_temp_mp3(&dir, &original);

        LoftyTagCodec::new()
            .write_tags(&path, &TagUpdate::default())
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_write_rejects_non_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_mp3(&dir, b"garbage bytes that are not mpeg");

        let result = LoftyTagCodec::new().write_tags(&path, &update_with(&[("title", "x")]));
        assert!(matches!(result, Err(TagError::Read(_))));
    }

    #[test]
    fn test_cover_is_embedded_and_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_mp3(&dir, &minimal_mp3());
        let codec = LoftyTagCodec::new();

        let mut update = TagUpdate::default();
        update.cover = Some(CoverArt {
            data: Bytes::from_static(b"first cover"),
            mime_type: "image/png".to_string(),
        });
        codec.write_tags(&path, &update).unwrap();

        update.cover = Some(CoverArt {
            data: Bytes::from_static(b"second cover"),
            mime_type: "image/jpeg".to_string(),
        });
        codec.write_tags(&path, &update).unwrap();

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        let tag = tagged_file.tag(TagType::Id3v2).unwrap();
        let covers: Vec<_> = tag
            .pictures()
            .iter()
            .filter(|p| p.pic_type() == PictureType::CoverFront)
            .collect();

        assert_eq!(covers.len(), 1);
        assert_eq!(covers[0].data(), b"second cover");
        assert_eq!(covers[0].mime_type(), Some(&MimeType::Jpeg));
        assert_eq!(covers[0].description(), Some(COVER_DESCRIPTION));
    }

    #[test]
    fn test_mime_type_mapping() {
        assert_eq!(mime_type_from_content_type("image/png"), MimeType::Png);
        assert_eq!(
            mime_type_from_content_type("IMAGE/JPEG; charset=binary"),
            MimeType::Jpeg
        );
        assert_eq!(
            mime_type_from_content_type("image/webp"),
            MimeType::Unknown("image/webp".to_string())
        );
    }
}
