//! Test fixtures: synthesized MP3 streams, tag inspection, and a cover image.

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{FileType, TaggedFileExt};
use lofty::picture::{MimeType, PictureType};
use lofty::prelude::TagExt;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagType};
use std::io::Cursor;
use tagsmith_core::{TagFields, TagUpdate};
use tagsmith_tags::{LoftyTagCodec, TagCodec};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

/// Untagged MP3 of `frames` silent frames. The frame index is written into
/// each frame body so distinct fixtures have distinct payloads.
pub fn create_mp3(frames: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_LEN * frames);
    for i in 0..frames {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&FRAME_HEADER);
        frame[FRAME_LEN - 1] = (i % 251) as u8;
        data.extend_from_slice(&frame);
    }
    data
}

pub fn create_minimal_mp3() -> Vec<u8> {
    create_mp3(20)
}

/// Minimal MP3 carrying an ID3v2 tag with the given fields.
pub fn create_tagged_mp3(fields: &[(&str, &str)]) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("fixture.mp3");
    std::fs::write(&path, create_minimal_mp3()).expect("Failed to write fixture");

    let mut update = TagUpdate::default();
    for (name, value) in fields {
        assert!(update.set_field(name, value.to_string()), "unknown field {}", name);
    }
    LoftyTagCodec::new()
        .write_tags(&path, &update)
        .expect("Failed to tag fixture");

    std::fs::read(&path).expect("Failed to read fixture")
}

/// Minimal MP3 carrying only an ID3v1 trailer with the given title and artist.
pub fn create_id3v1_mp3(title: &str, artist: &str) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("fixture.mp3");
    std::fs::write(&path, create_minimal_mp3()).expect("Failed to write fixture");

    let mut tag = Tag::new(TagType::Id3v1);
    tag.insert_text(ItemKey::TrackTitle, title.to_string());
    tag.insert_text(ItemKey::TrackArtist, artist.to_string());
    tag.save_to_path(&path, WriteOptions::default())
        .expect("Failed to write ID3v1 tag");

    let data = std::fs::read(&path).expect("Failed to read fixture");
    assert_eq!(&data[data.len() - 128..data.len() - 125], b"TAG");
    data
}

/// Text tags embedded in an MP3 byte stream.
pub fn read_tags(data: &[u8]) -> TagFields {
    LoftyTagCodec::new()
        .read_tags(data)
        .expect("Failed to read tags")
}

/// Front covers embedded in an MP3 byte stream, as (mime type, description, data).
pub fn read_covers(data: &[u8]) -> Vec<(Option<MimeType>, Option<String>, Vec<u8>)> {
    let tagged_file = Probe::new(Cursor::new(data))
        .set_file_type(FileType::Mpeg)
        .options(ParseOptions::new().read_cover_art(true))
        .read()
        .expect("Failed to parse MP3");

    tagged_file
        .tag(TagType::Id3v2)
        .map(|tag| {
            tag.pictures()
                .iter()
                .filter(|p| p.pic_type() == PictureType::CoverFront)
                .map(|p| {
                    (
                        p.mime_type().cloned(),
                        p.description().map(str::to_string),
                        p.data().to_vec(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Bytes following a leading ID3v2 tag, or the whole input if untagged.
pub fn strip_id3v2(data: &[u8]) -> &[u8] {
    if data.len() < 10 || &data[..3] != b"ID3" {
        return data;
    }
    let size = data[6..10]
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | (*b as usize & 0x7F));
    let footer = if data[5] & 0x10 != 0 { 10 } else { 0 };
    &data[10 + size + footer..]
}

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}
