//! Tagsmith Tags Library
//!
//! Reads and writes the ID3v2 tag container of MP3 files. The binary tag
//! format itself is handled by `lofty`; this crate only maps the service's
//! five-field tag set (plus cover art) onto it, and validates incoming
//! uploads before they reach storage.

pub mod codec;
pub mod lofty_codec;
pub mod validator;

pub use codec::{TagCodec, TagError, TagResult};
pub use lofty_codec::LoftyTagCodec;
pub use validator::{MediaValidator, ValidationError};
