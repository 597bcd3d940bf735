//! Tagsmith API Library
//!
//! This crate provides the HTTP handlers, error rendering, and application setup
//! for the MP3 tag editing service.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::ErrorResponse;
