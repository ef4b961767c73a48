//! # vitrine-common
//!
//! Shared types, configuration, media-reference normalization and validation used
//! by every Vitrine crate. No network access happens here.

pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod validation;

pub use error::{VitrineError, VitrineResult};
pub use media::MediaResolver;
