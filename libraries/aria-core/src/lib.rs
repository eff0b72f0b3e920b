//! Aria Player Core
//!
//! Domain types and error handling shared across Aria Player crates.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackMeta`, `FileRef`
//! - **Id Newtypes**: `TrackId`, `PlaylistId`
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{FileRef, MediaKind, Track};
//!
//! let track = Track::new("My Favorite Song", MediaKind::Audio, FileRef::Object("blob-1".into()));
//! assert_eq!(track.rating, 0);
//! assert!(track.duration_secs.is_none());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{AriaError, Result};
pub use types::{
    FileRef, MediaKind, Playlist, PlaylistId, Track, TrackId, TrackMeta, TrackPatch,
};
