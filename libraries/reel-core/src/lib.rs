//! Reel Vault Core
//!
//! Platform-agnostic domain types, the catalog storage trait, and error
//! handling for the Reel Vault media library.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: [`Video`], [`Playlist`], [`PlaylistItem`], newtype IDs
//! - **Storage Abstraction**: the [`CatalogStore`] trait implemented by
//!   concrete backends (one logical model, swappable persistence)
//! - **Error Handling**: unified [`ReelError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use reel_core::types::{OwnerScope, Video};
//!
//! let owner = OwnerScope::new("user-1");
//! let video = Video::new_external(owner, "Launch keynote", "https://example.com/v/1", None);
//! assert!(!video.is_local());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::CatalogStore;
pub use error::{ReelError, Result};

// Export all types
pub use types::{
    OwnerScope, Playlist, PlaylistEntry, PlaylistId, PlaylistItem, SourceKind, Video, VideoFilter,
    VideoId, VideoSource,
};
