//! Reel Vault Library
//!
//! Orchestration layer for the media library: imports with hash-first
//! duplicate detection, external link registration, cascading removal,
//! playlist membership, and capability-based playback resolution.
//!
//! # Architecture
//!
//! - [`Library`] drives the catalog ([`reel_core::CatalogStore`]) and the
//!   content store together, owning the ordering and atomicity rules that
//!   span both
//! - [`Resolver`] turns catalog entries into playable targets without ever
//!   handing a raw filesystem path across the trust boundary
//! - [`LibraryConfig`] assembles database URL, media directory, and handle
//!   TTL from file and environment
//!
//! The transport layer (HTTP/IPC) and the identity provider are external
//! collaborators: they translate requests into these calls and supply the
//! owner scope the catalog context was created with.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod library;
mod resolver;

pub use config::LibraryConfig;
pub use library::{Library, Registration};
pub use resolver::{MediaHandle, PlaybackTarget, Resolver};
