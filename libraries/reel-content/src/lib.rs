//! Reel Vault Content Store
//!
//! Owns the managed media directory: copy-in with streaming hash
//! computation, existence probing, and best-effort delete-out.
//!
//! # Guarantees
//!
//! - Files enter the store under opaque generated names, never the source
//!   name, so callers cannot collide or inject paths.
//! - The content hash of an import is fully computed before the staged copy
//!   can be persisted, so a catalog row never references unhashed bytes.
//! - A staged copy that is dropped before persisting (error, cancellation)
//!   removes its partial file.
//! - Deleting is best-effort: a failed unlink is logged and swallowed,
//!   because catalog state is authoritative over storage cleanliness.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod hash;
mod store;

pub use error::{ContentError, Result};
pub use hash::sha256_file;
pub use store::{guess_mime_type, ContentRecord, ContentStore, StagedFile};
