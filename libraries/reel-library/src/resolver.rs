//! Playback resolution
//!
//! Turns catalog entries into something a player or browser collaborator
//! can open. Local files are addressed through short-lived, revocable
//! capability handles; the managed directory's real paths never cross the
//! trust boundary. External URLs are re-validated at the point of use,
//! independent of the validation that happened at registration.

use chrono::{DateTime, Duration, Utc};
use reel_content::ContentStore;
use reel_core::{types::*, ReelError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use url::Url;
use uuid::Uuid;

/// Opaque, expiring capability for one stored file
#[derive(Debug, Clone)]
pub struct MediaHandle {
    /// Token the collaborator presents back to [`Resolver::open`]
    pub token: String,
    /// Video this handle was issued for
    pub video_id: VideoId,
    /// Expiry instant; the handle is dead afterwards
    pub expires_at: DateTime<Utc>,
}

/// What a catalog entry resolves to for playback
#[derive(Debug)]
pub enum PlaybackTarget {
    /// Managed local file
    Local {
        /// Capability handle, absent when the backing file is missing
        handle: Option<MediaHandle>,
        /// Whether the backing file is absent from the store
        missing: bool,
    },
    /// Externally hosted video
    External {
        /// Validated http/https URL for the "open externally" action
        url: String,
    },
}

struct Grant {
    filename: String,
    expires_at: DateTime<Utc>,
}

/// Issues and redeems playback capabilities
pub struct Resolver {
    content: ContentStore,
    grants: Mutex<HashMap<String, Grant>>,
    ttl: Duration,
}

impl Resolver {
    /// Create a resolver over the given content store
    pub fn new(content: ContentStore, ttl: Duration) -> Self {
        Self {
            content,
            grants: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Resolve a catalog entry into a playback target
    ///
    /// A local video whose file moved or was deleted outside the system
    /// resolves with `missing = true` and no handle. An external video's
    /// URL is validated again here even though registration already did.
    pub fn resolve(&self, video: &Video) -> Result<PlaybackTarget> {
        match &video.source {
            VideoSource::Local { filename, .. } => {
                if !self.content.exists(filename) {
                    debug!("video {} backing file is missing", video.id);
                    return Ok(PlaybackTarget::Local {
                        handle: None,
                        missing: true,
                    });
                }
                let handle = self.grant(&video.id, filename);
                Ok(PlaybackTarget::Local {
                    handle: Some(handle),
                    missing: false,
                })
            }
            VideoSource::External { url, .. } => Ok(PlaybackTarget::External {
                url: validate_external_url(url)?,
            }),
        }
    }

    /// Redeem a handle token for the backing file's path
    ///
    /// For the trusted process-local playback collaborator only (the
    /// protocol handler serving the player). Unknown, revoked, and expired
    /// tokens all read as not-found.
    pub fn open(&self, token: &str) -> Result<PathBuf> {
        let filename = {
            let mut grants = self.lock_grants();
            match grants.get(token) {
                Some(grant) if grant.expires_at > Utc::now() => grant.filename.clone(),
                Some(_) => {
                    grants.remove(token);
                    return Err(ReelError::not_found("Media handle", token));
                }
                None => return Err(ReelError::not_found("Media handle", token)),
            }
        };

        self.content.open(&filename).map_err(Into::into)
    }

    /// Re-validate a URL for the collaborator's "open externally" action
    ///
    /// Defense in depth: rejects any non-http/https URL even if it somehow
    /// bypassed registration-time validation.
    pub fn open_external(&self, url: &str) -> Result<String> {
        validate_external_url(url)
    }

    /// Invalidate a handle before its expiry
    pub fn revoke(&self, token: &str) {
        self.lock_grants().remove(token);
    }

    fn grant(&self, video_id: &VideoId, filename: &str) -> MediaHandle {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let mut grants = self.lock_grants();
        grants.retain(|_, grant| grant.expires_at > now);
        grants.insert(
            token.clone(),
            Grant {
                filename: filename.to_string(),
                expires_at,
            },
        );

        MediaHandle {
            token,
            video_id: video_id.clone(),
            expires_at,
        }
    }

    fn lock_grants(&self) -> std::sync::MutexGuard<'_, HashMap<String, Grant>> {
        self.grants.lock().unwrap_or_else(|err| err.into_inner())
    }
}

/// Parse a URL and require an http/https scheme, returning it normalized
pub(crate) fn validate_external_url(url: &str) -> Result<String> {
    let parsed =
        Url::parse(url).map_err(|_| ReelError::validation("externalUrl must be a valid URL"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ReelError::validation("only http/https URLs are allowed"));
    }

    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation_allows_http_and_https_only() {
        assert!(validate_external_url("https://example.com/watch?v=1").is_ok());
        assert!(validate_external_url("http://example.com/v").is_ok());
        assert!(validate_external_url("file:///etc/passwd").is_err());
        assert!(validate_external_url("javascript:alert(1)").is_err());
        assert!(validate_external_url("not a url").is_err());
    }

    #[test]
    fn url_validation_normalizes() {
        let normalized = validate_external_url("HTTPS://Example.COM/v").unwrap();
        assert_eq!(normalized, "https://example.com/v");
    }
}
