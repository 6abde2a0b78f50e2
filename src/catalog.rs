//! Catalog API boundary.
//!
//! The pipeline only needs two reads from the streaming service: the
//! user's top tracks for a time range, and the profile for the header
//! card. Credentials come through [`TokenProvider`] — the OAuth dance
//! itself lives with whoever implements it. Transient failures retry a
//! bounded number of times with doubling delays; after that the typed
//! error goes back to the caller.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{TimeRange, TrackRecord};

const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const MAX_FETCH_LIMIT: usize = 50;

/// Credential boundary. The core only ever asks for a bearer token.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("catalog returned http {status}")]
    Http { status: u16 },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed catalog payload: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Transient failures worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl CatalogClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Result<Self, CatalogError> {
        Self::with_base_url(tokens, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        tokens: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            tokens,
        })
    }

    /// Top tracks for the range, at most 50, retried per policy.
    pub async fn fetch_top_tracks(
        &self,
        range: TimeRange,
        limit: usize,
    ) -> Result<Vec<TrackRecord>, CatalogError> {
        let limit = limit.clamp(1, MAX_FETCH_LIMIT);
        let url = format!(
            "{}/me/top/tracks?time_range={}&limit={}",
            self.base_url,
            range.api_param(),
            limit
        );
        let payload: TopTracksResponse = self.get_with_retry(&url).await?;
        debug!(range = range.api_param(), count = payload.items.len(), "fetched top tracks");
        Ok(payload.items.into_iter().map(WireTrack::into_record).collect())
    }

    pub async fn fetch_user_profile(&self) -> Result<UserProfile, CatalogError> {
        let url = format!("{}/me", self.base_url);
        let payload: WireProfile = self.get_with_retry(&url).await?;
        Ok(UserProfile {
            display_name: if payload.display_name.is_empty() {
                payload.id
            } else {
                payload.display_name
            },
            image_url: payload.images.into_iter().next().map(|i| i.url),
        })
    }

    async fn get_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, CatalogError> {
        let mut delay = RETRY_BASE_DELAY;
        let mut attempt = 1;
        loop {
            match self.get_once(url).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < RETRY_ATTEMPTS => {
                    warn!(%err, attempt, "catalog fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let token = self.tokens.access_token().ok_or(CatalogError::Unauthorized)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(CatalogError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    items: Vec<WireTrack>,
}

// Wire shapes are forgiving on purpose: a missing field degrades to a
// documented default instead of failing the whole fetch.
#[derive(Debug, Deserialize)]
struct WireTrack {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<WireArtist>,
    #[serde(default)]
    album: Option<WireAlbum>,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    popularity: u8,
}

impl WireTrack {
    fn into_record(self) -> TrackRecord {
        TrackRecord {
            id: self.id,
            title: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
            album_art: self
                .album
                .and_then(|a| a.images.into_iter().next())
                .map(|i| i.url),
            duration_ms: self.duration_ms,
            popularity: self.popularity.min(100),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireAlbum {
    #[serde(default)]
    images: Vec<WireImage>,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    images: Vec<WireImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoToken;

    impl TokenProvider for NoToken {
        fn access_token(&self) -> Option<String> {
            None
        }
    }

    struct FixedToken;

    impl TokenProvider for FixedToken {
        fn access_token(&self) -> Option<String> {
            Some("token-123".into())
        }
    }

    #[tokio::test]
    async fn missing_token_fails_fast_without_retry() {
        let client = CatalogClient::with_base_url(Arc::new(NoToken), "http://127.0.0.1:9")
            .expect("client");
        let err = client
            .fetch_top_tracks(TimeRange::Short, 20)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Unauthorized));
    }

    #[test]
    fn retryability_is_limited_to_transient_failures() {
        assert!(CatalogError::Transport("reset".into()).is_retryable());
        assert!(CatalogError::Http { status: 503 }.is_retryable());
        assert!(CatalogError::Http { status: 429 }.is_retryable());
        assert!(!CatalogError::Http { status: 404 }.is_retryable());
        assert!(!CatalogError::Unauthorized.is_retryable());
    }

    #[test]
    fn wire_tracks_degrade_missing_fields() {
        let raw = serde_json::json!({
            "id": "t9",
            "name": "Song",
            "artists": [{}],
        });
        let wire: WireTrack = serde_json::from_value(raw).expect("wire");
        let record = wire.into_record();
        assert_eq!(record.duration_ms, 0);
        assert_eq!(record.popularity, 0);
        assert_eq!(record.primary_artist(), crate::model::UNKNOWN_ARTIST);
    }

    #[test]
    fn provider_defaults_authentication_from_token_presence() {
        assert!(!NoToken.is_authenticated());
        assert!(FixedToken.is_authenticated());
    }
}
