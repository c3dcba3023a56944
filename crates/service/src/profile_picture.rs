//! Random avatar lookup used to decorate newly registered accounts.

use std::time::Duration;

use async_trait::async_trait;
use configs::ProfilePictureConfig;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PictureError {
    #[error("picture request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("picture response had no results")]
    Empty,
}

/// Source of profile picture URLs for new users.
#[async_trait]
pub trait ProfilePictureProvider: Send + Sync {
    /// `Ok(None)` means the provider is switched off.
    async fn fetch(&self) -> Result<Option<String>, PictureError>;
}

/// Response body of the random user API, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUserResult>,
}

#[derive(Debug, Deserialize)]
struct RandomUserResult {
    picture: RandomUserPicture,
}

#[derive(Debug, Deserialize)]
struct RandomUserPicture {
    large: String,
}

/// Client for `randomuser.me`.
pub struct RandomUserPictures {
    client: Client,
    endpoint: String,
}

impl RandomUserPictures {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PictureError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("classroom/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl ProfilePictureProvider for RandomUserPictures {
    async fn fetch(&self) -> Result<Option<String>, PictureError> {
        let body: RandomUserResponse = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let url = body.results.into_iter().next().map(|r| r.picture.large).ok_or(PictureError::Empty)?;
        debug!(url = %url, "fetched profile picture");
        Ok(Some(url))
    }
}

/// Provider that never makes a request.
pub struct NoPictures;

#[async_trait]
impl ProfilePictureProvider for NoPictures {
    async fn fetch(&self) -> Result<Option<String>, PictureError> {
        Ok(None)
    }
}

/// Always hands out the same URL. Handy for tests and offline setups.
pub struct FixedPicture(pub String);

#[async_trait]
impl ProfilePictureProvider for FixedPicture {
    async fn fetch(&self) -> Result<Option<String>, PictureError> {
        Ok(Some(self.0.clone()))
    }
}

/// Pick the provider described by the `[profile_picture]` section.
pub fn from_config(cfg: &ProfilePictureConfig) -> Result<Box<dyn ProfilePictureProvider>, PictureError> {
    if !cfg.enabled {
        return Ok(Box::new(NoPictures));
    }
    let provider = RandomUserPictures::new(cfg.endpoint.clone(), Duration::from_secs(cfg.timeout_secs))?;
    Ok(Box::new(provider))
}
