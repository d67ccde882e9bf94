//! AList API client with retry and path encoding fallbacks.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CrawlError, Result};
use crate::models::{ApiResponse, DownloadInfo, GetRequest, ListRequest, Listing};
use crate::path::SpaceEncoding;

/// Passwords tried, in order, when a listing is password protected.
const CANDIDATE_PASSWORDS: [&str; 3] = ["123456", "666666", "000000"];

/// Page size requested from `/api/fs/list`.
const PER_PAGE: u32 = 100;

/// The two operations the crawler needs from a file listing service.
#[allow(async_fn_in_trait)]
pub trait FsApi {
    /// List a directory.
    ///
    /// Never fails: when the contents cannot be determined an empty listing is
    /// returned, so an empty result means "empty or unreadable".
    async fn list(&self, path: &str) -> Listing;

    /// Resolve the direct download URL of a file, if any.
    async fn download_url(&self, path: &str) -> Option<String>;
}

/// Retry settings shared by both operations.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Client for an AList server's JSON API.
pub struct AlistClient {
    base_url: String,
    config: ClientConfig,
    http: Client,
}

impl AlistClient {
    /// Create a client with the default retry settings.
    pub fn new(base_url: &str) -> Self {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with custom retry settings.
    ///
    /// # Arguments
    /// * `base_url` - Server root, e.g. `https://pan.example.com`
    /// * `config` - Retry count and delay
    pub fn with_config(base_url: &str, config: ClientConfig) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List a directory, retrying transient faults.
    ///
    /// Password and storage-routing errors are recovered inside each attempt.
    /// Once `max_retries` retries are spent the empty listing is returned.
    pub async fn list(&self, path: &str) -> Listing {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                tokio::time::sleep(self.config.retry_delay).await;
            }

            match self.try_list(path).await {
                Ok(listing) => return listing,
                Err(e) => warn!(path, error = %e, "failed to list directory"),
            }

            if attempt >= self.config.max_retries {
                return Listing::empty();
            }
            attempt += 1;
            info!(
                "retrying in {:?} (retry {}/{})",
                self.config.retry_delay, attempt, self.config.max_retries
            );
        }
    }

    /// Resolve a file's download URL, retrying failures.
    ///
    /// Returns `None` when every attempt failed or the server reported no URL.
    pub async fn download_url(&self, path: &str) -> Option<String> {
        let mut attempt = 0;
        loop {
            match self.try_download_url(path).await {
                Ok(url) => return url.filter(|u| !u.is_empty()),
                Err(e) => warn!(path, error = %e, "failed to resolve download URL"),
            }

            if attempt >= self.config.max_retries {
                warn!(path, "giving up on download URL");
                return None;
            }
            attempt += 1;
            info!(
                "retrying in {:?} (retry {}/{})",
                self.config.retry_delay, attempt, self.config.max_retries
            );
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }

    /// One listing attempt, including the password and encoding fallbacks.
    async fn try_list(&self, path: &str) -> Result<Listing> {
        let err = match self.list_once(path, "", SpaceEncoding::Percent).await {
            Ok(listing) => return Ok(listing),
            Err(e) => e,
        };

        if err.is_password_required() {
            for password in CANDIDATE_PASSWORDS {
                if let Ok(listing) = self.list_once(path, password, SpaceEncoding::Percent).await {
                    debug!(path, "listing unlocked with candidate password");
                    return Ok(listing);
                }
            }
        } else if err.is_storage_not_found() {
            return self.list_once(path, "", SpaceEncoding::Plus).await;
        }

        Err(err)
    }

    async fn list_once(&self, path: &str, password: &str, encoding: SpaceEncoding) -> Result<Listing> {
        let encoded = encoding.apply(path);
        let body = ListRequest {
            path: &encoded,
            password,
            page: 1,
            per_page: PER_PAGE,
            refresh: false,
        };
        let listing: Option<Listing> = self.post("/api/fs/list", &body).await?;
        Ok(listing.unwrap_or_default())
    }

    /// One URL attempt: `%20` first, then `+` if the server rejected the path.
    async fn try_download_url(&self, path: &str) -> Result<Option<String>> {
        let info = match self.get_once(path, SpaceEncoding::Percent).await {
            Ok(info) => info,
            Err(CrawlError::ApiError { .. }) => self.get_once(path, SpaceEncoding::Plus).await?,
            Err(e) => return Err(e),
        };
        Ok(info.and_then(|i| i.raw_url))
    }

    async fn get_once(&self, path: &str, encoding: SpaceEncoding) -> Result<Option<DownloadInfo>> {
        let encoded = encoding.apply(path);
        let body = GetRequest {
            path: &encoded,
            password: "",
        };
        self.post("/api/fs/get", &body).await
    }

    /// POST a JSON body and unwrap the API envelope.
    ///
    /// Any response whose `code` is not the success code becomes an `ApiError`.
    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(endpoint, "sending request");
        let response = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiResponse<Value> = response.json().await?;
        if !envelope.is_success() {
            return Err(CrawlError::ApiError {
                code: envelope.code,
                message: envelope.message,
            });
        }

        let data = envelope
            .data
            .map(serde_json::from_value::<T>)
            .transpose()?;
        Ok(data)
    }
}

impl FsApi for AlistClient {
    async fn list(&self, path: &str) -> Listing {
        AlistClient::list(self, path).await
    }

    async fn download_url(&self, path: &str) -> Option<String> {
        AlistClient::download_url(self, path).await
    }
}
