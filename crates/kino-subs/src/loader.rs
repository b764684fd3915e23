//! Subtitle loading - fetches raw subtitle text over HTTP or from disk
//!
//! The caption core never fetches anything itself; it is handed the text
//! (or the failure) once a fetch completes. This module is the default
//! collaborator for that handoff.

use crate::{types::CaptionConfig, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};
use url::Url;

/// Failure code for transport errors (connect, timeout, body read)
pub const TRANSPORT_ERROR_CODE: i32 = -1;
/// Failure code for local file errors
pub const IO_ERROR_CODE: i32 = -2;

/// Where subtitle text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleSource {
    Url(Url),
    File(PathBuf),
}

impl FromStr for SubtitleSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(SubtitleSource::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SubtitleSource::File)
                .map_err(|_| Error::InvalidSource(s.to_string())),
            // Single-letter schemes are drive letters
            Ok(url) if url.scheme().len() > 1 => Err(Error::InvalidSource(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                s
            ))),
            _ => Ok(SubtitleSource::File(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for SubtitleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleSource::Url(url) => write!(f, "{}", url),
            SubtitleSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch failure as reported by the collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    /// HTTP status, or one of the negative codes in this module
    pub code: i32,
    pub message: String,
}

impl FetchError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transport failures and server errors are worth retrying
    pub fn is_recoverable(&self) -> bool {
        self.code == TRANSPORT_ERROR_CODE || (500..600).contains(&self.code)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::new(status.as_u16() as i32, e.to_string()),
            None => FetchError::new(TRANSPORT_ERROR_CODE, e.to_string()),
        }
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        Error::Fetch {
            code: e.code,
            message: e.message,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Completed fetch, ready to hand to a caption session
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub source: SubtitleSource,
    pub result: std::result::Result<String, FetchError>,
}

/// Trait for subtitle fetchers
#[async_trait]
pub trait SubtitleFetcher: Send + Sync {
    /// Fetch the raw subtitle text
    async fn fetch(&self, source: &SubtitleSource) -> std::result::Result<String, FetchError>;
}

/// HTTP and local file fetcher
pub struct DefaultFetcher {
    client: Client,
}

impl DefaultFetcher {
    pub fn new(config: &CaptionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubtitleFetcher for DefaultFetcher {
    async fn fetch(&self, source: &SubtitleSource) -> std::result::Result<String, FetchError> {
        match source {
            SubtitleSource::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::new(
                        status.as_u16() as i32,
                        status.canonical_reason().unwrap_or("HTTP error"),
                    ));
                }
                Ok(response.text().await?)
            }
            SubtitleSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FetchError::new(IO_ERROR_CODE, e.to_string())),
        }
    }
}

/// Runs fetches with the configured retry policy
#[derive(Clone)]
pub struct SubtitleLoader {
    fetcher: Arc<dyn SubtitleFetcher>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl SubtitleLoader {
    /// Loader backed by [`DefaultFetcher`]
    pub fn new(config: &CaptionConfig) -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(DefaultFetcher::new(config)?), config))
    }

    pub fn with_fetcher(fetcher: Arc<dyn SubtitleFetcher>, config: &CaptionConfig) -> Self {
        Self {
            fetcher,
            retry_attempts: config.retry_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Fetch a source, retrying recoverable failures
    #[instrument(skip_all, fields(source = %source))]
    pub async fn fetch(&self, source: &SubtitleSource) -> FetchOutcome {
        let mut attempt = 0;
        let result = loop {
            match self.fetcher.fetch(source).await {
                Err(e) if e.is_recoverable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    warn!(error = %e, attempt, "Subtitle fetch failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
                result => break result,
            }
        };

        FetchOutcome {
            source: source.clone(),
            result,
        }
    }

    /// Fetch on the runtime and deliver the outcome over `tx`
    pub fn spawn(&self, source: SubtitleSource, tx: mpsc::Sender<FetchOutcome>) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            let outcome = loader.fetch(&source).await;
            if tx.send(outcome).await.is_err() {
                debug!(source = %source, "Fetch outcome dropped, receiver closed");
            }
        })
    }
}
