//! The [`Scraper`] facade: one-shot `fetch_*` calls returning a single [`Page`] and lazy `get_*`
//! sequences built on top of them.
//!
//! [`Page`]: crate::timeline::Page

mod timelines;
mod users;

use crate::cache::ScreenNameCache;
use crate::error::{Error, Result};
use crate::model::Entity;
use crate::sequence::{sequence, SequenceConfig};
use crate::timeline::Page;
use crate::twitter::{ApiRequest, Transport};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Upstream refuses larger pages.
pub const MAX_PAGE_SIZE: usize = 200;

/// What kind of session the transport carries. Decides which endpoints are used where several
/// serve the same data.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    #[default]
    Guest,
    LoggedIn,
    /// An app-only account that can still reach the REST timelines
    OpenAccount,
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "guest" => Ok(SessionMode::Guest),
            "logged-in" => Ok(SessionMode::LoggedIn),
            "open-account" => Ok(SessionMode::OpenAccount),
            other => Err(format!(
                "unknown session mode {other:?}, expected guest, logged-in or open-account"
            )),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScraperConfig {
    pub mode: SessionMode,
    /// Entities requested per page by the `get_*` sequences
    pub page_size: usize,
    pub sequence: SequenceConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            mode: SessionMode::default(),
            page_size: MAX_PAGE_SIZE,
            sequence: SequenceConfig::default(),
        }
    }
}

#[derive(Clone)]
pub struct Scraper {
    transport: Arc<dyn Transport>,
    config: ScraperConfig,
    ids: ScreenNameCache,
}

impl Scraper {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ScraperConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: ScraperConfig) -> Self {
        Scraper {
            transport,
            config,
            ids: ScreenNameCache::new(),
        }
    }

    /// Shares an existing screen name cache, e.g. between scrapers of different sessions.
    pub fn with_cache(mut self, ids: ScreenNameCache) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn cache(&self) -> &ScreenNameCache {
        &self.ids
    }

    pub fn is_logged_in(&self) -> bool {
        self.config.mode == SessionMode::LoggedIn
    }

    pub(crate) fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }

    fn page_size(&self) -> usize {
        clamp_count(self.config.page_size)
    }

    /// Sends `request` and turns an error-only response into an [`Error`].
    pub(crate) async fn query(&self, request: ApiRequest) -> Result<Value> {
        let name = request.endpoint.name();
        let response = self.transport.request(request).await?;
        if let Some(message) = error_without_data(&response) {
            log::debug!("{name} answered with an error: {message}");
            return Err(Error::from_api_message(message));
        }
        Ok(response)
    }

    fn sequence<'a, T, F, Fut>(
        &self,
        max: usize,
        cancel: CancellationToken,
        fetch: F,
    ) -> BoxStream<'a, Result<T>>
    where
        T: Entity + Send + 'a,
        F: FnMut(String) -> Fut + Send + 'a,
        Fut: Future<Output = Result<Page<T>>> + Send + 'a,
    {
        sequence(fetch, max, cancel, self.config.sequence)
    }
}

pub(crate) fn clamp_count(count: usize) -> usize {
    count.clamp(1, MAX_PAGE_SIZE)
}

/// The first error message of a response that carries nothing but `errors`.
fn error_without_data(response: &Value) -> Option<&str> {
    let object = response.as_object()?;
    let first = object.get("errors")?.as_array()?.first()?;
    let has_payload = object
        .iter()
        .any(|(key, value)| key != "errors" && !value.is_null());
    if has_payload {
        return None;
    }
    Some(
        first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error"),
    )
}
