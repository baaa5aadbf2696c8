//! HTTP transport for hosting APIs.
//!
//! Adapters talk to their provider through [`HostingHttp`], which hides
//! pagination and status handling. [`BitbucketHttp`] is the reqwest-backed
//! implementation for Bitbucket Cloud; tests substitute in-memory fakes.

use crate::errors::{RelnotesError, Result};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_PAGE_LEN: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ERROR_BODY_SNIPPET: usize = 400;

/// Transport used by hosting adapters.
pub trait HostingHttp: Send + Sync {
    /// GET every page of a paginated JSON listing and return all items in order.
    fn get_paginated<T>(&self, url: &str) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// GET a plain text body.
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// One page of a Bitbucket Cloud paginated response.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Page<T> {
    pub values: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Settings for [`BitbucketHttp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub page_len: u32,
    pub max_pages: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            page_len: DEFAULT_PAGE_LEN,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: DEFAULT_TIMEOUT,
            user_agent: crate::USER_AGENT.to_string(),
        }
    }
}

/// reqwest client for the Bitbucket Cloud REST API.
#[derive(Debug, Clone)]
pub struct BitbucketHttp {
    client: reqwest::Client,
    options: HttpOptions,
}

impl BitbucketHttp {
    pub fn new(options: HttpOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|source| RelnotesError::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &HttpOptions {
        &self.options
    }

    /// First-page URL with `pagelen` set, unless the caller already chose one.
    fn first_page_url(&self, url: &str) -> Result<Url> {
        let mut parsed = Url::parse(url)
            .map_err(|err| RelnotesError::InvalidUrl(format!("'{}': {}", url, err)))?;
        if !parsed.query_pairs().any(|(key, _)| key == "pagelen") {
            parsed
                .query_pairs_mut()
                .append_pair("pagelen", &self.options.page_len.to_string());
        }
        Ok(parsed)
    }

    async fn get_ok(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| RelnotesError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            return Err(RelnotesError::RateLimited {
                url: url.to_string(),
                retry_after,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.trim().chars().take(ERROR_BODY_SNIPPET).collect();
        Err(RelnotesError::Status {
            url: url.to_string(),
            status,
            body: snippet,
        })
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String> {
        response.text().await.map_err(|source| RelnotesError::Http {
            url: url.to_string(),
            source,
        })
    }
}

impl HostingHttp for BitbucketHttp {
    async fn get_paginated<T>(&self, url: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut values = Vec::new();
        let mut next = Some(self.first_page_url(url)?.to_string());
        let mut pages = 0;

        while let Some(page_url) = next.take() {
            if pages >= self.options.max_pages {
                trace!(url, pages, "page limit reached, stopping pagination");
                break;
            }
            pages += 1;

            let response = self.get_ok(&page_url).await?;
            let body = Self::read_body(&page_url, response).await?;
            let page: Page<T> =
                serde_json::from_str(&body).map_err(|source| RelnotesError::Schema {
                    url: page_url.clone(),
                    source,
                })?;

            trace!(url = %page_url, items = page.values.len(), "fetched page");
            values.extend(page.values);
            next = page.next.filter(|n| !n.is_empty());
        }

        Ok(values)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get_ok(url).await?;
        Self::read_body(url, response).await
    }
}
