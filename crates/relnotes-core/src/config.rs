use crate::errors::{RelnotesError, io_error_with_path};
use crate::http::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_LEN, DEFAULT_TIMEOUT, HttpOptions};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BITBUCKET_API_BASE_URL: &str = "https://api.bitbucket.org/";

/// Configuration for relnotes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub bitbucket: BitbucketConfig,
}

/// `[bitbucket]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbucketConfig {
    pub api_base_url: String,
    pub page_len: u32,
    pub max_pages: u32,
    pub timeout: Duration,
}

impl Default for BitbucketConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BITBUCKET_API_BASE_URL.to_string(),
            page_len: DEFAULT_PAGE_LEN,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BitbucketConfig {
    /// Transport settings derived from this section.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            page_len: self.page_len,
            max_pages: self.max_pages,
            timeout: self.timeout,
            ..HttpOptions::default()
        }
    }
}

impl Config {
    /// Load configuration from .relnotes/config.toml
    pub fn load(root: &Path) -> Result<Self, RelnotesError> {
        let path = root.join(".relnotes").join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| io_error_with_path(e, &path))?;
        Self::parse(&text)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults.
    pub fn parse(text: &str) -> Result<Self, RelnotesError> {
        let value: toml::Value = text
            .parse()
            .map_err(|e| RelnotesError::Config(format!("invalid config.toml: {e}")))?;

        let mut bitbucket = BitbucketConfig::default();
        let Some(section) = value.get("bitbucket") else {
            return Ok(Self { bitbucket });
        };
        let section = section
            .as_table()
            .ok_or_else(|| RelnotesError::Config("[bitbucket] must be a table".into()))?;

        if let Some(url) = section.get("api_base_url") {
            let url = url.as_str().map(str::trim).unwrap_or_default();
            if url.is_empty() {
                return Err(RelnotesError::Config(
                    "bitbucket.api_base_url must be a non-empty string".into(),
                ));
            }
            bitbucket.api_base_url = url.to_string();
        }
        if let Some(v) = section.get("page_len") {
            bitbucket.page_len = positive_u32(v, "bitbucket.page_len")?;
        }
        if let Some(v) = section.get("max_pages") {
            bitbucket.max_pages = positive_u32(v, "bitbucket.max_pages")?;
        }
        if let Some(v) = section.get("timeout_secs") {
            let secs = positive_u32(v, "bitbucket.timeout_secs")?;
            bitbucket.timeout = Duration::from_secs(secs.into());
        }

        Ok(Self { bitbucket })
    }
}

fn positive_u32(value: &toml::Value, key: &str) -> Result<u32, RelnotesError> {
    value
        .as_integer()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| RelnotesError::Config(format!("{key} must be a positive integer")))
}
