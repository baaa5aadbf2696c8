use super::ChangelogAdapter;
use crate::config::BitbucketConfig;
use crate::errors::{RelnotesError, Result};
use crate::filename::{basename, compare_changelog_file_path, is_changelog_filename};
use crate::http::{BitbucketHttp, HostingHttp};
use crate::types::{ChangeLogFile, ChangeLogNotes, ChangeLogProject, ChangeLogRelease};
use crate::url::join_url_parts;
use reqwest::Url;
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::{debug, info, trace};

pub const ID: &str = "bitbucket-changelog";

const REPOSITORIES_PATH: &str = "2.0/repositories";

/// Kind of a `src` listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    CommitFile,
    CommitDirectory,
    #[serde(other)]
    Other,
}

/// Commit an entry was listed at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryCommit {
    pub hash: String,
}

/// One item of `GET /2.0/repositories/{repo}/src/{rev}/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    /// Path relative to the repository root
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub commit: EntryCommit,
}

impl DirectoryEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::CommitFile
    }
}

/// Changelog adapter for Bitbucket Cloud.
#[derive(Debug, Clone)]
pub struct BitbucketChangelog<H = BitbucketHttp> {
    http: H,
}

impl BitbucketChangelog<BitbucketHttp> {
    /// Adapter backed by a reqwest client configured from `config`.
    pub fn from_config(config: &BitbucketConfig) -> Result<Self> {
        Ok(Self::new(BitbucketHttp::new(config.http_options())?))
    }
}

impl<H: HostingHttp> BitbucketChangelog<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    /// Listing of `source_directory` (or the root) at the default branch head.
    pub async fn list_directory(
        &self,
        repository: &str,
        api_base_url: &str,
        source_directory: Option<&str>,
    ) -> Result<Vec<DirectoryEntry>> {
        let url = source_listing_url(api_base_url, repository, source_directory)?;
        self.http.get_paginated(&url).await
    }

    /// Raw content of `entry`, read at the commit it was listed at.
    pub async fn fetch_content(
        &self,
        repository: &str,
        api_base_url: &str,
        entry: &DirectoryEntry,
    ) -> Result<String> {
        let url = raw_file_url(api_base_url, repository, entry)?;
        self.http.get_text(&url).await
    }
}

impl<H: HostingHttp> ChangelogAdapter for BitbucketChangelog<H> {
    fn id(&self) -> &'static str {
        ID
    }

    async fn get_release_notes_md(
        &self,
        repository: &str,
        api_base_url: &str,
        source_directory: Option<&str>,
    ) -> Result<Option<ChangeLogFile>> {
        trace!(adapter = ID, repository, "bitbucket.get_release_notes_md()");

        let entries = self
            .list_directory(repository, api_base_url, source_directory)
            .await?;
        let candidates = changelog_candidates(&entries);

        let Some(selected) = select_changelog(&candidates, compare_changelog_file_path) else {
            trace!(adapter = ID, repository, "no changelog file found");
            return Ok(None);
        };

        if candidates.len() > 1 {
            debug!(
                adapter = ID,
                repository,
                candidates = candidates.len(),
                "Multiple candidates for changelog file, using {}",
                selected.path
            );
        }

        let body = self
            .fetch_content(repository, api_base_url, selected)
            .await?;
        Ok(Some(ChangeLogFile::from_body(selected.path.clone(), &body)))
    }

    fn get_release_list(
        &self,
        _project: &ChangeLogProject,
        _release: &ChangeLogRelease,
    ) -> Vec<ChangeLogNotes> {
        trace!(adapter = ID, "bitbucket.get_release_list()");
        info!("Unsupported Bitbucket Cloud feature. Skipping release fetching.");
        Vec::new()
    }
}

/// Files in `entries` whose basename follows the changelog naming convention.
pub fn changelog_candidates(entries: &[DirectoryEntry]) -> Vec<&DirectoryEntry> {
    entries
        .iter()
        .filter(|entry| entry.is_file())
        .filter(|entry| is_changelog_filename(basename(&entry.path)))
        .collect()
}

/// Minimum of `candidates` under `compare`, applied to entry paths.
pub fn select_changelog<'a, F>(
    candidates: &[&'a DirectoryEntry],
    compare: F,
) -> Option<&'a DirectoryEntry>
where
    F: Fn(&str, &str) -> Ordering,
{
    candidates
        .iter()
        .copied()
        .min_by(|a, b| compare(&a.path, &b.path))
}

/// Listing URL; `source_directory` segments are percent-encoded, empty ones dropped.
pub fn source_listing_url(
    api_base_url: &str,
    repository: &str,
    source_directory: Option<&str>,
) -> Result<String> {
    let base = join_url_parts(&[api_base_url, REPOSITORIES_PATH, repository, "src/HEAD"]);
    with_path_segments(&base, source_directory.unwrap_or_default().split('/'))
}

/// Content URL of `entry` at its listed commit; hash and path segments are percent-encoded.
pub fn raw_file_url(
    api_base_url: &str,
    repository: &str,
    entry: &DirectoryEntry,
) -> Result<String> {
    let base = join_url_parts(&[api_base_url, REPOSITORIES_PATH, repository, "src"]);
    with_path_segments(
        &base,
        std::iter::once(entry.commit.hash.as_str()).chain(entry.path.split('/')),
    )
}

fn with_path_segments<'a>(base: &str, segments: impl Iterator<Item = &'a str>) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|err| RelnotesError::InvalidUrl(format!("'{}': {}", base, err)))?;
    url.path_segments_mut()
        .map_err(|_| RelnotesError::InvalidUrl(format!("'{}' cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments.filter(|segment| !segment.is_empty()));
    Ok(url.into())
}
