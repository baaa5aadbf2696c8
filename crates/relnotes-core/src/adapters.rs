/// Hosting-provider adapters (Bitbucket Cloud, ...) for changelog retrieval.
pub mod bitbucket;

pub use bitbucket::BitbucketChangelog;

use crate::errors::{RelnotesError, Result};
use crate::types::{ChangeLogFile, ChangeLogNotes, ChangeLogProject, ChangeLogRelease};
use std::future::Future;

/// Changelog retrieval for one hosting provider.
pub trait ChangelogAdapter: Send + Sync {
    /// Stable identifier, e.g. `bitbucket-changelog`.
    fn id(&self) -> &'static str;

    /// Locate the preferred changelog file of `repository` (optionally below
    /// `source_directory`) and fetch its content.
    ///
    /// `Ok(None)` means no changelog file exists; transport and schema
    /// failures are returned as errors.
    fn get_release_notes_md(
        &self,
        repository: &str,
        api_base_url: &str,
        source_directory: Option<&str>,
    ) -> impl Future<Output = Result<Option<ChangeLogFile>>> + Send;

    /// Release notes derived from tags or releases.
    fn get_release_list(
        &self,
        project: &ChangeLogProject,
        release: &ChangeLogRelease,
    ) -> Vec<ChangeLogNotes>;
}

/// Blocking wrapper around [`ChangelogAdapter::get_release_notes_md`] for
/// synchronous callers.
///
/// Fails with [`RelnotesError::BlockingInAsync`] when called from within a
/// tokio runtime; async callers await the adapter directly.
pub fn get_release_notes_md_blocking<A: ChangelogAdapter>(
    adapter: &A,
    repository: &str,
    api_base_url: &str,
    source_directory: Option<&str>,
) -> Result<Option<ChangeLogFile>> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(RelnotesError::BlockingInAsync);
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(adapter.get_release_notes_md(repository, api_base_url, source_directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BitbucketConfig;

    #[tokio::test]
    async fn blocking_call_inside_runtime_is_an_error() {
        let adapter = BitbucketChangelog::from_config(&BitbucketConfig::default()).unwrap();
        let err =
            get_release_notes_md_blocking(&adapter, "acme/widgets", "http://127.0.0.1:9", None)
                .unwrap_err();
        assert!(matches!(err, RelnotesError::BlockingInAsync), "{err}");
    }
}
