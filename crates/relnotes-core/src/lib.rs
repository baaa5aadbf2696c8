pub mod adapters;
pub mod config;
pub mod errors;
pub mod filename;
pub mod http;
pub mod types;
pub mod url;

/// User agent sent with every hosting API request.
pub const USER_AGENT: &str = concat!("relnotes/", env!("CARGO_PKG_VERSION"));

// Re-export commonly used items
pub use adapters::{
    BitbucketChangelog, ChangelogAdapter, bitbucket::DirectoryEntry, get_release_notes_md_blocking,
};
pub use config::{BitbucketConfig, Config};
pub use errors::{RelnotesError, Result};
pub use filename::{compare_changelog_file_path, is_changelog_filename};
pub use http::{BitbucketHttp, HostingHttp, HttpOptions};
pub use types::{
    CHANGELOG_MD_SUFFIX, ChangeLogFile, ChangeLogNotes, ChangeLogProject, ChangeLogRelease,
};
pub use url::join_url_parts;
