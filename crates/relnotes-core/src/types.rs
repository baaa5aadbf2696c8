use serde::{Deserialize, Serialize};

/// The changelog document selected for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogFile {
    /// Path of the selected file, relative to the repository root
    pub changelog_file: String,
    /// Full file content, terminated by [`CHANGELOG_MD_SUFFIX`]
    pub changelog_md: String,
}

/// Appended to every fetched changelog so markdown section parsers always
/// see a closing header, even when the last section is unterminated.
pub const CHANGELOG_MD_SUFFIX: &str = "\n#\n##";

impl ChangeLogFile {
    /// Build the record from a raw body, appending [`CHANGELOG_MD_SUFFIX`].
    pub fn from_body(path: impl Into<String>, body: &str) -> Self {
        Self {
            changelog_file: path.into(),
            changelog_md: format!("{body}{CHANGELOG_MD_SUFFIX}"),
        }
    }
}

/// Release notes derived from tag or release metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub notes_source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub url: String,
}

/// Describes the project whose changelog is being looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_name: Option<String>,
    pub api_base_url: String,
    pub base_url: String,
    /// Hosting-provider repository identifier, e.g. `workspace/repo`
    pub repository: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<String>,
}

/// Compare link between two releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogCompare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One release of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogRelease {
    pub version: String,
    pub git_ref: String,
    /// Release date as reported by the source, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub compare: ChangeLogCompare,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<ChangeLogNotes>,
}
