use crate::cli::FetchArgs;
use relnotes_core::{
    BitbucketChangelog, ChangeLogFile, Config, RelnotesError, Result,
    get_release_notes_md_blocking,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Printed,
    NotFound,
}

pub fn run(args: &FetchArgs) -> Result<FetchOutcome> {
    let root = match &args.config {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config = Config::load(&root)?;
    let api_base_url = args
        .api_base_url
        .as_deref()
        .unwrap_or(&config.bitbucket.api_base_url);
    debug!(repository = %args.repository, api_base_url, "fetching changelog");

    let adapter = BitbucketChangelog::from_config(&config.bitbucket)?;
    let Some(file) = get_release_notes_md_blocking(
        &adapter,
        &args.repository,
        api_base_url,
        args.source_directory.as_deref(),
    )?
    else {
        eprintln!("No changelog file found in {}", args.repository);
        return Ok(FetchOutcome::NotFound);
    };

    let rendered = render(&file, args.json)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(FetchOutcome::Printed)
}

/// Output for a fetched changelog: pretty JSON, or the path header followed by markdown.
pub fn render(file: &ChangeLogFile, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(file)
            .map_err(|e| RelnotesError::Io(e.into()))?;
        out.push('\n');
        return Ok(out);
    }
    Ok(format!("<!-- {} -->\n{}\n", file.changelog_file, file.changelog_md))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renders_markdown_with_path_header() {
        let file = ChangeLogFile::from_body("CHANGELOG.md", "## 1.0.0");
        assert_eq!(
            render(&file, false).unwrap(),
            "<!-- CHANGELOG.md -->\n## 1.0.0\n#\n##\n"
        );
    }

    #[test]
    fn renders_json_with_camel_case_keys() {
        let file = ChangeLogFile::from_body("docs/HISTORY.md", "x");
        let out = render(&file, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["changelogFile"], "docs/HISTORY.md");
        assert_eq!(value["changelogMd"], "x\n#\n##");
    }

    #[test]
    fn invalid_config_fails_before_any_request() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".relnotes")).unwrap();
        fs::write(
            temp.path().join(".relnotes/config.toml"),
            "[bitbucket]\nmax_pages = -1\n",
        )
        .unwrap();

        let args = FetchArgs {
            repository: "acme/widgets".into(),
            config: Some(temp.path().to_path_buf()),
            ..FetchArgs::default()
        };
        let err = run(&args).unwrap_err();
        assert!(matches!(err, RelnotesError::Config(_)), "{err}");
    }
}
