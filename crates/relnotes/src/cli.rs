use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// relnotes CLI – locate and print a repository's changelog
#[derive(Debug, Parser)]
#[command(name = "relnotes", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the changelog of a Bitbucket Cloud repository and print it
    Fetch(FetchArgs),
}

#[derive(Debug, Args, Default)]
#[command(after_long_help = "\
Examples:
  relnotes fetch atlassian/python-bitbucket
  relnotes fetch acme/monorepo --dir packages/core --json

Exit codes:
  0  a changelog was printed
  1  an error occurred
  2  no changelog file was found")]
pub struct FetchArgs {
    /// Repository identifier, e.g. `workspace/repo`
    pub repository: String,

    /// Subdirectory to search instead of the repository root
    #[arg(long = "dir", value_name = "PATH")]
    pub source_directory: Option<String>,

    /// Override the API base URL from configuration
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Print the result as JSON instead of raw markdown
    #[arg(long)]
    pub json: bool,

    /// Directory holding `.relnotes/config.toml` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_with_repository_only() {
        let cli = Cli::try_parse_from(["relnotes", "fetch", "acme/widgets"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.repository, "acme/widgets");
                assert!(args.source_directory.is_none());
                assert!(args.api_base_url.is_none());
                assert!(!args.json);
                assert!(args.config.is_none());
            }
        }
    }

    #[test]
    fn parses_fetch_with_all_options() {
        let cli = Cli::try_parse_from([
            "relnotes",
            "-vv",
            "fetch",
            "acme/monorepo",
            "--dir",
            "packages/core",
            "--api-base-url",
            "http://localhost:8080/",
            "--json",
            "--config",
            "/tmp/project",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Fetch(args) = cli.command;
        assert_eq!(args.repository, "acme/monorepo");
        assert_eq!(args.source_directory.as_deref(), Some("packages/core"));
        assert_eq!(args.api_base_url.as_deref(), Some("http://localhost:8080/"));
        assert!(args.json);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn fetch_requires_repository() {
        assert!(Cli::try_parse_from(["relnotes", "fetch"]).is_err());
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["relnotes", "fetch", "a/b", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
