use anyhow::Result;
use clap::{ArgAction, Parser};
use log::debug;
use std::path::PathBuf;

use super::enhanced_parser::EnhancedParser;

/// Per-contributor line, commit and file counts for a git revision
#[derive(Parser, Debug)]
#[command(name = "gitfame")]
#[command(about = "Attribute the lines of every file at a git revision to their authors and rank the contributors")]
#[command(version)]
pub struct Args {
    /// Path to the git repository
    #[arg(long = "repository", alias = "repo", value_name = "PATH", default_value = ".")]
    pub repository: String,

    /// Revision to attribute (commit, branch or tag)
    #[arg(long, value_name = "REV")]
    pub revision: Option<String>,

    /// Ranking key: lines, commits or files
    #[arg(long = "order-by", value_name = "KEY")]
    pub order_by: Option<String>,

    /// Attribute lines to committers instead of authors
    #[arg(long = "use-committer")]
    pub use_committer: bool,

    /// Output format: tabular, csv, json or json-lines
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// File extensions to keep - supports comma-separated values
    #[arg(long, value_name = "EXT", action = ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Languages to keep - supports comma-separated values
    #[arg(long, value_name = "LANGUAGE", action = ArgAction::Append)]
    pub languages: Vec<String>,

    /// Glob patterns of paths to skip - supports comma-separated values
    #[arg(long, value_name = "GLOB", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Glob patterns a path must match to be kept - supports comma-separated values
    #[arg(long = "restrict-to", value_name = "GLOB", action = ArgAction::Append)]
    pub restrict_to: Vec<String>,

    /// Alternative language to extension table (JSON)
    #[arg(long = "languages-file", value_name = "FILE")]
    pub languages_file: Option<PathBuf>,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,
}

impl Args {
    pub fn apply_enhanced_parsing(mut self) -> Self {
        self.extensions = EnhancedParser::parse_extensions(self.extensions);
        self.languages = EnhancedParser::parse_languages(self.languages);
        self.exclude = EnhancedParser::parse_globs(self.exclude);
        self.restrict_to = EnhancedParser::parse_globs(self.restrict_to);
        self
    }
}

pub fn parse_args() -> Args {
    Args::parse().apply_enhanced_parsing()
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    debug!("Validating CLI argument combinations");

    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if let Some(ref format) = args.log_format {
        match format.to_lowercase().as_str() {
            "text" | "json" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log format '{}'. Valid options: text, json",
                    format
                ))
            }
        }
    }

    if let Some(ref level) = args.log_file_level {
        crate::logging::parse_log_level(level)?;
        if args.log_file.is_none() {
            return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
        }
    }

    if args.repository.trim().is_empty() {
        return Err(anyhow::anyhow!("--repository must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn create_test_args() -> Args {
    Args {
        repository: ".".to_string(),
        revision: None,
        order_by: None,
        use_committer: false,
        format: None,
        extensions: Vec::new(),
        languages: Vec::new(),
        exclude: Vec::new(),
        restrict_to: Vec::new(),
        languages_file: None,
        verbose: false,
        quiet: false,
        debug: false,
        log_format: None,
        log_file: None,
        log_file_level: None,
        config_file: None,
        config_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap().apply_enhanced_parsing()
    }

    #[test]
    fn test_defaults() {
        let args = parse_from(&["gitfame"]);
        assert_eq!(args.repository, ".");
        assert!(args.revision.is_none());
        assert!(args.order_by.is_none());
        assert!(args.format.is_none());
        assert!(!args.use_committer);
        assert!(args.extensions.is_empty());
    }

    #[test]
    fn test_all_fame_flags() {
        let args = parse_from(&[
            "gitfame",
            "--repository", "/src/project",
            "--revision", "v1.2.0",
            "--order-by", "commits",
            "--use-committer",
            "--format", "csv",
            "--extensions", ".go,.md",
            "--languages", "Rust",
            "--exclude", "vendor/*",
            "--exclude", "docs/*",
            "--restrict-to", "internal/*,cmd/*",
        ]);

        assert_eq!(args.repository, "/src/project");
        assert_eq!(args.revision.as_deref(), Some("v1.2.0"));
        assert_eq!(args.order_by.as_deref(), Some("commits"));
        assert!(args.use_committer);
        assert_eq!(args.format.as_deref(), Some("csv"));
        assert_eq!(args.extensions, vec![".go", ".md"]);
        assert_eq!(args.languages, vec!["Rust"]);
        assert_eq!(args.exclude, vec!["vendor/*", "docs/*"]);
        assert_eq!(args.restrict_to, vec!["internal/*", "cmd/*"]);
    }

    #[test]
    fn test_repo_alias() {
        let args = parse_from(&["gitfame", "--repo", "/tmp/r"]);
        assert_eq!(args.repository, "/tmp/r");
    }

    #[test]
    fn test_validate_args_success() {
        let args = Args {
            verbose: true,
            log_format: Some("json".to_string()),
            ..create_test_args()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_conflicting_flags() {
        let args = Args {
            verbose: true,
            debug: true,
            ..create_test_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_log_format() {
        let args = Args {
            log_format: Some("xml".to_string()),
            ..create_test_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_file_level_without_file() {
        let args = Args {
            log_file_level: Some("debug".to_string()),
            ..create_test_args()
        };
        assert!(validate_args(&args).is_err());

        let args = Args {
            log_file_level: Some("debug".to_string()),
            log_file: Some(PathBuf::from("gitfame.log")),
            ..create_test_args()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_repository() {
        let args = Args {
            repository: "  ".to_string(),
            ..create_test_args()
        };
        assert!(validate_args(&args).is_err());
    }
}
