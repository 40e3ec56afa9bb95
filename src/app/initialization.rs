//! Application initialization and configuration

use anyhow::Result;
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{ConfigManager, FAME_SECTION};
use crate::output::OutputFormat;
use crate::scanner::IdentityPolicy;
use crate::stats::OrderBy;
use crate::{cli, logging};

use super::repository::resolve_repository_path;

pub const DEFAULT_REVISION: &str = "HEAD";

/// Settings for one run, fixed before any file is processed
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub repository: PathBuf,
    pub revision: String,
    pub order_by: OrderBy,
    pub identity: IdentityPolicy,
    pub format: OutputFormat,
    pub extensions: Vec<String>,
    pub languages: Vec<String>,
    pub exclude: Vec<String>,
    pub restrict_to: Vec<String>,
    pub languages_file: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            revision: DEFAULT_REVISION.to_string(),
            order_by: OrderBy::default(),
            identity: IdentityPolicy::default(),
            format: OutputFormat::default(),
            extensions: Vec::new(),
            languages: Vec::new(),
            exclude: Vec::new(),
            restrict_to: Vec::new(),
            languages_file: None,
        }
    }
}

pub fn load_configuration(args: &cli::Args) -> Result<ConfigManager> {
    let mut manager = match &args.config_file {
        Some(config_file) => ConfigManager::load_from_file(config_file.clone())?,
        None => ConfigManager::load()?,
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

pub fn configure_logging(args: &cli::Args, config: &ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config.get_log_level("base", "console-level")?.unwrap_or(LevelFilter::Info)
    };

    let requested_format = args
        .log_format
        .as_deref()
        .or_else(|| config.get_value("base", "log-format").map(String::as_str));
    let format = match requested_format {
        Some(value) => logging::LogFormat::from_str(value).map_err(|e| anyhow::anyhow!(e))?,
        None => logging::LogFormat::Text,
    };

    let log_file = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));
    let file_level = match (&log_file, &args.log_file_level) {
        (None, _) => None,
        (Some(_), Some(level)) => Some(logging::parse_log_level(level)?),
        (Some(_), None) => Some(
            config
                .get_log_level("base", "file-log-level")?
                .unwrap_or(console_level),
        ),
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination: logging::LogDestination::from_log_file(log_file),
    })
}

/// CLI value, else configuration value, parsed with `FromStr`
fn resolve_choice<T>(cli_value: Option<&String>, config: &ConfigManager, key: &str) -> Result<T>
where
    T: FromStr<Err = crate::error::FameError> + Default,
{
    match cli_value.or_else(|| config.get_value(FAME_SECTION, key)) {
        Some(value) => Ok(value.parse::<T>()?),
        None => Ok(T::default()),
    }
}

fn resolve_list(cli_values: &[String], config: &ConfigManager, key: &str) -> Vec<String> {
    if !cli_values.is_empty() {
        return cli_values.to_vec();
    }
    config.get_list(FAME_SECTION, key).unwrap_or_default()
}

/// Merge command line and configuration file into the options for one run
///
/// Invalid choices are reported here, before the repository is touched.
pub fn build_run_options(args: &cli::Args, config: &ConfigManager) -> Result<RunOptions> {
    let order_by: OrderBy = resolve_choice(args.order_by.as_ref(), config, "order-by")?;
    let format: OutputFormat = resolve_choice(args.format.as_ref(), config, "format")?;

    let use_committer = args.use_committer || config.get_bool(FAME_SECTION, "use-committer")?.unwrap_or(false);

    let revision = args
        .revision
        .clone()
        .or_else(|| config.get_value(FAME_SECTION, "revision").cloned())
        .unwrap_or_else(|| DEFAULT_REVISION.to_string());

    let options = RunOptions {
        repository: resolve_repository_path(&args.repository)?,
        revision,
        order_by,
        identity: IdentityPolicy::from_use_committer(use_committer),
        format,
        extensions: resolve_list(&args.extensions, config, "extensions"),
        languages: resolve_list(&args.languages, config, "languages"),
        exclude: resolve_list(&args.exclude, config, "exclude"),
        restrict_to: resolve_list(&args.restrict_to, config, "restrict-to"),
        languages_file: args
            .languages_file
            .clone()
            .or_else(|| config.get_path(FAME_SECTION, "languages-file")),
    };

    debug!("Run options: {:?}", options);
    Ok(options)
}
