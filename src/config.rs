use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::{Cli, ReportFormat};
use crate::collector::CollectMode;
use crate::resolver::known::KnownPackages;

pub const DEFAULT_OUTPUT: &str = "licences.md";

/// Root configuration structure, deserialized from `.license-scribe/config.toml`.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report format used when `--report` is not given.
    pub report: Option<ReportFormat>,
    /// Report file, relative to the project directory.
    pub output: Option<PathBuf>,
    /// Template directory, relative to the project directory.
    pub templates: Option<PathBuf>,
    /// Report every installed package.
    pub all: bool,
    /// Include `devDependencies` of the project.
    pub include_dev: bool,
    /// Abort on the first package that fails to resolve.
    pub strict: bool,
    /// Additional known packages, keyed by license:
    ///
    /// ```toml
    /// [known]
    /// MIT = ["some-package"]
    /// ```
    pub known: HashMap<String, Vec<String>>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.license-scribe/config.toml`
/// 3. `~/.config/license-scribe/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-scribe").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-scribe")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

/// Effective settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub root: PathBuf,
    pub report: ReportFormat,
    /// Where the report goes; `None` means stdout.
    pub output: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub mode: CollectMode,
    pub strict: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub known: KnownPackages,
}

impl Settings {
    /// Merge command-line flags over `config`. Relative paths are resolved
    /// against the project directory `root`.
    pub fn new(cli: &Cli, config: Config, root: PathBuf) -> Self {
        let report = cli.report.or(config.report).unwrap_or_default();

        let output = cli.output.clone().or(config.output);
        let output = match (report, output) {
            (_, Some(path)) => Some(root.join(path)),
            (ReportFormat::Json, None) => None,
            (_, None) => Some(root.join(DEFAULT_OUTPUT)),
        };

        let templates = cli
            .templates
            .clone()
            .or(config.templates)
            .map(|dir| root.join(dir));

        let mode = if cli.all || config.all {
            CollectMode::Installed
        } else {
            CollectMode::Declared {
                include_dev: cli.dev || config.include_dev,
            }
        };

        Settings {
            report,
            output,
            templates,
            mode,
            strict: cli.strict || config.strict,
            verbose: cli.verbose,
            quiet: cli.quiet,
            known: KnownPackages::with_extra(&config.known),
            root,
        }
    }
}
