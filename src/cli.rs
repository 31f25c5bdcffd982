use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "license-scribe",
    about = "Resolve the licenses of installed npm dependencies and write a license report",
    version
)]
pub struct Cli {
    /// Project directory containing package.json and node_modules/
    pub path: PathBuf,

    /// Report format [default: list]
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Report file, relative to the project directory [default: licences.md]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory of license templates used by the document report
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Config file [default: ./.license-scribe/config.toml, fallback ~/.config/license-scribe/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report every installed package, not only declared dependencies
    #[arg(long)]
    pub all: bool,

    /// Include the project's devDependencies
    #[arg(long)]
    pub dev: bool,

    /// Abort on the first package that fails to resolve
    #[arg(long)]
    pub strict: bool,

    /// Show every package in the terminal summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print `done`
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `* name: license` per package
    #[default]
    List,
    /// Full license texts per package
    Document,
    /// Resolved licenses as JSON
    Json,
}
