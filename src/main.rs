//! `license-scribe`: resolve the license of every installed npm dependency
//! and write a license report.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load config ([`config::load_config`]).
//! 2. Collect package names under `node_modules/` ([`collector`]).
//! 3. Resolve each package's license concurrently ([`resolver`]).
//! 4. Render the requested report ([`report`]) and write it.
//! 5. Print `done`.

mod cli;
mod collector;
mod config;
mod error;
mod license;
mod models;
mod report;
mod resolver;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use collector::{modules_dir, read_descriptor, Collector};
use config::{load_config, Settings};
use error::ScanResult;
use license::templates::TemplateCache;
use models::ResolvedLicense;
use resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Resolve project path against the working directory
    let root = std::env::current_dir()?.join(&cli.path);
    let root = root.canonicalize().unwrap_or(root);

    let config = load_config(&root, cli.config.as_deref())?;
    let settings = Settings::new(&cli, config, root);

    run(&settings).await?;

    if settings.output.is_some() {
        println!("done");
    } else {
        eprintln!("done");
    }
    Ok(())
}

async fn run(settings: &Settings) -> Result<()> {
    let names = Collector::new(settings.mode).collect(&settings.root)?;
    info!(count = names.len(), root = %settings.root.display(), "resolving licenses");

    let resolver = Resolver::new(settings.known.clone())?;
    let licenses = resolve_all(settings, &resolver, &names).await?;

    let rendered = match settings.report {
        ReportFormat::List => report::list::render(&licenses),
        ReportFormat::Document => {
            let mut templates = TemplateCache::new(settings.templates.clone())?;
            report::document::render(&licenses, &mut templates, settings.strict).await?
        }
        ReportFormat::Json => serde_json::to_string_pretty(&licenses)? + "\n",
    };

    // Nothing is written until every package has been resolved.
    match &settings.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("writing report {}", path.display()))?;
            info!(report = %path.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    if !settings.quiet && settings.output.is_some() {
        report::terminal::render(
            &licenses,
            &settings.root,
            settings.output.as_deref(),
            settings.verbose,
        );
    }

    Ok(())
}

/// Resolve every package, in batches of concurrent reads. Results keep the
/// order of `names`.
///
/// A package that fails is reported as `UNKNOWN` with a warning, unless the
/// run is strict.
async fn resolve_all(
    settings: &Settings,
    resolver: &Resolver,
    names: &[String],
) -> Result<Vec<ResolvedLicense>> {
    const BATCH_SIZE: usize = 64;

    let modules = modules_dir(&settings.root);

    let pb = if !settings.quiet {
        let pb = ProgressBar::new(names.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut licenses = Vec::with_capacity(names.len());

    for batch in names.chunks(BATCH_SIZE) {
        let futures: Vec<_> = batch
            .iter()
            .map(|name| resolve_one(resolver, &modules, name))
            .collect();

        let results = join_all(futures).await;

        for (name, result) in batch.iter().zip(results) {
            match result {
                Ok(license) => licenses.push(license),
                Err(e) if settings.strict => {
                    return Err(e).with_context(|| format!("resolving {}", name));
                }
                Err(e) => {
                    warn!(package = %name, error = %e, "could not resolve license");
                    licenses.push(ResolvedLicense::unknown(name));
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(licenses)
}

async fn resolve_one(
    resolver: &Resolver,
    modules: &Path,
    name: &str,
) -> ScanResult<ResolvedLicense> {
    let desc = read_descriptor(modules, name).await?;
    resolver.resolve(&desc).await
}
