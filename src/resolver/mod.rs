//! License resolution cascade.
//!
//! For each [`PackageDescriptor`] the first of these to produce a value wins:
//!
//! 1. the manifest's `license` / `LICENSE` / `licenses` field ([`manifest`])
//! 2. a `LICENSE*` / `LICENCE*` file, whose full text becomes the identifier
//! 3. a license heading in the README ([`readme`])
//! 4. the known-package table ([`known`])
//! 5. `UNKNOWN`

pub mod known;
pub mod manifest;
pub mod readme;

use std::path::Path;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::error::{ScanError, ScanResult};
use crate::models::{LicenseSource, PackageDescriptor, ResolvedLicense};

use known::KnownPackages;
use readme::ReadmeRules;

pub struct Resolver {
    license_file: Regex,
    readme_file: Regex,
    readme_rules: ReadmeRules,
    known: KnownPackages,
}

impl Resolver {
    pub fn new(known: KnownPackages) -> Result<Self> {
        Ok(Self {
            license_file: Regex::new(r"(?i)^licen[cs]e\b")?,
            readme_file: Regex::new(r"(?i)^readme\b")?,
            readme_rules: ReadmeRules::new()?,
            known,
        })
    }

    /// Resolve a single package. Only the license-file and README reads can fail.
    pub async fn resolve(&self, desc: &PackageDescriptor) -> ScanResult<ResolvedLicense> {
        let resolved = |license_identifier: String, source: LicenseSource| ResolvedLicense {
            package_name: desc.name.clone(),
            license_identifier,
            source,
        };

        if let Some(id) = desc.manifest_license.as_ref().and_then(manifest::identifier) {
            debug!(package = %desc.name, license = %id, "license from manifest");
            return Ok(resolved(id, LicenseSource::Manifest));
        }

        // Listing order decides when several files match.
        if let Some(file) = self.find_entry(desc, &self.license_file) {
            debug!(package = %desc.name, file = %file, "license from file");
            let text = read_text(&desc.dir.join(file)).await?;
            return Ok(resolved(text, LicenseSource::LicenseFile));
        }

        if let Some(file) = self.find_entry(desc, &self.readme_file) {
            let text = read_text(&desc.dir.join(file)).await?;
            if let Some((rule, id)) = self.readme_rules.find(&text) {
                debug!(package = %desc.name, rule, license = %id, "license from readme");
                return Ok(resolved(id, LicenseSource::ReadmeHeuristic));
            }
        }

        if let Some(license) = self.known.lookup(&desc.name) {
            debug!(package = %desc.name, license, "license from known table");
            return Ok(resolved(license.to_string(), LicenseSource::KnownTable));
        }

        debug!(package = %desc.name, version = ?desc.version, "license unknown");
        Ok(ResolvedLicense::unknown(&desc.name))
    }

    fn find_entry<'a>(&self, desc: &'a PackageDescriptor, pattern: &Regex) -> Option<&'a str> {
        desc.entries
            .iter()
            .map(String::as_str)
            .find(|name| pattern.is_match(name))
    }
}

async fn read_text(path: &Path) -> ScanResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ScanError::from_io("file", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
