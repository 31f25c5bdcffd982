//! Enumerate installed packages under `node_modules/` and read their descriptors.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ScanError, ScanResult};
use crate::models::{PackageDescriptor, PackageManifest};

pub const MANIFEST_FILE: &str = "package.json";
pub const MODULES_DIR: &str = "node_modules";

/// Which installed packages end up in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectMode {
    /// Every package directory under `node_modules/`.
    Installed,
    /// Packages named by the root manifest, plus the dependencies of each of
    /// those (one level deep).
    Declared { include_dev: bool },
}

pub struct Collector {
    mode: CollectMode,
}

impl Collector {
    pub fn new(mode: CollectMode) -> Self {
        Self { mode }
    }

    /// Produce the package names to resolve, in lexicographic order.
    pub fn collect(&self, root: &Path) -> ScanResult<Vec<String>> {
        if !root.is_dir() {
            return Err(ScanError::not_found("project directory", root));
        }

        let wanted = match self.mode {
            CollectMode::Installed => None,
            CollectMode::Declared { include_dev } => Some(declared_names(root, include_dev)?),
        };

        let installed = list_installed(&modules_dir(root))?;
        let packages: Vec<String> = match wanted {
            None => installed,
            Some(wanted) => installed
                .into_iter()
                .filter(|name| wanted.contains(name))
                .collect(),
        };

        debug!(count = packages.len(), mode = ?self.mode, "collected packages");
        Ok(packages)
    }
}

pub fn modules_dir(root: &Path) -> PathBuf {
    root.join(MODULES_DIR)
}

/// Parse a `package.json` file.
pub fn read_manifest(path: &Path) -> ScanResult<PackageManifest> {
    let content =
        fs::read_to_string(path).map_err(|e| ScanError::from_io("manifest", path, e))?;
    parse_manifest(path, &content)
}

/// Only invalid JSON is a parse failure; fields of an unexpected shape are ignored.
fn parse_manifest(path: &Path, content: &str) -> ScanResult<PackageManifest> {
    let json: Value = serde_json::from_str(content).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PackageManifest::from_value(&json))
}

/// Names declared by the root manifest plus one level of their own dependencies.
fn declared_names(root: &Path, include_dev: bool) -> ScanResult<BTreeSet<String>> {
    let manifest = read_manifest(&root.join(MANIFEST_FILE))?;

    let mut direct: BTreeSet<String> = manifest.dependencies.into_iter().collect();
    if include_dev {
        direct.extend(manifest.dev_dependencies);
    }

    let modules = modules_dir(root);
    let mut names = direct.clone();
    for dep in &direct {
        let path = modules.join(dep).join(MANIFEST_FILE);
        match read_manifest(&path) {
            Ok(dep_manifest) => names.extend(dep_manifest.dependencies),
            Err(ScanError::NotFound { .. }) => {
                debug!(package = %dep, "declared dependency is not installed");
            }
            Err(e) => warn!(package = %dep, error = %e, "skipping transitive dependencies"),
        }
    }

    Ok(names)
}

/// List package directories under `modules`, expanding `@scope/` directories.
/// Entries that cannot be stat-ed are dropped.
fn list_installed(modules: &Path) -> ScanResult<Vec<String>> {
    let mut packages = Vec::new();

    for name in package_dirs(modules)? {
        if name.starts_with('@') {
            match package_dirs(&modules.join(&name)) {
                Ok(scoped) => packages.extend(scoped.into_iter().map(|s| format!("{}/{}", name, s))),
                Err(e) => warn!(scope = %name, error = %e, "skipping unreadable scope directory"),
            }
        } else {
            packages.push(name);
        }
    }

    packages.sort();
    Ok(packages)
}

/// Non-hidden subdirectory names of `dir` (symlinks followed).
fn package_dirs(dir: &Path) -> ScanResult<Vec<String>> {
    let read = fs::read_dir(dir).map_err(|e| ScanError::from_io("dependency directory", dir, e))?;

    let mut names = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| ScanError::from_io("dependency directory", dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // `.bin` shims, `.package-lock.json`, `.cache`
        if name.starts_with('.') {
            continue;
        }
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => names.push(name),
            Ok(_) => {}
            Err(e) => debug!(entry = %name, error = %e, "stat failed, skipping"),
        }
    }

    Ok(names)
}

/// Read the manifest and file listing of an installed package.
///
/// A missing `package.json` yields a descriptor without a license field.
pub async fn read_descriptor(modules: &Path, name: &str) -> ScanResult<PackageDescriptor> {
    let dir = modules.join(name);

    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = match tokio::fs::read_to_string(&manifest_path).await {
        Ok(content) => Some(parse_manifest(&manifest_path, &content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(ScanError::from_io("manifest", &manifest_path, e)),
    };

    let mut entries = Vec::new();
    let mut read = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| ScanError::from_io("package directory", &dir, e))?;
    while let Some(entry) = read
        .next_entry()
        .await
        .map_err(|e| ScanError::from_io("package directory", &dir, e))?
    {
        if let Ok(meta) = tokio::fs::metadata(entry.path()).await {
            if meta.is_file() {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }
    entries.sort();

    Ok(PackageDescriptor {
        name: name.to_string(),
        version: manifest.as_ref().and_then(|m| m.version.clone()),
        manifest_license: manifest.as_ref().and_then(PackageManifest::license_field),
        dir,
        entries,
    })
}
