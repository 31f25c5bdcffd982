use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subset of `package.json` this tool reads.
///
/// Built from an untyped [`Value`] so fields of an unexpected shape are
/// ignored instead of failing the whole manifest.
#[derive(Debug, Default)]
pub struct PackageManifest {
    pub version: Option<String>,
    /// Keys of `dependencies`, sorted.
    pub dependencies: Vec<String>,
    /// Keys of `devDependencies`, sorted.
    pub dev_dependencies: Vec<String>,
    pub license: Option<Value>,
    pub license_upper: Option<Value>,
    pub licenses: Option<Value>,
}

impl PackageManifest {
    pub fn from_value(json: &Value) -> Self {
        let keys = |section: &str| -> Vec<String> {
            let mut names: Vec<String> = json
                .get(section)
                .and_then(|v| v.as_object())
                .map(|deps| deps.keys().cloned().collect())
                .unwrap_or_default();
            names.sort();
            names
        };
        let field = |name: &str| json.get(name).filter(|v| !v.is_null()).cloned();

        PackageManifest {
            version: json
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            dependencies: keys("dependencies"),
            dev_dependencies: keys("devDependencies"),
            license: field("license"),
            license_upper: field("LICENSE"),
            licenses: field("licenses"),
        }
    }

    /// The first non-empty license field, checked as `license`, `LICENSE`, `licenses`.
    pub fn license_field(&self) -> Option<LicenseField> {
        [&self.license, &self.license_upper, &self.licenses]
            .into_iter()
            .flatten()
            .find_map(LicenseField::from_value)
    }
}

/// A license declaration as it appears in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseField {
    /// `"license": "MIT"`
    Text(String),
    /// `"license": { "type": "MIT", "url": "..." }`
    Typed(String),
    /// `"licenses": [ ... ]`
    List(Vec<LicenseField>),
}

impl LicenseField {
    /// Interpret a raw JSON value. Empty strings, empty lists, objects without
    /// a string `type` and every other JSON shape count as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| LicenseField::Text(s.to_string()))
            }
            Value::Object(map) => map
                .get("type")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| LicenseField::Typed(t.to_string())),
            Value::Array(items) => {
                let items: Vec<LicenseField> =
                    items.iter().filter_map(LicenseField::from_value).collect();
                (!items.is_empty()).then_some(LicenseField::List(items))
            }
            _ => None,
        }
    }
}

/// Immutable snapshot of an installed package, read once per run.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    pub name: String,
    pub dir: PathBuf,
    pub version: Option<String>,
    pub manifest_license: Option<LicenseField>,
    /// Regular files in the package directory, sorted by name.
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseSource {
    Manifest,
    LicenseFile,
    ReadmeHeuristic,
    KnownTable,
    Unknown,
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::Manifest => write!(f, "manifest"),
            LicenseSource::LicenseFile => write!(f, "license file"),
            LicenseSource::ReadmeHeuristic => write!(f, "readme"),
            LicenseSource::KnownTable => write!(f, "known table"),
            LicenseSource::Unknown => write!(f, "unknown"),
        }
    }
}

pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// The outcome of resolving one package. For [`LicenseSource::LicenseFile`]
/// the identifier holds the full text of the license file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLicense {
    pub package_name: String,
    pub license_identifier: String,
    pub source: LicenseSource,
}

impl ResolvedLicense {
    pub fn unknown(package_name: impl Into<String>) -> Self {
        ResolvedLicense {
            package_name: package_name.into(),
            license_identifier: UNKNOWN_LICENSE.to_string(),
            source: LicenseSource::Unknown,
        }
    }

    /// A one-line label for the license, sniffing license-file bodies.
    pub fn short_name(&self) -> String {
        match self.source {
            LicenseSource::LicenseFile => crate::license::sniff::short_name(&self.license_identifier)
                .map(str::to_string)
                .unwrap_or_else(|| "custom (license file)".to_string()),
            _ => self.license_identifier.clone(),
        }
    }
}
