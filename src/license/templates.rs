use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use crate::error::{ScanError, ScanResult};

/// Templates compiled into the binary, keyed by lowercase license name.
const BUNDLED: &[(&str, &str)] = &[
    ("0bsd", include_str!("../../licenses/0bsd")),
    ("apache-2.0", include_str!("../../licenses/apache-2.0")),
    ("bsd-2-clause", include_str!("../../licenses/bsd-2-clause")),
    ("bsd-3-clause", include_str!("../../licenses/bsd-3-clause")),
    ("isc", include_str!("../../licenses/isc")),
    ("mit", include_str!("../../licenses/mit")),
    ("unlicense", include_str!("../../licenses/unlicense")),
];

const PUBLIC_DOMAIN: &str = "public domain";

/// Lazily loaded license bodies for the lifetime of one run.
///
/// Bodies come from `dir` when set, falling back to the bundled set. Once a
/// key is loaded it is never re-read.
pub struct TemplateCache {
    dir: Option<PathBuf>,
    separator: Regex,
    x11: Regex,
    bodies: HashMap<String, Arc<str>>,
}

impl TemplateCache {
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir,
            separator: Regex::new(r"\s+(?:AND|OR)\s+")?,
            x11: Regex::new(r"\bx11\b")?,
            bodies: HashMap::new(),
        })
    }

    /// Split a possibly composite identifier into component identifiers.
    ///
    /// `(MIT OR Apache-2.0)` → `["MIT", "Apache-2.0"]`
    pub fn components(&self, identifier: &str) -> Vec<String> {
        let trimmed = identifier.trim();
        let trimmed = trimmed.strip_prefix('(').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix(')').unwrap_or(trimmed);
        let cleaned = trimmed.replace('#', "");

        self.separator
            .split(&cleaned)
            .map(|part| part.trim().trim_matches(|c: char| c == '(' || c == ')').trim())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Body text for every component of `identifier`, in order.
    pub async fn bodies(&mut self, identifier: &str) -> ScanResult<Vec<Arc<str>>> {
        let mut out = Vec::new();
        for component in self.components(identifier) {
            out.push(self.body(&component).await?);
        }
        Ok(out)
    }

    /// Body text for a single identifier.
    pub async fn body(&mut self, component: &str) -> ScanResult<Arc<str>> {
        let key = self.key(component);
        if key == PUBLIC_DOMAIN {
            return Ok(Arc::from(component));
        }

        if let Some(body) = self.bodies.get(&key) {
            return Ok(Arc::clone(body));
        }

        let body = self.load(&key).await?;
        self.bodies.insert(key, Arc::clone(&body));
        Ok(body)
    }

    fn key(&self, component: &str) -> String {
        let key = component.trim().to_lowercase();
        if self.x11.is_match(&key) {
            "mit".to_string()
        } else {
            key
        }
    }

    async fn load(&self, key: &str) -> ScanResult<Arc<str>> {
        // Keys become file names.
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(ScanError::not_found("license template", key));
        }

        if let Some(dir) = &self.dir {
            let path = dir.join(key);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    debug!(template = %path.display(), "loaded license template");
                    return Ok(Arc::from(&*String::from_utf8_lossy(&bytes)));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ScanError::from_io("license template", &path, e)),
            }
        }

        BUNDLED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, body)| Arc::from(*body))
            .ok_or_else(|| {
                let path = match &self.dir {
                    Some(dir) => dir.join(key),
                    None => PathBuf::from(key),
                };
                ScanError::not_found("license template", path)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache() -> TemplateCache {
        TemplateCache::new(None).unwrap()
    }

    #[test]
    fn test_components() {
        let c = cache();
        assert_eq!(c.components("MIT"), vec!["MIT"]);
        assert_eq!(c.components("MIT AND ISC"), vec!["MIT", "ISC"]);
        assert_eq!(c.components("(MIT OR Apache-2.0)"), vec!["MIT", "Apache-2.0"]);
        assert_eq!(
            c.components("(BSD-2-Clause OR MIT) AND ISC"),
            vec!["BSD-2-Clause", "MIT", "ISC"]
        );
        assert_eq!(c.components("#MIT#"), vec!["MIT"]);
        // Not a separator inside a word.
        assert_eq!(c.components("STANDARD"), vec!["STANDARD"]);
    }

    #[tokio::test]
    async fn test_x11_shares_mit_body() {
        let mut c = cache();
        let mit = c.body("MIT").await.unwrap();
        let x11 = c.body("X11").await.unwrap();
        assert!(Arc::ptr_eq(&mit, &x11));
        assert!(mit.starts_with("MIT License"));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive_and_cached() {
        let mut c = cache();
        let a = c.body("Apache-2.0").await.unwrap();
        let b = c.body("apache-2.0").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains("Apache License"));
    }

    #[tokio::test]
    async fn test_public_domain_verbatim() {
        let mut c = cache();
        let body = c.body("Public Domain").await.unwrap();
        assert_eq!(&*body, "Public Domain");
    }

    #[tokio::test]
    async fn test_missing_template() {
        let mut c = cache();
        let err = c.body("WTFPL").await.unwrap_err();
        assert!(matches!(err, ScanError::NotFound { what: "license template", .. }));
        let err = c.body("../secrets").await.unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_bodies_for_composite() {
        let mut c = cache();
        let bodies = c.bodies("MIT AND ISC").await.unwrap();
        assert_eq!(bodies.len(), 2);
        assert!(bodies[1].starts_with("ISC License"));
    }

    #[tokio::test]
    async fn test_directory_overrides_bundled() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("mit"), "custom mit").unwrap();
        std::fs::write(tmp.path().join("wtfpl"), "do what you want").unwrap();
        let mut c = TemplateCache::new(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(&*c.body("MIT").await.unwrap(), "custom mit");
        assert_eq!(&*c.body("WTFPL").await.unwrap(), "do what you want");
        assert!(c.body("ISC").await.unwrap().starts_with("ISC License"));
    }
}
