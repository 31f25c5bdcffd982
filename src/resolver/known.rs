use std::collections::HashMap;

/// Packages known to use a license without declaring it anywhere a machine
/// can find. Keyed by license.
const KNOWN_LICENSES: &[(&str, &[&str])] = &[
    ("MIT", &["extsprintf", "indexof", "component-inherit", "callsite"]),
    ("Public Domain", &["jsonify"]),
];

/// Package name → license lookup, inverted from [`KNOWN_LICENSES`] and any
/// configured additions.
#[derive(Debug, Clone, Default)]
pub struct KnownPackages {
    by_package: HashMap<String, String>,
}

impl KnownPackages {
    pub fn builtin() -> Self {
        let mut known = Self::default();
        for (license, packages) in KNOWN_LICENSES {
            known.insert(license, packages.iter().copied());
        }
        known
    }

    /// Built-in table extended by `extra` (license → packages). Entries in
    /// `extra` take precedence over built-in ones for the same package.
    pub fn with_extra(extra: &HashMap<String, Vec<String>>) -> Self {
        let mut known = Self::builtin();
        // Sorted so a package listed under two licenses resolves the same way every run.
        let mut licenses: Vec<&String> = extra.keys().collect();
        licenses.sort();
        for license in licenses {
            known.insert(license, extra[license].iter().map(String::as_str));
        }
        known
    }

    fn insert<'a>(&mut self, license: &str, packages: impl Iterator<Item = &'a str>) {
        for package in packages {
            self.by_package
                .insert(package.to_string(), license.to_string());
        }
    }

    pub fn lookup(&self, package: &str) -> Option<&str> {
        self.by_package.get(package).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin() {
        let known = KnownPackages::builtin();
        assert_eq!(known.lookup("extsprintf"), Some("MIT"));
        assert_eq!(known.lookup("jsonify"), Some("Public Domain"));
        assert_eq!(known.lookup("left-pad"), None);
    }

    #[test]
    fn test_extra_overrides_builtin() {
        let mut extra = HashMap::new();
        extra.insert("ISC".to_string(), vec!["extsprintf".to_string(), "mine".to_string()]);
        let known = KnownPackages::with_extra(&extra);
        assert_eq!(known.lookup("extsprintf"), Some("ISC"));
        assert_eq!(known.lookup("mine"), Some("ISC"));
        assert_eq!(known.lookup("callsite"), Some("MIT"));
    }
}
