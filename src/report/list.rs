use crate::models::ResolvedLicense;

/// Render `* <name>: <license>` lines in input order.
pub fn render(licenses: &[ResolvedLicense]) -> String {
    licenses
        .iter()
        .map(|l| format!("* {}: {}\n", l.package_name, l.short_name()))
        .collect()
}
