
use tracing::warn;

use crate::error::ScanResult;
use crate::license::templates::TemplateCache;
use crate::models::{LicenseSource, ResolvedLicense};

/// Render a Markdown document with the license text of every package.
///
/// License files are embedded as-is; identifiers are expanded through
/// `templates`. A missing template aborts when `strict`, otherwise the
/// section falls back to the bare identifier.
pub async fn render(
    licenses: &[ResolvedLicense],
    templates: &mut TemplateCache,
    strict: bool,
) -> ScanResult<String> {
    let mut out = String::from("# Third-party licenses\n");

    for license in licenses {
        out.push_str(&format!("\n## {}\n\n", license.package_name));

        let bodies: Vec<String> = match license.source {
            LicenseSource::LicenseFile | LicenseSource::Unknown => {
                vec![license.license_identifier.clone()]
            }
            _ => match templates.bodies(&license.license_identifier).await {
                Ok(bodies) => bodies.iter().map(|b| b.to_string()).collect(),
                Err(e) if strict => return Err(e),
                Err(e) => {
                    warn!(package = %license.package_name, error = %e, "no license template");
                    vec![license.license_identifier.clone()]
                }
            },
        };

        for body in bodies {
            out.push_str(&format!("```text\n{}\n```\n", body.trim_end()));
        }
    }

    Ok(out)
}
