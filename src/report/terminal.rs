use std::collections::HashMap;
use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LicenseSource, ResolvedLicense};

/// Print a colored summary of the resolved licenses to stdout.
pub fn render(licenses: &[ResolvedLicense], path: &Path, report: Option<&Path>, verbose: bool) {
    let total = licenses.len();
    let count = |source: LicenseSource| licenses.iter().filter(|l| l.source == source).count();
    let unknown = count(LicenseSource::Unknown);

    println!(
        "\n {} v{}",
        "license-scribe".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanned: {}", path.display());
    if let Some(report) = report {
        println!(" Report : {}", report.display());
    }
    println!();

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total packages     : {}", total));
    for source in [
        LicenseSource::Manifest,
        LicenseSource::LicenseFile,
        LicenseSource::ReadmeHeuristic,
        LicenseSource::KnownTable,
    ] {
        println!(
            " │  {:<48} │",
            format!("{}  {:<16}: {:>4}", "✓".green(), source.to_string(), count(source))
        );
    }
    println!(
        " │  {:<48} │",
        format!("{}  {:<16}: {:>4}", "⚠".yellow(), "unknown", unknown)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    render_license_table(licenses);

    if unknown > 0 {
        println!("\n {} Packages without a license:\n", "[UNKNOWN]".yellow().bold());
        for license in licenses.iter().filter(|l| l.source == LicenseSource::Unknown) {
            println!("   {}", license.package_name);
        }
    }

    if verbose && total > 0 {
        println!("\n {} All packages:\n", "[ALL]".green().bold());
        render_package_table(licenses);
    }
    println!();
}

/// Licenses by number of packages using them, most common first.
fn render_license_table(licenses: &[ResolvedLicense]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
        ]);

    for (license, count) in license_counts(licenses) {
        let color = if license == crate::models::UNKNOWN_LICENSE {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(license).fg(color),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn render_package_table(licenses: &[ResolvedLicense]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for license in licenses {
        let source_color = match license.source {
            LicenseSource::Manifest => Color::Green,
            LicenseSource::LicenseFile => Color::Cyan,
            LicenseSource::ReadmeHeuristic | LicenseSource::KnownTable => Color::Yellow,
            LicenseSource::Unknown => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(&license.package_name),
            Cell::new(license.short_name()),
            Cell::new(license.source.to_string()).fg(source_color),
        ]);
    }

    println!("{}", table);
}

fn license_counts(licenses: &[ResolvedLicense]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for license in licenses {
        *counts.entry(license.short_name()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(name: &str, id: &str) -> ResolvedLicense {
        ResolvedLicense {
            package_name: name.to_string(),
            license_identifier: id.to_string(),
            source: LicenseSource::Manifest,
        }
    }

    #[test]
    fn test_license_counts_sorted() {
        let licenses = vec![
            resolved("a", "MIT"),
            resolved("b", "ISC"),
            resolved("c", "MIT"),
            resolved("d", "Apache-2.0"),
        ];
        assert_eq!(
            license_counts(&licenses),
            vec![
                ("MIT".to_string(), 2),
                ("Apache-2.0".to_string(), 1),
                ("ISC".to_string(), 1),
            ]
        );
    }
}
