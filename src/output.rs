//! CLI output formatting.
//!
//! Output is a content inventory: every entity leads with its positional
//! index and title, with the file or document id it maps to as secondary
//! context. Each command has a `format_*` function (returns `Vec<String>`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Destinations → destinations/index.html
//!     001 Cancún → destinations/cancun/index.html
//!     002 Tulum → destinations/tulum/index.html
//! Articles → articles/index.html
//!     001 The Best Beaches → articles/best-beaches/index.html
//!
//! Pages
//!     001 About Us → about/index.html
//!
//! Not found → 404.html
//! Sitemap → sitemap.xml (7 URLs)
//! Generated 2 destinations, 1 article, 1 page
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Cancún (destination)
//!     Source: destination-cancun
//! 002 Untitled (page)
//!     Source: page-draft
//!     title: is required
//!
//! Checked 2 documents: 1 with problems, 1 violation
//! ```

use crate::generate::{BuildReport, GeneratedPage, RouteKind};
use crate::schema::DocumentReport;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// "1 article", "2 articles".
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn route_line(title: &str, page: &GeneratedPage) -> String {
    format!("{} \u{2192} {}", title, page.file.display())
}

fn indexed_routes(lines: &mut Vec<String>, pages: &[&GeneratedPage]) {
    for (i, page) in pages.iter().enumerate() {
        let title = format!("{} {}", format_index(i + 1), page.title);
        lines.push(format!("{}{}", indent(1), route_line(&title, page)));
    }
}

// ============================================================================
// Build
// ============================================================================

/// Inventory of a build: every written route grouped by kind.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let of_kind = |kind: RouteKind| -> Vec<&GeneratedPage> {
        report.pages.iter().filter(|p| p.kind == kind).collect()
    };

    for home in of_kind(RouteKind::Home) {
        lines.push(route_line("Home", home));
    }
    for index in of_kind(RouteKind::Destinations) {
        lines.push(route_line("Destinations", index));
    }
    indexed_routes(&mut lines, &of_kind(RouteKind::Destination));
    for index in of_kind(RouteKind::Articles) {
        lines.push(route_line("Articles", index));
    }
    indexed_routes(&mut lines, &of_kind(RouteKind::Article));

    let pages = of_kind(RouteKind::Page);
    if !pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        indexed_routes(&mut lines, &pages);
    }

    lines.push(String::new());
    for missing in of_kind(RouteKind::NotFound) {
        lines.push(route_line("Not found", missing));
    }
    if let Some((file, count)) = &report.sitemap {
        lines.push(format!(
            "Sitemap \u{2192} {} ({} URLs)",
            file.display(),
            count
        ));
    }
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.count(RouteKind::Destination), "destination"),
        plural(report.count(RouteKind::Article), "article"),
        plural(pages.len(), "page"),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Every checked document with its violations indented beneath it.
pub fn format_check_output(reports: &[DocumentReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            report.title,
            report.doc_type
        ));
        lines.push(format!("{}Source: {}", indent(1), report.id));
        for violation in &report.violations {
            lines.push(format!("{}{}", indent(1), violation));
        }
    }

    let failing = reports.iter().filter(|r| !r.violations.is_empty()).count();
    let total: usize = reports.iter().map(|r| r.violations.len()).sum();
    if !reports.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {} with problems, {}",
        plural(reports.len(), "document"),
        failing,
        plural(total, "violation")
    ));
    lines
}

pub fn print_check_output(reports: &[DocumentReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::output_file;
    use crate::schema::Violation;
    use std::path::PathBuf;

    fn page(kind: RouteKind, title: &str, path: &str) -> GeneratedPage {
        GeneratedPage {
            kind,
            title: title.to_string(),
            path: path.to_string(),
            file: output_file(path),
        }
    }

    fn report() -> BuildReport {
        BuildReport {
            source: "fixture".into(),
            output_dir: PathBuf::from("dist"),
            pages: vec![
                page(RouteKind::Home, "Home", "/"),
                page(RouteKind::Destinations, "Destinations", "/destinations"),
                page(RouteKind::Articles, "Articles", "/articles"),
                page(RouteKind::Destination, "Cancún", "/destinations/cancun"),
                page(RouteKind::Destination, "Tulum", "/destinations/tulum"),
                page(RouteKind::Article, "Best Beaches", "/articles/best-beaches"),
                page(RouteKind::Page, "About Us", "/about"),
                page(RouteKind::NotFound, "Page Not Found", "/404"),
            ],
            sitemap: Some((PathBuf::from("sitemap.xml"), 7)),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_handles_one() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "article"), "3 articles");
    }

    // =========================================================================
    // Build output
    // =========================================================================

    #[test]
    fn build_output_lists_routes_by_kind() {
        let lines = format_build_output(&report());
        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert_eq!(lines[1], "Destinations \u{2192} destinations/index.html");
        assert_eq!(lines[2], "    001 Cancún \u{2192} destinations/cancun/index.html");
        assert_eq!(lines[3], "    002 Tulum \u{2192} destinations/tulum/index.html");
        assert_eq!(lines[4], "Articles \u{2192} articles/index.html");
        assert!(lines.contains(&"    001 About Us \u{2192} about/index.html".to_string()));
        assert!(lines.contains(&"Not found \u{2192} 404.html".to_string()));
        assert!(lines.contains(&"Sitemap \u{2192} sitemap.xml (7 URLs)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 destinations, 1 article, 1 page"
        );
    }

    #[test]
    fn build_output_without_pages_or_sitemap() {
        let mut r = report();
        r.pages.retain(|p| p.kind != RouteKind::Page);
        r.sitemap = None;
        let lines = format_build_output(&r);
        assert!(!lines.contains(&"Pages".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Sitemap")));
    }

    // =========================================================================
    // Check output
    // =========================================================================

    #[test]
    fn check_output_indents_violations() {
        let reports = vec![
            DocumentReport {
                id: "destination-cancun".into(),
                doc_type: "destination".into(),
                title: "Cancún".into(),
                violations: vec![],
            },
            DocumentReport {
                id: "page-x".into(),
                doc_type: "page".into(),
                title: "Untitled".into(),
                violations: vec![Violation {
                    path: "title".into(),
                    message: "is required".into(),
                }],
            },
        ];
        let lines = format_check_output(&reports);
        assert_eq!(lines[0], "001 Cancún (destination)");
        assert_eq!(lines[1], "    Source: destination-cancun");
        assert_eq!(lines[2], "002 Untitled (page)");
        assert_eq!(lines[4], "    title: is required");
        assert_eq!(
            lines.last().unwrap(),
            "Checked 2 documents: 1 with problems, 1 violation"
        );
    }

    #[test]
    fn check_output_for_empty_source() {
        let lines = format_check_output(&[]);
        assert_eq!(lines, vec!["Checked 0 documents: 0 with problems, 0 violations"]);
    }
}
