//! Static link guard for the template corpus.
//!
//! Templates must never link straight into the internal authentication API
//! (`/auth/...`); browsers belong on the web pages that wrap those
//! endpoints. The scan extracts every link target from every template and
//! classifies each one against a [`RoutePolicy`], reporting all violations
//! in a single pass so CI output is the complete list, not just the first
//! hit.
//!
//! The extractor is deliberately a line-wise pattern match, not an HTML
//! parser. It covers the forms links actually take in this corpus: quoted
//! `href`/`action` attribute values, and bare quoted root-relative paths
//! (the shape fetch and redirect targets take in inline scripts).

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::corpus;
use crate::error::ConfigurationError;
use crate::policy::{RouteClass, RoutePolicy};

/// Matches one link-bearing form: an `href`/`action` attribute with a
/// quoted value, or a bare quoted path starting with `/`.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:href|action)\s*=\s*(?:"([^"]*)"|'([^']*)')|"(/[^"]*)"|'(/[^']*)'"#)
        .expect("link target regex should compile")
});

/// One extracted link target, with provenance and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOccurrence {
    /// Template path relative to the scanned root.
    pub source_file: String,
    /// 1-based line number.
    pub line: usize,
    /// The link target exactly as written in the template.
    pub target: String,
    pub classification: RouteClass,
}

/// Complete result of one scan: every occurrence, in (file, line, column)
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuardReport {
    pub occurrences: Vec<LinkOccurrence>,
}

impl GuardReport {
    /// Occurrences classified [`RouteClass::ForbiddenApi`], in scan order.
    pub fn violations(&self) -> Vec<&LinkOccurrence> {
        self.occurrences
            .iter()
            .filter(|o| o.classification == RouteClass::ForbiddenApi)
            .collect()
    }

    /// True when the corpus passes the guard.
    pub fn passes(&self) -> bool {
        !self
            .occurrences
            .iter()
            .any(|o| o.classification == RouteClass::ForbiddenApi)
    }
}

/// Scan every template under `template_root`, classifying each extracted
/// link target against `policy`.
///
/// The walk is lexical and line numbers are 1-based, so an unchanged tree
/// always produces an identical report. A missing root or unreadable file
/// is a [`ConfigurationError`], never an empty report.
pub fn scan(
    template_root: &Path,
    policy: &RoutePolicy,
) -> Result<GuardReport, ConfigurationError> {
    let files = corpus::template_files(template_root)?;

    let mut occurrences = Vec::new();
    for file in &files {
        let text = corpus::read_template(file)?;
        for (idx, line) in text.lines().enumerate() {
            for target in extract_link_targets(line) {
                occurrences.push(LinkOccurrence {
                    source_file: file.relative.clone(),
                    line: idx + 1,
                    target: target.to_string(),
                    classification: policy.classify(target),
                });
            }
        }
    }

    tracing::debug!(
        root = %template_root.display(),
        files = files.len(),
        occurrences = occurrences.len(),
        "template link scan complete"
    );

    Ok(GuardReport { occurrences })
}

/// Extract every link target from one line, left to right.
fn extract_link_targets(line: &str) -> Vec<&str> {
    LINK_TARGET
        .captures_iter(line)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_double_quoted_href() {
        assert_eq!(
            extract_link_targets(r#"<a href="/login">Sign in</a>"#),
            vec!["/login"]
        );
    }

    #[test]
    fn extracts_single_quoted_href() {
        assert_eq!(
            extract_link_targets("<a href='/signup'>Join</a>"),
            vec!["/signup"]
        );
    }

    #[test]
    fn extracts_form_action_but_not_other_attributes() {
        assert_eq!(
            extract_link_targets(r#"<form method="post" action="/auth/login">"#),
            vec!["/auth/login"]
        );
    }

    #[test]
    fn extracts_bare_quoted_paths() {
        assert_eq!(
            extract_link_targets(r#"fetch("/auth/refresh", { method: "POST" })"#),
            vec!["/auth/refresh"]
        );
        assert_eq!(
            extract_link_targets("window.location = '/dashboard';"),
            vec!["/dashboard"]
        );
    }

    #[test]
    fn attribute_name_is_case_insensitive() {
        assert_eq!(
            extract_link_targets(r#"<A HREF="/login">Sign in</A>"#),
            vec!["/login"]
        );
    }

    #[test]
    fn tolerates_whitespace_around_equals() {
        assert_eq!(
            extract_link_targets(r#"<a href = "/login">Sign in</a>"#),
            vec!["/login"]
        );
    }

    #[test]
    fn multiple_targets_keep_line_order() {
        assert_eq!(
            extract_link_targets(r#"<a href="/login">in</a> <a href="/signup">up</a>"#),
            vec!["/login", "/signup"]
        );
    }

    #[test]
    fn external_targets_come_from_attributes_only() {
        // href captures whatever the attribute says; bare literals must
        // start with a slash to count as link targets.
        assert_eq!(
            extract_link_targets(r#"<a href="https://example.com">out</a>"#),
            vec!["https://example.com"]
        );
        assert!(extract_link_targets(r#"let s = "https://example.com";"#).is_empty());
    }

    #[test]
    fn plain_markup_yields_nothing() {
        assert!(extract_link_targets("<p>Welcome back</p>").is_empty());
        assert!(extract_link_targets("").is_empty());
    }

    #[test]
    fn violations_filters_to_forbidden_only() {
        let policy = RoutePolicy::default();
        let report = GuardReport {
            occurrences: vec![
                LinkOccurrence {
                    source_file: "index.html".to_string(),
                    line: 3,
                    target: "/login".to_string(),
                    classification: policy.classify("/login"),
                },
                LinkOccurrence {
                    source_file: "index.html".to_string(),
                    line: 9,
                    target: "/auth/login".to_string(),
                    classification: policy.classify("/auth/login"),
                },
            ],
        };

        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].target, "/auth/login");
        assert!(!report.passes());
    }

    #[test]
    fn empty_report_passes() {
        assert!(GuardReport::default().passes());
    }
}
