//! Block-tag balance check for the template corpus.
//!
//! A pre-deploy net for the template mistake that breaks pages at render
//! time: an `{% if %}`/`{% for %}`/`{% block %}`-style opener left
//! unclosed, or closed out of nesting order. Same corpus and same reporting
//! contract as the link guard; this is a static check, not a template
//! engine.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::corpus;
use crate::error::ConfigurationError;

/// Tags that open a block and must be closed by a matching `end<tag>`.
const PAIRED_TAGS: &[&str] = &["if", "for", "block", "macro", "with", "filter", "raw"];

/// Matches the keyword of a `{% ... %}` tag, tolerating whitespace-control
/// markers (`{%- ... -%}`, `{%+ ... %}`).
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%[-+]?\s*([a-zA-Z_][a-zA-Z0-9_]*)").expect("block tag regex should compile")
});

/// One balance problem: where it is and what is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
    /// Template path relative to the scanned root.
    pub source_file: String,
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

/// Complete result of one syntax pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxReport {
    pub issues: Vec<SyntaxIssue>,
}

impl SyntaxReport {
    /// True when every template balances.
    pub fn passes(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check block-tag balance for every template under `template_root`.
///
/// Reports every issue in one pass. Preconditions fail with
/// [`ConfigurationError`] exactly as the link guard does.
pub fn check(template_root: &Path) -> Result<SyntaxReport, ConfigurationError> {
    let files = corpus::template_files(template_root)?;

    let mut issues = Vec::new();
    for file in &files {
        let text = corpus::read_template(file)?;
        check_file(&file.relative, &text, &mut issues);
    }

    tracing::debug!(
        root = %template_root.display(),
        files = files.len(),
        issues = issues.len(),
        "template syntax check complete"
    );

    Ok(SyntaxReport { issues })
}

fn check_file(relative: &str, text: &str, issues: &mut Vec<SyntaxIssue>) {
    // Stack of (tag, opening line).
    let mut open: Vec<(String, usize)> = Vec::new();
    let mut in_raw = false;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        for caps in BLOCK_TAG.captures_iter(line) {
            let word = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

            // A raw body is literal text until its endraw; tags inside it
            // are content, not structure.
            if in_raw {
                if word == "endraw" {
                    in_raw = false;
                    open.pop();
                }
                continue;
            }
            if word == "raw" {
                in_raw = true;
                open.push((word.to_string(), line_no));
                continue;
            }

            let end_tag = word
                .strip_prefix("end")
                .filter(|tag| PAIRED_TAGS.contains(tag));

            if let Some(tag) = end_tag {
                match open.last() {
                    Some((top, _)) if top == tag => {
                        open.pop();
                    }
                    Some((top, _)) => {
                        issues.push(SyntaxIssue {
                            source_file: relative.to_string(),
                            line: line_no,
                            message: format!("found end{} while {} is still open", tag, top),
                        });
                    }
                    None => {
                        issues.push(SyntaxIssue {
                            source_file: relative.to_string(),
                            line: line_no,
                            message: format!("end{} without a matching {}", tag, tag),
                        });
                    }
                }
            } else if PAIRED_TAGS.contains(&word) {
                open.push((word.to_string(), line_no));
            }
        }
    }

    for (tag, line_no) in open {
        issues.push(SyntaxIssue {
            source_file: relative.to_string(),
            line: line_no,
            message: format!("{} opened here is never closed", tag),
        });
    }
}
