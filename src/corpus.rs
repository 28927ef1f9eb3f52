//! Template corpus enumeration.
//!
//! Both static checks (link guard and syntax check) walk the same corpus:
//! every file under the template root matching the fixed extension filter,
//! in deterministic lexical order, so an unchanged tree always yields a
//! byte-identical report.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::ConfigurationError;

/// Include patterns identifying template sources under the root.
pub const TEMPLATE_GLOBS: &[&str] = &["**/*.html"];

/// One template file: root-relative path (for reports) plus absolute path
/// (for reading).
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub relative: String,
    pub absolute: PathBuf,
}

/// Enumerate template files under `root` in lexical order.
///
/// Fails when the root is missing or not a directory. Callers must be able
/// to tell "nothing to scan" apart from "scanned clean".
pub fn template_files(root: &Path) -> Result<Vec<TemplateFile>, ConfigurationError> {
    if !root.exists() {
        return Err(ConfigurationError::TemplateRootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ConfigurationError::TemplateRootNotADirectory(
            root.to_path_buf(),
        ));
    }

    let include = template_globset();

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| ConfigurationError::Walk(e.to_string()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative = relative.to_string_lossy().to_string();

        if !include.is_match(&relative) {
            continue;
        }

        files.push(TemplateFile {
            relative,
            absolute: path.to_path_buf(),
        });
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(files)
}

/// Read a template as UTF-8 text, failing loudly. A check that silently
/// skipped unreadable files could pass a corpus it never actually saw.
pub fn read_template(file: &TemplateFile) -> Result<String, ConfigurationError> {
    std::fs::read_to_string(&file.absolute).map_err(|e| ConfigurationError::TemplateRead {
        path: file.absolute.clone(),
        cause: e.to_string(),
    })
}

fn template_globset() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEMPLATE_GLOBS {
        builder.add(Glob::new(pattern).expect("template glob should compile"));
    }
    builder.build().expect("template globset should build")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globset_matches_html_at_any_depth() {
        let include = template_globset();

        assert!(include.is_match("index.html"));
        assert!(include.is_match("partials/nav.html"));
        assert!(include.is_match("auth/account/settings.html"));
        assert!(!include.is_match("notes.md"));
        assert!(!include.is_match("static/app.js"));
    }
}
