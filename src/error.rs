//! Configuration-time error type shared by the template checks.
//!
//! Only environment and filesystem preconditions are errors here. Policy
//! violations are never errors: they are report content, so a single scan
//! can surface every offending link instead of failing on the first.

use std::path::PathBuf;

/// Precondition failure while preparing or walking a template corpus.
///
/// A missing or unreadable corpus is a hard failure, deliberately distinct
/// from a clean (zero-violation) report.
#[derive(Debug)]
pub enum ConfigurationError {
    /// The template root does not exist.
    TemplateRootMissing(PathBuf),
    /// The template root exists but is not a directory.
    TemplateRootNotADirectory(PathBuf),
    /// Directory traversal failed below the template root.
    Walk(String),
    /// A template file could not be read as UTF-8 text.
    TemplateRead { path: PathBuf, cause: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::TemplateRootMissing(path) => {
                write!(f, "template root not found: {}", path.display())
            }
            ConfigurationError::TemplateRootNotADirectory(path) => {
                write!(f, "template root is not a directory: {}", path.display())
            }
            ConfigurationError::Walk(cause) => {
                write!(f, "template tree walk failed: {}", cause)
            }
            ConfigurationError::TemplateRead { path, cause } => {
                write!(f, "failed to read template {}: {}", path.display(), cause)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
