//! Route classification policy: the data half of the template link guard.
//!
//! The scanner in [`crate::guard`] knows nothing about the portal's route
//! map. It asks a [`RoutePolicy`], an ordered table of (prefix,
//! classification) rules, to classify each extracted link target by longest
//! matching prefix. New forbidden or allowed prefixes ship as data, either
//! the built-in table below or a TOML rule file, never as scanner changes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Classification of a link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Internal API endpoint. Templates must never link to it directly.
    ForbiddenApi,
    /// Browser-navigable page, fine to link from templates.
    AllowedWeb,
    /// Not subject to policy (external URLs, anchors, assets).
    Ignored,
}

/// One classification rule: targets starting with `prefix` classify as
/// `classification`, unless a longer rule prefix also matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub classification: RouteClass,
}

/// Rule table consulted by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    pub rules: Vec<RouteRule>,
}

impl Default for RoutePolicy {
    /// The portal's own separation policy: the `/auth/` API namespace is
    /// submission-only, the web-facing pages are the permitted link
    /// targets, and static assets are not routes at all.
    fn default() -> Self {
        Self {
            rules: vec![
                rule("/auth/", RouteClass::ForbiddenApi),
                rule("/login", RouteClass::AllowedWeb),
                rule("/signup", RouteClass::AllowedWeb),
                rule("/logout", RouteClass::AllowedWeb),
                rule("/dashboard", RouteClass::AllowedWeb),
                rule("/static/", RouteClass::Ignored),
            ],
        }
    }
}

fn rule(prefix: &str, classification: RouteClass) -> RouteRule {
    RouteRule {
        prefix: prefix.to_string(),
        classification,
    }
}

impl RoutePolicy {
    /// Classify a link target by longest matching rule prefix.
    ///
    /// Targets matching no rule, which covers external URLs, `mailto:`
    /// links, anchors, and anything else that is not a known route,
    /// classify as [`RouteClass::Ignored`].
    pub fn classify(&self, target: &str) -> RouteClass {
        self.rules
            .iter()
            .filter(|rule| target.starts_with(&rule.prefix))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| rule.classification)
            .unwrap_or(RouteClass::Ignored)
    }
}

/// Load a rule table from a TOML file.
///
/// Format: a top-level `rules` array.
///
/// ```toml
/// [[rules]]
/// prefix = "/auth/"
/// classification = "forbidden_api"
///
/// [[rules]]
/// prefix = "/login"
/// classification = "allowed_web"
/// ```
pub fn load_policy(path: &Path) -> Result<RoutePolicy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;

    let policy: RoutePolicy =
        toml::from_str(&content).with_context(|| "Failed to parse policy file")?;

    if policy.rules.is_empty() {
        anyhow::bail!("policy file declares no rules");
    }

    for rule in &policy.rules {
        if rule.prefix.is_empty() {
            anyhow::bail!("policy rule prefixes must not be empty");
        }
    }

    Ok(policy)
}
