//! # Portico
//!
//! Configuration resolution and template safety checks for the Portico web
//! portal.
//!
//! The portal itself (routes, pages, sessions) is thin glue; the pieces
//! with real behavior live here, as a library the app consumes at startup
//! and a CLI (`portico`) that CI runs against the template tree:
//!
//! - **Config resolution**: snapshot the environment once, normalize the
//!   database connection URL (hosted `postgres://` becomes the
//!   driver-qualified `postgresql://`, nothing configured falls back to a
//!   local sqlite file), resolve the public base URL, and hand back one
//!   immutable [`config::ResolvedConfig`].
//! - **Template link guard**: walk the template tree, extract every link
//!   target, classify each against a route policy, and report every
//!   forbidden `/auth/...` link with file and line.
//!
//! ## Quick Start
//!
//! ```bash
//! portico config                # show the resolved configuration
//! portico ping                  # open the configured database
//! portico check links           # CI gate: no template links into the API
//! portico check syntax          # CI gate: block tags balance
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment snapshot and startup configuration |
//! | [`policy`] | Route classification rules (data, not code) |
//! | [`corpus`] | Deterministic template-tree enumeration |
//! | [`guard`] | Link extraction, classification, and reporting |
//! | [`syntax`] | Block-tag balance check |
//! | [`db`] | Connection pool from a resolved descriptor |
//! | [`error`] | Configuration-time error type |

pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod guard;
pub mod policy;
pub mod syntax;
