//! # Portico CLI (`portico`)
//!
//! The `portico` binary is the operational interface for the portal's
//! configuration and template checks. `config` and `ping` exercise startup
//! configuration exactly the way the app resolves it; `check` runs the
//! static template checks CI gates on.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `portico config` | Resolve and print the effective configuration |
//! | `portico ping` | Open the configured database and run a liveness query |
//! | `portico check links` | Fail when templates link into forbidden API routes |
//! | `portico check syntax` | Fail on unbalanced template block tags |
//!
//! Checks are silent on success and list every finding on failure, so CI
//! output is exactly the list of things to fix. `--json` swaps the human
//! output for a machine-readable report.
//!
//! ## Examples
//!
//! ```bash
//! # Show what the app would resolve from this shell's environment
//! portico config
//!
//! # Verify DATABASE_URL actually accepts connections
//! DATABASE_URL=postgres://app@db/portico portico ping
//!
//! # CI gate over the default ./templates tree
//! portico check links
//! portico check syntax
//!
//! # Custom template root and route policy
//! portico check links --templates web/templates --policy routes.toml
//! ```

mod config;
mod corpus;
mod db;
mod error;
mod guard;
mod policy;
mod syntax;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::ResolvedConfig;
use crate::policy::RoutePolicy;

/// Portico CLI: configuration resolution and template safety checks for
/// the portal.
///
/// Configuration comes from the environment (`DATABASE_URL`,
/// `PUBLIC_BASE_URL`), with a `.env` file honored when present.
#[derive(Parser)]
#[command(
    name = "portico",
    about = "Portico — configuration resolution and template safety checks for the portal",
    version
)]
struct Cli {
    /// Emit machine-readable JSON instead of human-oriented output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the effective configuration.
    ///
    /// Reads `.env` (when present) and the process environment, then shows
    /// the normalized database URL, its scheme, and the public base URL,
    /// exactly as the portal would resolve them at startup.
    Config,

    /// Open the configured database and run a liveness query.
    ///
    /// Uses the same resolution as `config`. With no `DATABASE_URL` set,
    /// this creates and probes the local sqlite fallback file.
    Ping,

    /// Static template checks (the CI gate).
    Check {
        #[command(subcommand)]
        action: CheckAction,
    },
}

/// Template check subcommands.
#[derive(Subcommand)]
enum CheckAction {
    /// Fail when templates link directly into forbidden API routes.
    ///
    /// Extracts every link target (href/action attributes plus bare quoted
    /// paths) from every template, classifies each against the route
    /// policy, and reports all violations in one pass.
    Links {
        /// Template root to scan.
        #[arg(long, default_value = "templates")]
        templates: PathBuf,

        /// TOML rule file overriding the built-in route policy.
        #[arg(long)]
        policy: Option<PathBuf>,
    },

    /// Fail on unbalanced `{% ... %}` block tags.
    ///
    /// Every `if`/`for`/`block`-style opener must be closed by its matching
    /// `end` tag, properly nested.
    Syntax {
        /// Template root to scan.
        #[arg(long, default_value = "templates")]
        templates: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; its absence is not an error, same as the
    // portal at startup.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config => run_config(cli.json),
        Commands::Ping => run_ping(cli.json).await,
        Commands::Check { action } => match action {
            CheckAction::Links { templates, policy } => {
                run_check_links(&templates, policy.as_deref(), cli.json)
            }
            CheckAction::Syntax { templates } => run_check_syntax(&templates, cli.json),
        },
    }
}

/// Logging goes to stderr and stays quiet unless `RUST_LOG` opts in, so
/// check output on stdout is exactly the findings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_config(json: bool) -> anyhow::Result<()> {
    let resolved = ResolvedConfig::from_process_env();

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    let source = if resolved.connection.raw_url.is_some() {
        "environment"
    } else {
        "fallback"
    };
    println!("{:<18} {}", "database url:", resolved.connection.normalized_url);
    println!("{:<18} {} ({})", "scheme:", resolved.connection.scheme, source);
    match resolved.public_url.public_base_url.as_deref() {
        Some(url) => println!("{:<18} {}", "public base url:", url),
        None => println!("{:<18} (per-request)", "public base url:"),
    }

    Ok(())
}

async fn run_ping(json: bool) -> anyhow::Result<()> {
    let resolved = ResolvedConfig::from_process_env();

    let pool = db::connect(&resolved.connection).await?;
    db::ping(&pool).await?;
    pool.close().await;

    if json {
        println!(
            "{}",
            serde_json::json!({ "ok": true, "scheme": resolved.connection.scheme })
        );
    } else {
        println!("database reachable ({})", resolved.connection.scheme);
    }

    Ok(())
}

fn run_check_links(
    templates: &Path,
    policy_path: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let route_policy = match policy_path {
        Some(path) => policy::load_policy(path)?,
        None => RoutePolicy::default(),
    };

    let report = guard::scan(templates, &route_policy)?;
    let violations = report.violations();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "occurrences": &report.occurrences,
                "violations": &violations,
                "passed": report.passes(),
            }))?
        );
    } else {
        for violation in &violations {
            println!(
                "{}:{}: forbidden link target {}",
                violation.source_file, violation.line, violation.target
            );
        }
    }

    if !report.passes() {
        anyhow::bail!(
            "found {} forbidden link(s) in templates under {}",
            violations.len(),
            templates.display()
        );
    }

    Ok(())
}

fn run_check_syntax(templates: &Path, json: bool) -> anyhow::Result<()> {
    let report = syntax::check(templates)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "issues": &report.issues,
                "passed": report.passes(),
            }))?
        );
    } else {
        for issue in &report.issues {
            println!("{}:{}: {}", issue.source_file, issue.line, issue.message);
        }
    }

    if !report.passes() {
        anyhow::bail!(
            "found {} template syntax issue(s) under {}",
            report.issues.len(),
            templates.display()
        );
    }

    Ok(())
}
