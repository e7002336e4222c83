//! CLI command definitions.

pub mod health;
pub mod items;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the locale management API.
#[derive(Debug, Parser)]
#[command(name = "localemgmt-client")]
#[command(about = "CLI client for the locale management API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "LOCALEMGMT_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Session ID from a browser login, sent as a bearer token.
    #[arg(long, env = "LOCALEMGMT_SESSION", hide_env_values = true)]
    pub session: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Locale item management.
    Items(items::ItemsCommand),
    /// Languages in use.
    Langs,
    /// Bundles in use.
    Bundles,
    /// Server version and current user.
    Version,
    /// Server health checks.
    Health(health::HealthCommand),
}
