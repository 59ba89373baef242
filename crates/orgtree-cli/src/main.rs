//! orgtree CLI
//!
//! Resolves a ministry's administrative hierarchy from the DILA organization
//! export and prints it as an indented tree:
//! - `tree`: walk from a root (default: the configured ministry) and render
//!   each node with its declared parent, alternate parents and external links
//! - `check`: verify that the canonical hierarchy is a forest

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod check;
mod render;
mod run_config;
mod tree;

use render::OutputFormat;
use run_config::RunConfig;

#[derive(Parser)]
#[command(name = "orgtree")]
#[command(
    author,
    version,
    about = "Administrative hierarchy resolver for the DILA organization export"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// JSON configuration file (root sentinels, external reference settings).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Government root sentinel id (overrides the config file).
    #[arg(long, global = true)]
    government_root: Option<String>,

    /// Ministry root sentinel id (overrides the config file).
    #[arg(long, global = true)]
    ministry_root: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hierarchy under a root as an indented tree.
    Tree {
        /// Organization export (`.json.zip` or `.json`).
        input: PathBuf,

        /// Walk root id (defaults to the ministry root sentinel).
        #[arg(long)]
        root: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Resolve external links through Wikidata.
        #[arg(long, conflicts_with = "no_xref")]
        xref: bool,

        /// Never resolve external links, even if the config file enables them.
        #[arg(long)]
        no_xref: bool,

        /// Ambiguous external matches: abort|degrade.
        #[arg(long)]
        on_ambiguous: Option<String>,

        /// SPARQL endpoint URL.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Check that the canonical hierarchy is a forest.
    Check {
        /// Organization export (`.json.zip` or `.json`).
        input: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn base_config(global: &GlobalArgs) -> Result<RunConfig> {
    let mut config = RunConfig::load(global.config.as_deref())?;
    if let Some(id) = &global.government_root {
        config.hierarchy.government_root = id.clone();
    }
    if let Some(id) = &global.ministry_root {
        config.hierarchy.ministry_root = id.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    if cli.global.no_color {
        colored::control::set_override(false);
    }

    let mut config = base_config(&cli.global)?;

    match cli.command {
        Commands::Tree {
            input,
            root,
            format,
            xref,
            no_xref,
            on_ambiguous,
            endpoint,
        } => {
            if xref {
                config.xref.enabled = true;
            }
            if no_xref {
                config.xref.enabled = false;
            }
            if let Some(policy) = on_ambiguous {
                config.xref.on_ambiguous = orgtree_xref::AmbiguityPolicy::parse(&policy)?;
            }
            if let Some(endpoint) = endpoint {
                config.xref.endpoint = endpoint;
            }
            tree::cmd_tree(&input, root.as_deref(), format, &config)
        }
        Commands::Check { input } => check::cmd_check(&input, &config),
    }
}
