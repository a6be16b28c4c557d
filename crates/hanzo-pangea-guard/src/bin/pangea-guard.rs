//! CLI for running a single Pangea guard over some text
//!
//! Usage:
//!   pangea-guard domain-intel "visit http://malware123.com/feedback"
//!   echo "My SSN is 234-56-7890" | pangea-guard ai-guard --recipe pangea_llm_response_guard

use anyhow::{Context, Result};
use clap::Parser;
use hanzo_pangea_guard::{build_tool, GuardKind, GuardsConfig, Overrides, Tool};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "pangea-guard",
    version,
    about = "Screen text with a Pangea guard tool"
)]
struct Args {
    /// Guard to run: domain-intel, ip-intel, url-intel, redact, prompt-guard, ai-guard
    guard: GuardKind,

    /// Text to check (read from stdin when omitted)
    text: Option<String>,

    /// Path to a TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Pangea domain, e.g. aws.us.pangea.cloud
    #[clap(long)]
    domain: Option<String>,

    /// Block threshold for the intel guards (0-100)
    #[clap(long)]
    threshold: Option<u8>,

    /// AI Guard recipe
    #[clap(long)]
    recipe: Option<String>,

    /// Pangea service configuration id
    #[clap(long)]
    config_id: Option<String>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => GuardsConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GuardsConfig::default(),
    };

    config.apply_overrides(
        args.guard,
        Overrides {
            domain: args.domain,
            threshold: args.threshold,
            recipe: args.recipe,
            config_id: args.config_id,
        },
    );

    let text = read_input(args.text, std::io::stdin()).context("failed to read stdin")?;

    let tool = build_tool(args.guard, &config)?;
    info!(tool = tool.name(), "running guard");

    let output = tool.run(&text).await?;
    println!("{}", output);

    Ok(())
}

/// The positional text, or everything on `reader` when it is absent
fn read_input(text: Option<String>, mut reader: impl Read) -> std::io::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            reader.read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
