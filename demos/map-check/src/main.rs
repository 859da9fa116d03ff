//! map-check: ask a Mapgate config who may load what.
//!
//! ```text
//! map-check --config mapgate.json check summit -t hub_clear -t forest_clear
//! map-check --config mapgate.json mixing forest
//! map-check encode player_1
//! map-check username
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mapgate::prelude::*;
use mapgate::{Codec, SubstitutionCodec, generate_username};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "map-check")]
#[command(about = "Check map access against a Mapgate config")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gatekeeper config file
    #[arg(long, env = "MAPGATE_CONFIG", global = true, default_value = "mapgate.json")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a player holding the given tokens may load a map
    Check {
        /// Map to check
        map: String,

        /// A held token (can be repeated)
        #[arg(short, long = "token")]
        tokens: Vec<String>,
    },

    /// Show the mixing group a map belongs to
    Mixing {
        /// Map to look up
        map: String,
    },

    /// Encode an identity for the wire
    Encode { plain: String },

    /// Decode a wire identity
    Decode { encoded: String },

    /// Generate a random, valid username
    Username,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CheckReport<'a> {
    map: &'a str,
    own_token: bool,
    full_chain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    misconfigured: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { map, tokens } => {
            let gate = load(&cli.config).await?;
            let held: HeldTokens = tokens.into_iter().collect();
            let denial = gate.evaluate(&map, &held).err();

            let report = CheckReport {
                map: &map,
                own_token: gate.has_token_for_map(&map, &held),
                full_chain: denial.is_none(),
                misconfigured: denial.as_ref().is_some_and(ChainDenial::is_misconfiguration),
                reason: denial.map(|d| d.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Mixing { map } => {
            let gate = load(&cli.config).await?;
            let group = gate.mixing_for_map(&map);
            println!("{}", serde_json::to_string(&*group)?);
        }
        Commands::Encode { plain } => {
            let encoded = SubstitutionCodec
                .encode(&plain)
                .context("identity contains characters outside the alphabet")?;
            println!("{encoded}");
        }
        Commands::Decode { encoded } => {
            let plain = SubstitutionCodec
                .decode(&encoded)
                .context("not a valid encoded identity")?;
            println!("{plain}");
        }
        Commands::Username => {
            println!("{}", generate_username());
        }
    }

    Ok(())
}

async fn load(path: &Path) -> Result<Gatekeeper> {
    tracing::debug!(path = %path.display(), "reading config");
    Gatekeeper::load(path)
        .await
        .with_context(|| format!("failed to load gatekeeper from {}", path.display()))
}
