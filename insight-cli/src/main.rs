//! wallet-insight CLI
//!
//! Runs the balance API server, or performs a one-shot balance lookup against
//! the configured chain nodes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use insight_api::{AddressBalance, ApiServer, InsightConfig};
use insight_cache::{
    AccountStateStrategy, NativeStateCache, PerAssetCache, PerAssetStrategy,
};
use insight_core::types::ChainFamily;
use insight_rpc::{EthRpcClient, NeoRpcClient, RpcConfig};

/// wallet-insight - cached ETH and NEO balance service
#[derive(Parser)]
#[command(name = "wallet-insight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (JSON)
    #[arg(short, long, global = true, default_value = "./wallet-insight.json")]
    conf: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Bind address, overrides the config file
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Look up a single balance
    Balance {
        /// Chain family (eth or neo)
        #[arg(long, default_value = "eth")]
        chain: ChainFamily,
        /// Holder address
        address: String,
        /// Asset identifier ("eth" for the native coin, a token contract, or a NEO asset id)
        asset: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "wallet_insight=debug,insight=debug,info"
    } else {
        "wallet_insight=info,insight=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { bind } => cmd_serve(&cli.conf, bind).await,
        Commands::Balance { chain, address, asset } => {
            cmd_balance(&cli.conf, chain, &address, &asset).await
        }
    }
}

fn load_config(path: &Path) -> Result<InsightConfig> {
    InsightConfig::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Run the API server until Ctrl-C
async fn cmd_serve(conf: &Path, bind: Option<String>) -> Result<()> {
    let mut config = load_config(conf)?;
    if let Some(bind) = bind {
        config.bind = bind;
        config.validate().context("Invalid --bind address")?;
    }

    println!("{}", "Starting wallet-insight API server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), config.bind);
    println!("   {} http://{}/health", "Health check:".dimmed(), config.bind);
    println!("   {} {}", "ETH node:".dimmed(), config.eth);
    println!("   {} {}", "NEO node:".dimmed(), config.neo);
    println!(
        "   {} every {}s, retention {}s",
        "Refresh:".dimmed(),
        config.interval,
        config.retention
    );
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to initialize server")?;
    server
        .run(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
        })
        .await
        .context("Server error")?;

    Ok(())
}

/// One-shot lookup through a fresh cache
async fn cmd_balance(conf: &Path, chain: ChainFamily, address: &str, asset: &str) -> Result<()> {
    let config = load_config(conf)?;
    let cache_config = config.cache_config();

    let value = match chain {
        ChainFamily::Eth => {
            let client = EthRpcClient::with_config(
                RpcConfig::new(&config.eth).with_timeout(config.rpc_timeout),
            )?;
            let cache = PerAssetCache::with_config(PerAssetStrategy::new(Arc::new(client)), &cache_config);
            cache.lookup(address, asset).await
        }
        ChainFamily::Neo => {
            let client = NeoRpcClient::with_config(
                RpcConfig::new(&config.neo).with_timeout(config.rpc_timeout),
            )?;
            let cache = NativeStateCache::with_config(AccountStateStrategy::new(Arc::new(client)), &cache_config);
            cache.lookup(address, asset).await
        }
    };

    if value == chain.zero_balance() {
        eprintln!(
            "{} zero balance (or the {} node could not be reached, run with -v for details)",
            "note:".yellow(),
            chain
        );
    }

    let result = AddressBalance {
        address: address.to_string(),
        asset: asset.to_string(),
        value,
    };
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
