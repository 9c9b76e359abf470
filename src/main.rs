use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cryft_address::config::{AppConfig, ResolvedConfig};
use cryft_address::pubkey::{PayloadSource, PublicKeyHash, RawPayload};
use cryft_address::AddressError;

#[derive(Parser, Debug)]
#[command(name = "cryft-address", version, about = "Derive, format and parse chain-alias bech32 addresses")]
struct Cli {
    /// TOML config file (ignored when missing)
    #[arg(long, global = true, default_value = "cryft.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a secp256k1 public key and format its address
    Derive {
        /// Compressed or uncompressed public key, hex
        #[arg(long)]
        pubkey: String,
        #[arg(long)]
        alias: Option<String>,
        #[arg(long)]
        hrp: Option<String>,
    },
    /// Format raw payload bytes as a composite address
    Format {
        /// Payload bytes, hex
        #[arg(long)]
        payload: String,
        #[arg(long)]
        alias: Option<String>,
        #[arg(long)]
        hrp: Option<String>,
    },
    /// Split a composite address into alias, HRP and payload
    Parse { address: String },
    /// Bech32-encode payload bytes without a chain alias
    Encode {
        #[arg(long)]
        payload: String,
        #[arg(long)]
        hrp: Option<String>,
    },
    /// Decode a bare bech32 string
    Decode { text: String },
}

fn init_tracing() {
    // init tracing from env CRYFT_LOG or RUST_LOG
    let filter = std::env::var("CRYFT_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn format_source(
    cfg: &ResolvedConfig,
    source: &dyn PayloadSource,
    alias: Option<String>,
    hrp: Option<String>,
) -> Result<(String, String)> {
    let codec = cfg.codec();
    let alias = alias.unwrap_or_else(|| cfg.chain_alias.clone());
    let hrp = hrp.unwrap_or_else(|| cfg.hrp.clone());
    let payload = source.payload()?;
    debug!(payload = %hex::encode(&payload), "payload ready");

    let bech32 = codec
        .format_bech32(&hrp, &payload)
        .context("failed to encode address")?;
    let formatted = codec
        .format(&alias, &hrp, &payload)
        .context("failed to format address")?;
    Ok((bech32, formatted))
}

fn run(cli: Cli) -> Result<()> {
    let cfg = AppConfig::load_from(&cli.config)?.resolved();
    debug!(?cfg, "configuration resolved");
    let codec = cfg.codec();

    match cli.command {
        Command::Derive { pubkey, alias, hrp } => {
            let source = PublicKeyHash::from_hex(&pubkey)?;
            let (bech32, formatted) = format_source(&cfg, &source, alias, hrp)?;
            println!("Bech32 address: {}", bech32);
            println!("Formatted address: {}", formatted);

            match codec.parse(&formatted) {
                Ok(parsed) => info!(
                    chain_alias = %parsed.chain_alias,
                    hrp = %parsed.hrp,
                    address = %formatted,
                    "✅ address derived from public key"
                ),
                Err(AddressError::NoSeparator) => {
                    warn!(address = %formatted, "formatted address does not contain a separator")
                }
                Err(e) => bail!("failed to parse address {}: {}", formatted, e),
            }
        }
        Command::Format {
            payload,
            alias,
            hrp,
        } => {
            let source = RawPayload::from_hex(&payload)?;
            let (_, formatted) = format_source(&cfg, &source, alias, hrp)?;
            info!(address = %formatted, "formatted address");
            println!("{}", formatted);
        }
        Command::Parse { address } => {
            let parsed = codec
                .parse(&address)
                .with_context(|| format!("failed to parse address {}", address))?;
            info!(chain_alias = %parsed.chain_alias, hrp = %parsed.hrp, "parsed address");
            println!("chain alias: {}", parsed.chain_alias);
            println!("hrp: {}", parsed.hrp);
            println!("payload: {}", hex::encode(&parsed.payload));
        }
        Command::Encode { payload, hrp } => {
            let bytes = RawPayload::from_hex(&payload)?.payload()?;
            let hrp = hrp.unwrap_or_else(|| cfg.hrp.clone());
            let encoded = codec
                .format_bech32(&hrp, &bytes)
                .context("failed to encode address")?;
            println!("{}", encoded);
        }
        Command::Decode { text } => {
            let (hrp, payload) = codec
                .parse_bech32(&text)
                .with_context(|| format!("failed to decode {}", text))?;
            println!("hrp: {}", hrp);
            println!("payload: {}", hex::encode(&payload));
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
