//! Command line driver that formats payloads as bech32 strings.
//!
//! ```text
//! cargo run --example addresses -- --hrp bc --witness-version 0 --hash160 \
//!     --payload 0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798
//! cargo run --example addresses -- samples
//! ```

use anyhow::Context;
use bech32_address::segwit::{self, KnownHrp, WitnessVersion};
use bech32_address::{nostr, Fe32};
use clap::{Parser, Subcommand};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bech32 address formatter", long_about = None)]
struct Cli {
    /// Human-readable part, e.g. bc, tb or npub
    #[arg(long, env = "BECH32_HRP")]
    hrp: Option<String>,

    /// Payload bytes, hex encoded
    #[arg(long, env = "BECH32_PAYLOAD")]
    payload: Option<String>,

    /// Hash the payload with SHA-256 then RIPEMD-160 before encoding
    #[arg(long, default_value_t = false)]
    hash160: bool,

    /// Witness version to prepend to the data part (0 to 31)
    #[arg(
        long,
        env = "BECH32_WITNESS_VERSION",
        value_parser = clap::value_parser!(u8).range(0..=31)
    )]
    witness_version: Option<u8>,

    /// Log level (error|warn|info|debug|trace)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a segwit v0 address and a nostr public key for well-known keys
    Samples,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&cli.log)).init();

    match cli.command {
        Some(Commands::Samples) => cmd_samples(),
        None => cmd_encode(cli),
    }
}

fn cmd_encode(cli: Cli) -> anyhow::Result<()> {
    let hrp = cli.hrp.context("missing --hrp")?;
    let payload = cli.payload.context("missing --payload")?;

    let mut payload = hex::decode(payload.trim()).context("payload is not valid hex")?;
    if cli.hash160 {
        payload = hash160(&payload).to_vec();
        tracing::info!(hash = %hex::encode(&payload), "hashed payload");
    }

    // Range checked by clap.
    let witness_version = cli.witness_version.map(Fe32::from_low_5_bits);
    let encoded = bech32_address::encode(&hrp, &payload, witness_version)?;
    println!("{}", encoded);
    Ok(())
}

fn cmd_samples() -> anyhow::Result<()> {
    let pubkey = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")?;
    let program = hash160(&pubkey);
    let address = segwit::encode(KnownHrp::Bitcoin, WitnessVersion::V0, &program)?;
    println!("p2wpkh:");
    println!("  pubkey:  {}", hex::encode(&pubkey));
    println!("  hash160: {}", hex::encode(program));
    println!("  address: {}", address);

    let mut key = [0u8; nostr::KEY_LEN];
    let npub_hex = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";
    hex::decode_to_slice(npub_hex, &mut key)?;
    let npub = nostr::encode_public_key(&key);
    println!("nostr:");
    println!("  pubkey:  {}", hex::encode(key));
    println!("  npub:    {}", npub);
    Ok(())
}

fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(sha));
    out
}
