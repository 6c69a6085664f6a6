//! Offline key-pair generator for the gateway and its devices.
//!
//! Prints the private scalar for `SERVER_PRIVATE_KEY` and the public
//! coordinates as byte lists for device firmware.

use clap::Parser;
use common::encryption::ServerKey;
use common::Result;

#[derive(Parser)]
#[command(name = "ecc-keygen", about = "Generate or inspect a P-256 gateway key")]
struct Args {
    /// Existing private key (hex) to derive the public key from.
    /// A fresh key pair is generated when omitted.
    #[arg(long)]
    private_key: Option<String>,
}

fn byte_list(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let key = match args.private_key {
        Some(hex) => ServerKey::from_hex(&hex)?,
        None => ServerKey::generate(),
    };
    let public = key.public_key_bytes();

    println!("Private key (hex): {}", key.private_key_hex());
    println!("Public key (hex):  {}", key.public_key_hex());
    println!("Pubkey X:");
    println!("{}", byte_list(&public[..32]));
    println!("Pubkey Y:");
    println!("{}", byte_list(&public[32..]));

    Ok(())
}
