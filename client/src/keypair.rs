//! Loading signing keypairs from JSON keypair files.

use std::path::Path;

use anyhow::Context;
use solana_sdk::signature::Keypair;

/// The length of an ed25519 keypair: 32 secret key bytes followed by 32 public key bytes.
pub const KEYPAIR_LENGTH: usize = 64;

/// Reads a keypair file: a JSON array of [`KEYPAIR_LENGTH`] bytes, as written by
/// `solana-keygen`.
pub fn load_keypair(path: impl AsRef<Path>) -> anyhow::Result<Keypair> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read keypair file {}", path.display()))?;

    keypair_from_json(&contents)
        .with_context(|| format!("Invalid keypair file {}", path.display()))
}

/// Writes `keypair` in the format [`load_keypair`] reads.
pub fn write_keypair(path: impl AsRef<Path>, keypair: &Keypair) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())?;
    std::fs::write(path, json)
        .with_context(|| format!("Couldn't write keypair file {}", path.display()))
}

pub fn keypair_from_json(json: &str) -> anyhow::Result<Keypair> {
    let bytes: Vec<u8> =
        serde_json::from_str(json).context("Keypair isn't a JSON array of bytes")?;

    if bytes.len() != KEYPAIR_LENGTH {
        anyhow::bail!(
            "Keypair has {} bytes, expected {KEYPAIR_LENGTH}",
            bytes.len()
        );
    }

    Keypair::try_from(bytes.as_slice()).map_err(|e| anyhow::anyhow!("Invalid keypair bytes: {e}"))
}
