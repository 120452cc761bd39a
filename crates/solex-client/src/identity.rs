//! Where the paying identity comes from.

use std::path::{Path, PathBuf};

use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::errors::{SolexError, SolexResult};

pub trait IdentityProvider: Send + Sync {
    fn payer(&self) -> SolexResult<Keypair>;

    fn describe(&self) -> String;
}

/// A fresh keypair per call, never persisted. Needs an airdrop to pay fees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeral;

impl IdentityProvider for Ephemeral {
    fn payer(&self) -> SolexResult<Keypair> {
        Ok(Keypair::new())
    }

    fn describe(&self) -> String {
        "ephemeral keypair".to_string()
    }
}

/// A keypair stored as a JSON byte array, the `solana-keygen` format.
#[derive(Debug, Clone)]
pub struct KeypairFile {
    path: PathBuf,
}

impl KeypairFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl IdentityProvider for KeypairFile {
    fn payer(&self) -> SolexResult<Keypair> {
        read_keypair_file(&self.path)
            .map_err(|e| SolexError::identity(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        format!("keypair file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use solana_sdk::signature::{write_keypair_file, Signer};

    #[test]
    fn ephemeral_keys_are_fresh() {
        let a = Ephemeral.payer().unwrap();
        let b = Ephemeral.payer().unwrap();
        assert_ne!(a.pubkey(), b.pubkey());
    }

    #[test]
    fn reads_keygen_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let kp = Keypair::new();
        write_keypair_file(&kp, &path).unwrap();

        let loaded = KeypairFile::new(&path).payer().unwrap();
        assert_eq!(loaded.pubkey(), kp.pubkey());
    }

    #[test]
    fn missing_file_is_identity_error() {
        let dir = tempfile::tempdir().unwrap();
        let r = KeypairFile::new(dir.path().join("absent.json")).payer();
        assert_matches!(r, Err(SolexError::Identity(msg)) if msg.contains("absent.json"));
    }
}
