//! Constants shared between the example programs and their clients.
//!
//! Keep these stable because they affect PDA derivation and the account list
//! the on-chain programs validate.

use solana_program::pubkey::Pubkey;

/// Memo program invoked by the user registry program to validate UTF-8.
pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

pub fn memo_program_id() -> Pubkey {
    solana_program::pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr")
}

/// Suffix appended to every PDA preimage.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, including the bump seed.
pub const MAX_SEEDS: usize = 16;

/// Size of the account the user registry program allocates: one public key.
pub const PUBKEY_BYTE_COUNT: usize = 32;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Default cluster endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Endpoint of a local `solana-test-validator`.
pub const LOCALNET_RPC_URL: &str = "http://localhost:8899";
