//! solex-client
//!
//! Client side of the clock logger and user registry example programs.
//!
//! It includes:
//! - PDA derivation computed locally, identical to the runtime's
//! - the rent exemption funding decision for the username account
//! - instruction builders and transaction assembly
//! - a [`LedgerRpc`] boundary with a JSON-RPC implementation
//! - a scoped program log subscription
//!
//! The program ids are supplied by the caller; nothing here is deployed.

pub mod config;
pub mod constants;
pub mod errors;
pub mod flows;
pub mod funding;
pub mod identity;
pub mod logger_client;
pub mod logs;
pub mod pda;
pub mod registry_client;
pub mod rpc;
pub mod submit;

#[cfg(test)]
mod testing;

pub use config::{validate_config, ClientConfig, Commitment};
pub use constants::*;
pub use errors::{SolexError, SolexResult};
pub use funding::{FundingDecision, FundingPolicy};
pub use identity::{Ephemeral, IdentityProvider, KeypairFile};
pub use logs::{LogEntry, LogSink, LogSource, SolanaLogSource};
pub use pda::DerivedAddress;
pub use registry_client::{RegistrationPlan, RegistrationReceipt, RegistryClient};
pub use rpc::{LedgerRpc, SolanaRpc};

/// Parse a base58 public key as given on a command line.
pub fn parse_pubkey(s: &str) -> SolexResult<solana_sdk::pubkey::Pubkey> {
    s.trim()
        .parse::<solana_sdk::pubkey::Pubkey>()
        .map_err(|e| SolexError::InvalidPubkey(format!("{s}: {e}")))
}
