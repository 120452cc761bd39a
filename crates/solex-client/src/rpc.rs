//! Network boundary.
//!
//! Flows never touch a process-wide connection; they receive a [`LedgerRpc`]
//! handle. [`SolanaRpc`] is the JSON-RPC implementation, tests use an
//! in-memory double.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::errors::{SolexError, SolexResult};

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Request an airdrop and wait until it is confirmed.
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> SolexResult<Signature>;

    /// Minimum balance an account of `data_len` bytes needs to be rent exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SolexResult<u64>;

    async fn get_balance(&self, address: &Pubkey) -> SolexResult<u64>;

    async fn latest_blockhash(&self) -> SolexResult<Hash>;

    /// Submit a signed transaction once and wait for confirmation.
    async fn send_and_confirm(&self, tx: &Transaction) -> SolexResult<Signature>;
}

#[async_trait]
impl<T: LedgerRpc + ?Sized> LedgerRpc for &T {
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> SolexResult<Signature> {
        (**self).request_airdrop(to, lamports).await
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SolexResult<u64> {
        (**self).minimum_balance_for_rent_exemption(data_len).await
    }

    async fn get_balance(&self, address: &Pubkey) -> SolexResult<u64> {
        (**self).get_balance(address).await
    }

    async fn latest_blockhash(&self) -> SolexResult<Hash> {
        (**self).latest_blockhash().await
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> SolexResult<Signature> {
        (**self).send_and_confirm(tx).await
    }
}

#[async_trait]
impl<T: LedgerRpc + ?Sized> LedgerRpc for Arc<T> {
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> SolexResult<Signature> {
        (**self).request_airdrop(to, lamports).await
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SolexResult<u64> {
        (**self).minimum_balance_for_rent_exemption(data_len).await
    }

    async fn get_balance(&self, address: &Pubkey) -> SolexResult<u64> {
        (**self).get_balance(address).await
    }

    async fn latest_blockhash(&self) -> SolexResult<Hash> {
        (**self).latest_blockhash().await
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> SolexResult<Signature> {
        (**self).send_and_confirm(tx).await
    }
}

/// JSON-RPC connection to a cluster.
pub struct SolanaRpc {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpc {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            commitment,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

impl fmt::Debug for SolanaRpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolanaRpc")
            .field("url", &self.client.url())
            .field("commitment", &self.commitment.commitment)
            .finish()
    }
}

#[async_trait]
impl LedgerRpc for SolanaRpc {
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> SolexResult<Signature> {
        let sig = self
            .client
            .request_airdrop(to, lamports)
            .await
            .map_err(|e| SolexError::Airdrop(e.to_string()))?;
        tracing::debug!(%sig, "airdrop requested, waiting for confirmation");
        self.client
            .poll_for_signature_with_commitment(&sig, self.commitment)
            .await
            .map_err(|e| SolexError::Airdrop(e.to_string()))?;
        Ok(sig)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SolexResult<u64> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| SolexError::RentQuery(e.to_string()))
    }

    async fn get_balance(&self, address: &Pubkey) -> SolexResult<u64> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| SolexError::BalanceQuery(e.to_string()))
    }

    async fn latest_blockhash(&self) -> SolexResult<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| SolexError::Blockhash(e.to_string()))
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> SolexResult<Signature> {
        self.client
            .send_and_confirm_transaction(tx)
            .await
            .map_err(SolexError::submission)
    }
}
