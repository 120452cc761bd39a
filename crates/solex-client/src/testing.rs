//! In-memory ledger used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use tokio::sync::{oneshot, watch};

use crate::errors::{SolexError, SolexResult};
use crate::logs::{cancelled, LogEntry, LogSink, LogSource};
use crate::rpc::LedgerRpc;

#[derive(Default)]
struct State {
    balances: HashMap<Pubkey, u64>,
    rent_queries: Vec<usize>,
    airdrops: Vec<(Pubkey, u64)>,
    submitted: Vec<Transaction>,
    attempts: usize,
}

pub(crate) struct MockLedger {
    rent_threshold: u64,
    reject_with: Option<String>,
    fail_airdrop: bool,
    state: Mutex<State>,
}

impl MockLedger {
    pub fn new(rent_threshold: u64) -> Self {
        Self { rent_threshold, reject_with: None, fail_airdrop: false, state: Mutex::default() }
    }

    /// Reject every submission with `msg`, as a cluster would on preflight failure.
    pub fn rejecting(mut self, msg: &str) -> Self {
        self.reject_with = Some(msg.to_string());
        self
    }

    pub fn without_faucet(mut self) -> Self {
        self.fail_airdrop = true;
        self
    }

    pub fn set_balance(&self, address: Pubkey, lamports: u64) {
        self.state.lock().unwrap().balances.insert(address, lamports);
    }

    pub fn rent_queries(&self) -> Vec<usize> {
        self.state.lock().unwrap().rent_queries.clone()
    }

    pub fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.state.lock().unwrap().airdrops.clone()
    }

    pub fn submitted(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> SolexResult<Signature> {
        if self.fail_airdrop {
            return Err(SolexError::Airdrop("faucet unavailable".into()));
        }
        let mut st = self.state.lock().unwrap();
        st.airdrops.push((*to, lamports));
        *st.balances.entry(*to).or_default() += lamports;
        Ok(Signature::new_unique())
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SolexResult<u64> {
        self.state.lock().unwrap().rent_queries.push(data_len);
        Ok(self.rent_threshold)
    }

    async fn get_balance(&self, address: &Pubkey) -> SolexResult<u64> {
        Ok(self.state.lock().unwrap().balances.get(address).copied().unwrap_or(0))
    }

    async fn latest_blockhash(&self) -> SolexResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> SolexResult<Signature> {
        let mut st = self.state.lock().unwrap();
        st.attempts += 1;
        if tx.verify().is_err() {
            return Err(SolexError::submission("signature verification failed"));
        }
        if let Some(msg) = &self.reject_with {
            return Err(SolexError::submission(msg));
        }
        st.submitted.push(tx.clone());
        Ok(tx.signatures[0])
    }
}

/// Log source that replays fixed entries, then waits for cancellation.
pub(crate) struct ScriptedLogs {
    entries: Vec<LogEntry>,
    fail: bool,
    pub unsubscribed: Arc<AtomicBool>,
}

impl ScriptedLogs {
    pub fn new(entries: Vec<LogEntry>, fail: bool) -> Self {
        Self { entries, fail, unsubscribed: Arc::new(AtomicBool::new(false)) }
    }
}

#[async_trait]
impl LogSource for ScriptedLogs {
    async fn stream_logs(
        &self,
        _program_id: Pubkey,
        sink: &mut LogSink,
        ready: oneshot::Sender<()>,
        mut cancel: watch::Receiver<bool>,
    ) -> SolexResult<usize> {
        if self.fail {
            return Err(SolexError::Subscription("connection refused".into()));
        }
        let _ = ready.send(());
        for e in &self.entries {
            sink(e);
        }
        cancelled(&mut cancel).await;
        self.unsubscribed.store(true, Ordering::SeqCst);
        Ok(self.entries.len())
    }
}
