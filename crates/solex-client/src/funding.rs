//! Funding decision for the derived account.
//!
//! The registry program refuses to take ownership of an account that is not
//! rent exempt, so the client funds the PDA inside the same transaction. The
//! threshold is queried on every call; it depends on cluster parameters.

use std::fmt;
use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::errors::{SolexError, SolexResult};
use crate::rpc::LedgerRpc;

/// How much to transfer to the derived account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FundingPolicy {
    /// Transfer the full rent exemption threshold regardless of balance.
    ///
    /// Overfunding is safe here: re-registering a taken username fails on
    /// chain and the whole transaction, transfer included, is rolled back.
    #[default]
    Always,
    /// Transfer only the shortfall between balance and threshold.
    TopUp,
}

impl FundingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::TopUp => "top-up",
        }
    }
}

impl fmt::Display for FundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundingPolicy {
    type Err = SolexError;

    fn from_str(s: &str) -> SolexResult<Self> {
        match s {
            "always" => Ok(Self::Always),
            "top-up" | "topup" => Ok(Self::TopUp),
            _ => Err(SolexError::invalid_argument(format!("unknown funding policy: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingDecision {
    /// Rent exemption threshold reported by the cluster.
    pub threshold: u64,
    /// Balance of the target, only queried under [`FundingPolicy::TopUp`].
    pub current_balance: Option<u64>,
    /// Lamports to transfer. Zero means no transfer instruction.
    pub lamports: u64,
}

impl FundingDecision {
    pub fn needs_transfer(&self) -> bool {
        self.lamports > 0
    }
}

pub fn funding_amount(policy: FundingPolicy, threshold: u64, current_balance: u64) -> u64 {
    match policy {
        FundingPolicy::Always => threshold,
        FundingPolicy::TopUp => threshold.saturating_sub(current_balance),
    }
}

/// Query the cluster and decide how many lamports `target` must receive to
/// hold `data_len` bytes rent free.
pub async fn decide_funding<R: LedgerRpc + ?Sized>(
    rpc: &R,
    policy: FundingPolicy,
    target: &Pubkey,
    data_len: usize,
) -> SolexResult<FundingDecision> {
    let threshold = rpc.minimum_balance_for_rent_exemption(data_len).await?;
    let current_balance = match policy {
        FundingPolicy::Always => None,
        FundingPolicy::TopUp => Some(rpc.get_balance(target).await?),
    };
    let lamports = funding_amount(policy, threshold, current_balance.unwrap_or(0));

    tracing::debug!(%target, threshold, ?current_balance, lamports, policy = %policy, "funding decided");
    Ok(FundingDecision { threshold, current_balance, lamports })
}
