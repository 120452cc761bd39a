//! Error type for the client flows.
//!
//! Every failure aborts the flow it happens in. Network failures keep the
//! message reported by the cluster verbatim so the caller can surface it.

use thiserror::Error;

pub type SolexResult<T> = Result<T, SolexError>;

#[derive(Debug, Error)]
pub enum SolexError {
    #[error("seed {index} is {len} bytes, exceeding the {max}-byte limit")]
    SeedTooLong { index: usize, len: usize, max: usize },

    #[error("{count} seeds (including bump) exceed the limit of {max}")]
    TooManySeeds { count: usize, max: usize },

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("no viable bump seed found for the given seeds")]
    NoViableBump,

    #[error("invalid public key: {0}")]
    InvalidPubkey(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("identity unavailable: {0}")]
    Identity(String),

    #[error("airdrop failed: {0}")]
    Airdrop(String),

    #[error("rent exemption query failed: {0}")]
    RentQuery(String),

    #[error("balance query failed: {0}")]
    BalanceQuery(String),

    #[error("could not fetch latest blockhash: {0}")]
    Blockhash(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transaction submission failed: {0}")]
    Submission(String),

    #[error("log subscription failed: {0}")]
    Subscription(String),
}

impl SolexError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn identity(msg: impl Into<String>) -> Self {
        Self::Identity(msg.into())
    }

    pub fn submission(msg: impl ToString) -> Self {
        Self::Submission(msg.to_string())
    }

    /// True for errors raised before anything was sent to the cluster.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::SeedTooLong { .. }
                | Self::TooManySeeds { .. }
                | Self::OnCurve
                | Self::NoViableBump
                | Self::InvalidPubkey(_)
                | Self::InvalidArgument(_)
                | Self::Identity(_)
                | Self::Signing(_)
        )
    }
}
