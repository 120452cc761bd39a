//! Client configuration.
//!
//! The library does not read environment variables; the CLI fills this in
//! from flags and passes it down explicitly.

use std::str::FromStr;
use std::time::Duration;

use solana_sdk::commitment_config::CommitmentConfig;
use url::Url;

use crate::constants::{DEFAULT_RPC_URL, LAMPORTS_PER_SOL};
use crate::errors::{SolexError, SolexResult};
use crate::funding::FundingPolicy;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Websocket endpoint for log subscriptions. Derived from `rpc_url` when unset.
    pub ws_url: Option<String>,
    pub commitment: Commitment,
    /// Airdropped to the payer before each flow; 0 disables the airdrop.
    pub airdrop_lamports: u64,
    /// How long the clock logger keeps listening after its transaction.
    pub log_linger: Duration,
    pub funding_policy: FundingPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            ws_url: None,
            commitment: Commitment::Processed,
            airdrop_lamports: LAMPORTS_PER_SOL,
            log_linger: Duration::from_secs(5),
            funding_policy: FundingPolicy::Always,
        }
    }
}

impl ClientConfig {
    pub fn commitment_config(&self) -> CommitmentConfig {
        self.commitment.to_config()
    }

    pub fn websocket_url(&self) -> SolexResult<String> {
        match &self.ws_url {
            Some(ws) => Ok(ws.clone()),
            None => websocket_url_for(&self.rpc_url),
        }
    }
}

/// Confirmation tier used for queries and for waiting on transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Self::Processed => CommitmentConfig::processed(),
            Self::Confirmed => CommitmentConfig::confirmed(),
            Self::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = SolexError;

    fn from_str(s: &str) -> SolexResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(SolexError::invalid_argument(format!("unknown commitment: {s}"))),
        }
    }
}

/// Websocket endpoint paired with an RPC endpoint: `http→ws`, `https→wss`,
/// and an explicit port moves up by one (8899 → 8900 on a local validator).
pub fn websocket_url_for(rpc_url: &str) -> SolexResult<String> {
    let mut url = parse_http_url(rpc_url)?;
    let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme)
        .map_err(|_| SolexError::invalid_argument(format!("cannot derive websocket url from {rpc_url}")))?;
    if let Some(port) = url.port() {
        let next = port
            .checked_add(1)
            .ok_or_else(|| SolexError::invalid_argument(format!("port out of range in {rpc_url}")))?;
        url.set_port(Some(next))
            .map_err(|_| SolexError::invalid_argument(format!("cannot set port on {rpc_url}")))?;
    }
    Ok(url.to_string())
}

fn parse_http_url(s: &str) -> SolexResult<Url> {
    let url = Url::parse(s).map_err(|e| SolexError::invalid_argument(format!("invalid rpc url {s:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SolexError::invalid_argument(format!("rpc url must be http(s), got {other}"))),
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> SolexResult<()> {
    if cfg.rpc_url.trim().is_empty() {
        return Err(SolexError::invalid_argument("rpc url must not be empty"));
    }
    parse_http_url(&cfg.rpc_url)?;

    if let Some(ws) = &cfg.ws_url {
        let url = Url::parse(ws).map_err(|e| SolexError::invalid_argument(format!("invalid ws url {ws:?}: {e}")))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(SolexError::invalid_argument("ws url must be ws(s)"));
        }
    }

    if cfg.log_linger.is_zero() {
        return Err(SolexError::invalid_argument("log linger must be greater than zero"));
    }

    Ok(())
}
