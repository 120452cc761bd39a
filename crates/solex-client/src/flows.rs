//! The two one-shot flows, end to end.
//!
//! Each step is a sequential round-trip; nothing runs in parallel except the
//! log subscription of the clock logger, which is scoped to its flow.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};

use crate::config::ClientConfig;
use crate::errors::SolexResult;
use crate::identity::IdentityProvider;
use crate::logger_client::LoggerClient;
use crate::logs::{watch_logs, LogSink, LogSource};
use crate::registry_client::{RegistrationReceipt, RegistryClient};
use crate::rpc::LedgerRpc;
use crate::submit;

/// Register `username` with the registry program.
///
/// The username is checked by deriving its PDA before the payer is funded,
/// so an unusable name costs no network traffic.
pub async fn register_username<R: LedgerRpc>(
    rpc: R,
    identity: &dyn IdentityProvider,
    cfg: &ClientConfig,
    program_id: Pubkey,
    username: &str,
) -> SolexResult<RegistrationReceipt> {
    let client = RegistryClient::new(program_id, rpc);
    client.derive_username(username)?;

    let payer = identity.payer()?;
    tracing::info!(payer = %payer.pubkey(), identity = %identity.describe(), "payer ready");
    submit::fund_payer(client.rpc(), &payer, cfg.airdrop_lamports).await?;

    client.register(&payer, username, cfg.funding_policy).await
}

/// Invoke the account logger program and relay its logs to `sink`.
///
/// The subscription is live before the transaction is sent. On success it
/// lingers for `cfg.log_linger` so late notifications arrive; on failure it
/// is cancelled at once. Either way it is unsubscribed before returning.
pub async fn log_clock_account<R, S>(
    rpc: R,
    logs: Arc<S>,
    identity: &dyn IdentityProvider,
    cfg: &ClientConfig,
    program_id: Pubkey,
    sink: LogSink,
) -> SolexResult<Signature>
where
    R: LedgerRpc,
    S: LogSource + ?Sized + 'static,
{
    let client = LoggerClient::new(program_id, rpc);
    let watch = watch_logs(logs, program_id, sink).await?;

    let outcome: SolexResult<Signature> = async {
        let payer = identity.payer()?;
        submit::fund_payer(client.rpc(), &payer, cfg.airdrop_lamports).await?;
        client.log_clock(&payer).await
    }
    .await;

    match outcome {
        Ok(sig) => {
            match watch.stop_after(cfg.log_linger).await {
                Ok(delivered) => tracing::info!(delivered, "log subscription closed"),
                Err(e) => tracing::warn!(error = %e, "log subscription ended with error"),
            }
            Ok(sig)
        }
        Err(e) => {
            if let Err(stop_err) = watch.stop().await {
                tracing::warn!(error = %stop_err, "log subscription ended with error");
            }
            Err(e)
        }
    }
}
