//! Sign, submit and confirm.
//!
//! A single attempt per transaction. Whatever the cluster rejects (bad
//! instruction, missing signature, insufficient funds, program error) comes
//! back as [`SolexError::Submission`] with the cluster's message.

use solana_sdk::instruction::Instruction;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::errors::{SolexError, SolexResult};
use crate::rpc::LedgerRpc;

/// Build a transaction paid for and signed by `payer` alone.
pub async fn build_signed<R: LedgerRpc + ?Sized>(
    rpc: &R,
    payer: &Keypair,
    ixs: &[Instruction],
) -> SolexResult<Transaction> {
    let blockhash = rpc.latest_blockhash().await?;
    let mut tx = Transaction::new_with_payer(ixs, Some(&payer.pubkey()));
    tx.try_sign(&[payer], blockhash).map_err(|e| SolexError::Signing(e.to_string()))?;
    Ok(tx)
}

pub async fn send_transaction<R: LedgerRpc + ?Sized>(
    rpc: &R,
    payer: &Keypair,
    ixs: &[Instruction],
) -> SolexResult<Signature> {
    let tx = build_signed(rpc, payer, ixs).await?;
    tracing::info!(instructions = ixs.len(), payer = %payer.pubkey(), "submitting transaction");
    let sig = rpc.send_and_confirm(&tx).await?;
    tracing::info!(%sig, "transaction confirmed");
    Ok(sig)
}

/// Airdrop `lamports` to the payer. Zero skips the request.
pub async fn fund_payer<R: LedgerRpc + ?Sized>(
    rpc: &R,
    payer: &Keypair,
    lamports: u64,
) -> SolexResult<Option<Signature>> {
    if lamports == 0 {
        return Ok(None);
    }
    let sig = rpc.request_airdrop(&payer.pubkey(), lamports).await?;
    tracing::info!(%sig, lamports, payer = %payer.pubkey(), "airdrop confirmed");
    Ok(Some(sig))
}
