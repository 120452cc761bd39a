//! Client for the account logger example program: one instruction that
//! hands the program the clock sysvar so it logs its contents.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::sysvar;

use crate::errors::SolexResult;
use crate::rpc::LedgerRpc;
use crate::submit;

pub fn ix_log_clock(program_id: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new_readonly(sysvar::clock::id(), false)],
        data: vec![],
    }
}

pub struct LoggerClient<R> {
    pub program_id: Pubkey,
    rpc: R,
}

impl<R: LedgerRpc> LoggerClient<R> {
    pub fn new(program_id: Pubkey, rpc: R) -> Self {
        Self { program_id, rpc }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub async fn log_clock(&self, payer: &Keypair) -> SolexResult<Signature> {
        submit::send_transaction(&self.rpc, payer, &[ix_log_clock(&self.program_id)]).await
    }
}
