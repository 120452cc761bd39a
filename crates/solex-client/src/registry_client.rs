//! Client for the user registry example program.
//!
//! The program takes ownership of the PDA derived from a username and stores
//! the registering signer's public key in it. The client:
//! - derives the PDA locally
//! - funds it to the rent exemption threshold for one public key
//! - builds `[transfer, register]` in that order and submits it once
//!
//! Account list expected by the program, in order:
//! 0. `[signer]` the registering user
//! 1. `[writable]` the PDA, already funded when the instruction runs
//! 2. `[]` the system program (allocate + assign)
//! 3. `[]` the memo program (UTF-8 validation of the username)

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::{system_instruction, system_program};

use crate::constants::{memo_program_id, PUBKEY_BYTE_COUNT};
use crate::errors::SolexResult;
use crate::funding::{decide_funding, FundingDecision, FundingPolicy};
use crate::pda::{self, DerivedAddress};
use crate::rpc::LedgerRpc;
use crate::submit;

/// Instructions for one registration, plus how they were derived.
#[derive(Debug, Clone)]
pub struct RegistrationPlan {
    pub username: String,
    pub pda: DerivedAddress,
    pub funding: FundingDecision,
    pub instructions: Vec<Instruction>,
}

impl RegistrationPlan {
    pub fn describe(&self) -> String {
        format!(
            "register {:?} at {} (bump {}), fund {} lamports, {} instruction(s)",
            self.username,
            self.pda.address,
            self.pda.bump,
            self.funding.lamports,
            self.instructions.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub signature: Signature,
    pub username: String,
    pub address: Pubkey,
    pub bump: u8,
    pub lamports: u64,
    pub instruction_count: usize,
}

/// Program instruction registering `username` at `pda`.
pub fn ix_register(program_id: &Pubkey, payer: &Pubkey, pda: &Pubkey, username: &str) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new(*pda, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(memo_program_id(), false),
        ],
        data: username.as_bytes().to_vec(),
    }
}

/// Assemble the registration instructions. The transfer, when present,
/// always comes first: the program checks the PDA is rent exempt.
pub fn assemble_registration(
    program_id: &Pubkey,
    payer: &Pubkey,
    username: &str,
    pda: &Pubkey,
    lamports: u64,
) -> Vec<Instruction> {
    let mut ixs = Vec::with_capacity(2);
    if lamports > 0 {
        ixs.push(system_instruction::transfer(payer, pda, lamports));
    }
    ixs.push(ix_register(program_id, payer, pda, username));
    ixs
}

pub struct RegistryClient<R> {
    pub program_id: Pubkey,
    rpc: R,
}

impl<R: LedgerRpc> RegistryClient<R> {
    pub fn new(program_id: Pubkey, rpc: R) -> Self {
        Self { program_id, rpc }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn derive_username(&self, username: &str) -> SolexResult<DerivedAddress> {
        pda::derive_username(&self.program_id, username)
    }

    /// Derive, decide funding and assemble, without submitting.
    pub async fn plan_registration(
        &self,
        payer: &Pubkey,
        username: &str,
        policy: FundingPolicy,
    ) -> SolexResult<RegistrationPlan> {
        let pda = self.derive_username(username)?;
        tracing::info!(username, pda = %pda.address, bump = pda.bump, "derived username account");

        let funding = decide_funding(&self.rpc, policy, &pda.address, PUBKEY_BYTE_COUNT).await?;
        let instructions = assemble_registration(&self.program_id, payer, username, &pda.address, funding.lamports);

        Ok(RegistrationPlan { username: username.to_string(), pda, funding, instructions })
    }

    pub async fn send_transaction(&self, payer: &Keypair, ixs: &[Instruction]) -> SolexResult<Signature> {
        submit::send_transaction(&self.rpc, payer, ixs).await
    }

    pub async fn register(
        &self,
        payer: &Keypair,
        username: &str,
        policy: FundingPolicy,
    ) -> SolexResult<RegistrationReceipt> {
        let plan = self.plan_registration(&payer.pubkey(), username, policy).await?;
        tracing::debug!(plan = %plan.describe());
        let signature = self.send_transaction(payer, &plan.instructions).await?;

        Ok(RegistrationReceipt {
            signature,
            username: plan.username,
            address: plan.pda.address,
            bump: plan.pda.bump,
            lamports: plan.funding.lamports,
            instruction_count: plan.instructions.len(),
        })
    }
}
