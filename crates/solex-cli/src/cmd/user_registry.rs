use anyhow::{Context, Result};
use serde::Serialize;
use solex_client::{flows, parse_pubkey, RegistrationReceipt, SolanaRpc};

use crate::args::UserRegistryArgs;
use crate::output;

#[derive(Debug, Serialize)]
pub struct RegisterOut {
    pub signature: String,
    pub username: String,
    pub address: String,
    pub bump: u8,
    pub lamports: u64,
    pub instructions: usize,
}

impl From<RegistrationReceipt> for RegisterOut {
    fn from(r: RegistrationReceipt) -> Self {
        Self {
            signature: r.signature.to_string(),
            username: r.username,
            address: r.address.to_string(),
            bump: r.bump,
            lamports: r.lamports,
            instructions: r.instruction_count,
        }
    }
}

pub async fn run(args: UserRegistryArgs) -> Result<()> {
    let program_id = parse_pubkey(&args.program_id)?;
    let cfg = args.client_config()?;
    let identity = super::identity(&args.common);
    let rpc = SolanaRpc::new(&cfg.rpc_url, cfg.commitment_config());
    tracing::info!(rpc = ?rpc, %program_id, username = %args.username, "registering username");

    let receipt = flows::register_username(&rpc, identity.as_ref(), &cfg, program_id, &args.username)
        .await
        .with_context(|| format!("could not register {:?}", args.username))?;

    if output::is_json() {
        output::print(&RegisterOut::from(receipt))?;
    } else {
        output::print_line(&receipt.signature.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signature::Signature;

    #[test]
    fn json_output_uses_base58_strings() {
        let address = Pubkey::new_unique();
        let out = RegisterOut::from(RegistrationReceipt {
            signature: Signature::default(),
            username: "alice".into(),
            address,
            bump: 254,
            lamports: 1_113_600,
            instruction_count: 2,
        });
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["address"], address.to_string());
        assert_eq!(v["bump"], 254);
        assert_eq!(v["instructions"], 2);
    }
}
