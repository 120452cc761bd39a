use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use solex_client::{validate_config, ClientConfig, Commitment, FundingPolicy, LAMPORTS_PER_SOL};

use crate::output;

pub const ACCOUNT_LOGGER_USAGE: &str = "account_logger <programId>";
pub const USER_REGISTRY_USAGE: &str = "user_registry <programId> <username>";

/// Flags shared by both entry points.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Cluster JSON-RPC endpoint (devnet by default; http://localhost:8899 for a test validator).
    #[arg(long, default_value = solex_client::DEFAULT_RPC_URL)]
    pub url: String,

    /// Websocket endpoint. Derived from --url when omitted.
    #[arg(long)]
    pub ws_url: Option<String>,

    /// Commitment used for queries and confirmation.
    #[arg(long, default_value = "processed")]
    pub commitment: Commitment,

    /// Pay with this keypair file instead of a fresh ephemeral keypair.
    #[arg(long)]
    pub keypair: Option<PathBuf>,

    /// Lamports to airdrop to the payer first (0 skips the airdrop).
    #[arg(long, default_value_t = LAMPORTS_PER_SOL)]
    pub airdrop: u64,

    /// Emit JSON output on stdout and JSON log lines on stderr.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let cfg = ClientConfig {
            rpc_url: self.url.clone(),
            ws_url: self.ws_url.clone(),
            commitment: self.commitment,
            airdrop_lamports: self.airdrop,
            ..ClientConfig::default()
        };
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

/// Invoke the account logger program and print its logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "account_logger", version, about = "Log the clock sysvar through the account logger program")]
pub struct AccountLoggerArgs {
    /// Program id of the deployed account logger.
    pub program_id: String,

    /// How long to keep printing logs after the transaction is confirmed.
    #[arg(long, default_value_t = 5_000)]
    pub linger_ms: u64,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl AccountLoggerArgs {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut cfg = self.common.client_config()?;
        cfg.log_linger = std::time::Duration::from_millis(self.linger_ms);
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

/// Register a username with the user registry program.
#[derive(Parser, Debug, Clone)]
#[command(name = "user_registry", version, about = "Register a username with the user registry program")]
pub struct UserRegistryArgs {
    /// Program id of the deployed user registry.
    pub program_id: String,

    /// Username to register (at most 32 bytes of UTF-8).
    pub username: String,

    /// Fund the username account with the full rent threshold (always) or only the shortfall (top-up).
    #[arg(long, default_value = "always")]
    pub funding: FundingPolicy,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl UserRegistryArgs {
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut cfg = self.common.client_config()?;
        cfg.funding_policy = self.funding;
        Ok(cfg)
    }
}

/// Parse arguments, or print the error with `usage` and exit with status 1.
///
/// Help and version requests still exit with 0.
pub fn parse_or_exit<T: Parser>(usage: &str) -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => e.exit(),
            _ => {
                output::eprintln_line("ERROR: Wrong arguments. Run this program as follows:");
                output::eprintln_line(usage);
                output::eprintln_line("");
                output::eprintln_line(&e.render().to_string());
                std::process::exit(1);
            }
        },
    }
}
