use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use solex_client::{flows, parse_pubkey, LogEntry, LogSink, SolanaLogSource, SolanaRpc};

use crate::args::AccountLoggerArgs;
use crate::output;

#[derive(Debug, Serialize)]
pub struct LogOut<'a> {
    pub signature: &'a str,
    pub err: Option<&'a str>,
    pub logs: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct LoggedOut {
    pub signature: String,
}

pub fn render_entry(entry: &LogEntry) -> String {
    let mut s = format!("logs for {}", entry.signature);
    if let Some(err) = &entry.err {
        s.push_str(&format!(" (failed: {err})"));
    }
    for line in &entry.logs {
        s.push_str("\n  ");
        s.push_str(line);
    }
    s
}

fn sink(json: bool) -> LogSink {
    Box::new(move |entry: &LogEntry| {
        let printed = if json {
            let out = LogOut { signature: &entry.signature, err: entry.err.as_deref(), logs: &entry.logs };
            output::print_json_line(&out)
        } else {
            output::print_line(&render_entry(entry))
        };
        if let Err(e) = printed {
            tracing::warn!(error = %e, "could not print log entry");
        }
    })
}

pub async fn run(args: AccountLoggerArgs) -> Result<()> {
    let program_id = parse_pubkey(&args.program_id)?;
    let cfg = args.client_config()?;
    let identity = super::identity(&args.common);
    let rpc = SolanaRpc::new(&cfg.rpc_url, cfg.commitment_config());
    let logs = Arc::new(SolanaLogSource::new(&cfg.websocket_url()?, cfg.commitment_config()));
    tracing::info!(rpc = ?rpc, %program_id, "logging clock account");

    let sig = flows::log_clock_account(&rpc, logs, identity.as_ref(), &cfg, program_id, sink(output::is_json()))
        .await
        .context("could not log the clock account")?;

    if output::is_json() {
        output::print_json_line(&LoggedOut { signature: sig.to_string() })?;
    } else {
        output::print_line(&sig.to_string())?;
    }
    Ok(())
}
