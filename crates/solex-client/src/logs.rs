//! Scoped program log subscription.
//!
//! [`watch_logs`] returns once the subscription is live, so a transaction
//! submitted afterwards cannot slip past it. The returned [`LogWatch`] ends
//! the subscription when stopped or dropped; sources unsubscribe on every
//! exit path before their task finishes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::rpc_config::{RpcTransactionLogsConfig, RpcTransactionLogsFilter};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::errors::{SolexError, SolexResult};

/// One log notification for a transaction mentioning the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub signature: String,
    pub err: Option<String>,
    pub logs: Vec<String>,
}

pub type LogSink = Box<dyn FnMut(&LogEntry) + Send>;

#[async_trait]
pub trait LogSource: Send + Sync {
    /// Feed entries for `program_id` into `sink` until `cancel` turns true or
    /// the stream ends. `ready` must be signalled once subscribed. Returns the
    /// number of entries delivered.
    async fn stream_logs(
        &self,
        program_id: Pubkey,
        sink: &mut LogSink,
        ready: oneshot::Sender<()>,
        cancel: watch::Receiver<bool>,
    ) -> SolexResult<usize>;
}

/// Wait until `cancel` is set or its sender is gone.
pub async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    while !*cancel.borrow_and_update() {
        if cancel.changed().await.is_err() {
            return;
        }
    }
}

/// Websocket log subscription (`logsSubscribe` with a mentions filter).
#[derive(Debug, Clone)]
pub struct SolanaLogSource {
    ws_url: String,
    commitment: CommitmentConfig,
}

impl SolanaLogSource {
    pub fn new(ws_url: &str, commitment: CommitmentConfig) -> Self {
        Self { ws_url: ws_url.to_string(), commitment }
    }
}

#[async_trait]
impl LogSource for SolanaLogSource {
    async fn stream_logs(
        &self,
        program_id: Pubkey,
        sink: &mut LogSink,
        ready: oneshot::Sender<()>,
        mut cancel: watch::Receiver<bool>,
    ) -> SolexResult<usize> {
        let client = PubsubClient::new(&self.ws_url)
            .await
            .map_err(|e| SolexError::Subscription(e.to_string()))?;

        let filter = RpcTransactionLogsFilter::Mentions(vec![program_id.to_string()]);
        let config = RpcTransactionLogsConfig { commitment: Some(self.commitment) };
        let (mut stream, unsubscribe) = client
            .logs_subscribe(filter, config)
            .await
            .map_err(|e| SolexError::Subscription(e.to_string()))?;
        tracing::debug!(%program_id, ws_url = %self.ws_url, "subscribed to program logs");
        let _ = ready.send(());

        let mut delivered = 0;
        loop {
            tokio::select! {
                _ = cancelled(&mut cancel) => break,
                item = stream.next() => match item {
                    Some(resp) => {
                        let entry = LogEntry {
                            signature: resp.value.signature,
                            err: resp.value.err.map(|e| e.to_string()),
                            logs: resp.value.logs,
                        };
                        sink(&entry);
                        delivered += 1;
                    }
                    None => break,
                },
            }
        }

        drop(stream);
        unsubscribe().await;
        tracing::debug!(%program_id, delivered, "unsubscribed from program logs");
        if let Err(e) = client.shutdown().await {
            tracing::warn!(error = %e, "pubsub shutdown failed");
        }
        Ok(delivered)
    }
}

/// A live subscription. Dropping it cancels the subscription.
pub struct LogWatch {
    cancel: watch::Sender<bool>,
    task: JoinHandle<SolexResult<usize>>,
}

impl LogWatch {
    /// Keep listening for `linger`, then cancel and wait for the unsubscribe.
    pub async fn stop_after(mut self, linger: Duration) -> SolexResult<usize> {
        if !linger.is_zero() {
            tokio::time::sleep(linger).await;
        }
        let _ = self.cancel.send(true);
        match (&mut self.task).await {
            Ok(r) => r,
            Err(e) => Err(SolexError::Subscription(e.to_string())),
        }
    }

    pub async fn stop(self) -> SolexResult<usize> {
        self.stop_after(Duration::ZERO).await
    }
}

impl Drop for LogWatch {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
    }
}

/// Subscribe to logs mentioning `program_id` and return once live.
pub async fn watch_logs<S>(source: Arc<S>, program_id: Pubkey, sink: LogSink) -> SolexResult<LogWatch>
where
    S: LogSource + ?Sized + 'static,
{
    let (cancel, cancel_rx) = watch::channel(false);
    let (ready_tx, ready_rx) = oneshot::channel();

    let mut task = tokio::spawn(async move {
        let mut sink = sink;
        source.stream_logs(program_id, &mut sink, ready_tx, cancel_rx).await
    });

    if ready_rx.await.is_err() {
        // The source gave up before subscribing; surface its error.
        return match (&mut task).await {
            Ok(Ok(_)) => Err(SolexError::Subscription("log stream closed before subscribing".into())),
            Ok(Err(e)) => Err(e),
            Err(e) => Err(SolexError::Subscription(e.to_string())),
        };
    }
    Ok(LogWatch { cancel, task })
}
