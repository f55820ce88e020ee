use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::debug;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{FetchMsgsRequest, FetchMsgsResponse, Timestamp};
use crate::rpc::ClientRegistry;

use super::{to_datetime, View, ViewData};

/// How far back the log view asks for deliveries
const DEFAULT_LOOKBACK_HOURS: i64 = 24;

/// Entries kept per load
const DEFAULT_MAX_ENTRIES: usize = 200;

/// `FetchMsgs` stays open for new deliveries; stop once it has been quiet this long
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub msg_id: u64,
    pub time: Option<DateTime<Utc>>,
    pub sender_id: Option<u64>,
    pub is_announcement: bool,
    pub content: String,
}

impl From<FetchMsgsResponse> for LogEntry {
    fn from(msg: FetchMsgsResponse) -> Self {
        Self {
            msg_id: msg.msg_id,
            time: to_datetime(msg.time),
            sender_id: msg.sender_id,
            is_announcement: msg.is_announcement,
            content: msg.content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogsData {
    pub since: DateTime<Utc>,
    pub entries: Vec<LogEntry>,
    /// True when `max_entries` cut the stream short
    pub truncated: bool,
}

/// Recent message deliveries, read from the server-streaming `FetchMsgs`
pub struct LogsView {
    registry: Arc<ClientRegistry>,
    lookback: chrono::Duration,
    max_entries: usize,
    idle_timeout: Duration,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(LogsView::new(registry))
}

impl LogsView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self {
            registry,
            lookback: chrono::Duration::hours(DEFAULT_LOOKBACK_HOURS),
            max_entries: DEFAULT_MAX_ENTRIES,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_lookback(mut self, lookback: chrono::Duration) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub async fn fetch(&self) -> Result<LogsData, RpcError> {
        let since = Utc::now() - self.lookback;
        let mut stream = self
            .registry
            .core()
            .fetch_msgs(FetchMsgsRequest {
                time: Some(Timestamp::from(since)),
            })
            .await?;

        let mut entries = Vec::new();
        let mut truncated = false;
        loop {
            let next = match tokio::time::timeout(self.idle_timeout, stream.message()).await {
                Ok(next) => next?,
                Err(_) => {
                    debug!(received = entries.len(), "Log stream idle, stopping");
                    break;
                }
            };
            let Some(msg) = next else {
                break;
            };
            if entries.len() == self.max_entries {
                truncated = true;
                break;
            }
            entries.push(LogEntry::from(msg));
        }

        Ok(LogsData {
            since,
            entries,
            truncated,
        })
    }
}

impl View for LogsView {
    fn route(&self) -> RouteName {
        RouteName::Logs
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move { Ok(ViewData::Logs(self.fetch().await?)) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_from_message() {
        let entry = LogEntry::from(FetchMsgsResponse {
            msg_id: 9,
            time: Some(Timestamp {
                seconds: 1_700_000_000,
                nanos: 0,
            }),
            sender_id: None,
            content: "maintenance at 02:00".to_string(),
            is_announcement: true,
        });
        assert_eq!(entry.msg_id, 9);
        assert!(entry.is_announcement);
        assert_eq!(entry.sender_id, None);
        assert_eq!(entry.time.unwrap().timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_builder_clamps_max_entries() {
        let registry = ClientRegistry::new(
            "http://127.0.0.1:7777/backend",
            crate::session::SessionStore::in_memory(),
        )
        .unwrap();
        let view = LogsView::new(Arc::new(registry))
            .with_max_entries(0)
            .with_lookback(chrono::Duration::minutes(5))
            .with_idle_timeout(Duration::from_millis(100));
        assert_eq!(view.max_entries, 1);
        assert_eq!(view.lookback, chrono::Duration::minutes(5));
        assert_eq!(view.route(), RouteName::Logs);
    }
}
