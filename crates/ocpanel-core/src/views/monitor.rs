use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{GetMonitoringMetricsRequest, MonitoringMetrics};
use crate::rpc::ClientRegistry;

use super::{to_datetime, View, ViewData};

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonitorData {
    pub active_connections: u64,
    pub total_users: u64,
    pub messages_per_second: f64,
    pub uptime_seconds: u64,
    pub cpu_usage_percent: Option<f64>,
    pub memory_usage_percent: Option<f64>,
    pub disk_usage_percent: Option<f64>,
    pub sampled_at: Option<DateTime<Utc>>,
}

impl From<MonitoringMetrics> for MonitorData {
    fn from(metrics: MonitoringMetrics) -> Self {
        Self {
            active_connections: metrics.active_connections,
            total_users: metrics.total_users,
            messages_per_second: metrics.messages_per_second,
            uptime_seconds: metrics.uptime_seconds,
            cpu_usage_percent: metrics.system.map(|s| s.cpu_usage_percent),
            memory_usage_percent: metrics.system.map(|s| s.memory_usage_percent),
            disk_usage_percent: metrics.system.map(|s| s.disk_usage_percent),
            sampled_at: to_datetime(metrics.timestamp),
        }
    }
}

pub struct MonitorView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(MonitorView::new(registry))
}

impl MonitorView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }
}

impl View for MonitorView {
    fn route(&self) -> RouteName {
        RouteName::Monitor
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let response = self
                .registry
                .server_manage()
                .get_monitoring_metrics(GetMonitoringMetricsRequest {
                    include_system_metrics: true,
                    include_tokio_metrics: false,
                })
                .await?;
            // A server without metrics support answers with an empty message
            let data = response.metrics.map(MonitorData::from).unwrap_or_default();
            Ok(ViewData::Monitor(data))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::proto::{SystemMetrics, Timestamp};

    #[test]
    fn test_monitor_data_from_metrics() {
        let data = MonitorData::from(MonitoringMetrics {
            active_connections: 12,
            total_users: 340,
            messages_per_second: 1.5,
            uptime_seconds: 3600,
            system: Some(SystemMetrics {
                cpu_usage_percent: 17.0,
                memory_usage_percent: 42.5,
                disk_usage_percent: 63.0,
            }),
            timestamp: Some(Timestamp {
                seconds: 1_700_000_000,
                nanos: 0,
            }),
        });
        assert_eq!(data.active_connections, 12);
        assert_eq!(data.memory_usage_percent, Some(42.5));
        assert_eq!(data.sampled_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_monitor_data_without_system_metrics() {
        let data = MonitorData::from(MonitoringMetrics::default());
        assert_eq!(data.cpu_usage_percent, None);
        assert_eq!(data.sampled_at, None);
    }
}
