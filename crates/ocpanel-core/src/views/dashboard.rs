use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{GetServerInfoRequest, PingRequest, TimestampRequest};
use crate::rpc::ClientRegistry;

use super::{to_datetime, ServerInfo, View, ViewData};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub server: ServerInfo,
    pub server_time: Option<DateTime<Utc>>,
    /// Round-trip time of a `Ping`, in milliseconds
    pub ping_ms: f64,
}

pub struct DashboardView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(DashboardView::new(registry))
}

impl DashboardView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    async fn ping(&self) -> Result<f64, RpcError> {
        let started = Instant::now();
        self.registry.basic().ping(PingRequest {}).await?;
        Ok(started.elapsed().as_secs_f64() * 1000.0)
    }
}

impl View for DashboardView {
    fn route(&self) -> RouteName {
        RouteName::Dashboard
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let basic = self.registry.basic();
            let (info, time, ping_ms) = futures::try_join!(
                basic.get_server_info(GetServerInfoRequest {}),
                basic.timestamp(TimestampRequest {}),
                self.ping(),
            )?;

            Ok(ViewData::Dashboard(DashboardData {
                server: ServerInfo::from(info),
                server_time: to_datetime(time.timestamp),
                ping_ms,
            }))
        }
        .boxed()
    }
}
