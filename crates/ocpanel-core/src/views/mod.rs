//! Per-route views.
//!
//! A view is a handle over the shared `ClientRegistry`. It is built by its
//! route's factory when a navigation reaches it, and `load()` fetches what the
//! page shows. Views never construct transports or stubs of their own.

pub mod config;
pub mod dashboard;
pub mod login;
pub mod logs;
pub mod monitor;
pub mod services;
pub mod users;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{GetServerInfoResponse, RunningStatus};
use crate::rpc::ClientRegistry;

pub use config::{ConfigData, ConfigView};
pub use dashboard::{DashboardData, DashboardView};
pub use login::{LoginData, LoginOutcome, LoginView};
pub use logs::{LogEntry, LogsData, LogsView};
pub use monitor::{MonitorData, MonitorView};
pub use services::{ServicesData, ServicesView};
pub use users::{RoleInfo, UsersData, UsersView};

pub trait View: Send + Sync {
    fn route(&self) -> RouteName;

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>>;
}

/// Builds the view for a route on demand
pub type ViewFactory = fn(Arc<ClientRegistry>) -> Box<dyn View>;

/// Everything a view can load, tagged by view name
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewData {
    Login(LoginData),
    Dashboard(DashboardData),
    Services(ServicesData),
    Monitor(MonitorData),
    Logs(LogsData),
    Users(UsersData),
    Config(ConfigData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Normal,
    Maintaining,
    Unknown,
}

impl From<i32> for ServerStatus {
    fn from(value: i32) -> Self {
        match RunningStatus::try_from(value) {
            Ok(RunningStatus::Normal) => ServerStatus::Normal,
            Ok(RunningStatus::Maintaining) => ServerStatus::Maintaining,
            Err(_) => ServerStatus::Unknown,
        }
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServerStatus::Normal => "normal",
            ServerStatus::Maintaining => "maintaining",
            ServerStatus::Unknown => "unknown",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub http_port: u32,
    pub status: ServerStatus,
    pub unique_identifier: String,
}

impl From<GetServerInfoResponse> for ServerInfo {
    fn from(response: GetServerInfoResponse) -> Self {
        let version = response
            .server_version
            .map(|v| format!("{}.{}.{}", v.major, v.minor, v.patch))
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            name: response.server_name,
            version,
            http_port: response.http_port,
            status: ServerStatus::from(response.status),
            unique_identifier: response.unique_identifier,
        }
    }
}

pub(crate) fn to_datetime(stamp: Option<crate::rpc::proto::Timestamp>) -> Option<DateTime<Utc>> {
    stamp.and_then(|stamp| stamp.to_datetime())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::proto::ServerVersion;

    #[test]
    fn test_server_info_from_response() {
        let info = ServerInfo::from(GetServerInfoResponse {
            server_version: Some(ServerVersion {
                major: 0,
                minor: 4,
                patch: 2,
            }),
            http_port: 7777,
            status: RunningStatus::Maintaining as i32,
            unique_identifier: "c0ffee".to_string(),
            server_name: "OurChat".to_string(),
        });
        assert_eq!(info.version, "0.4.2");
        assert_eq!(info.status, ServerStatus::Maintaining);
        assert_eq!(info.name, "OurChat");
    }

    #[test]
    fn test_server_info_missing_version() {
        let info = ServerInfo::from(GetServerInfoResponse::default());
        assert_eq!(info.version, "unknown");
        assert_eq!(info.status, ServerStatus::Normal);
    }

    #[test]
    fn test_unknown_status_value() {
        assert_eq!(ServerStatus::from(42), ServerStatus::Unknown);
        assert_eq!(ServerStatus::Unknown.to_string(), "unknown");
    }
}
