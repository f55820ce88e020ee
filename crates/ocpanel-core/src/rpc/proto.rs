//! Protobuf messages for the server's gRPC services.
//!
//! Only the messages the panel exchanges are declared here. Field tags follow
//! the server's `.proto` definitions.

use chrono::{DateTime, TimeZone, Utc};

/// Wire-compatible with `google.protobuf.Timestamp`
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        Utc.timestamp_opt(self.seconds, nanos).single()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            seconds: time.timestamp(),
            nanos: time.timestamp_subsec_nanos() as i32,
        }
    }
}

/// Wire-compatible with `google.protobuf.Duration`
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

impl From<std::time::Duration> for Duration {
    fn from(duration: std::time::Duration) -> Self {
        Self {
            seconds: duration.as_secs() as i64,
            nanos: duration.subsec_nanos() as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RunningStatus {
    Normal = 0,
    Maintaining = 1,
}

// ============================================================================
// service.auth.v1
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthRequest {
    #[prost(string, tag = "3")]
    pub password: String,
    #[prost(oneof = "auth_request::Account", tags = "1, 2")]
    pub account: Option<auth_request::Account>,
}

pub mod auth_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Account {
        #[prost(string, tag = "1")]
        Ocid(String),
        #[prost(string, tag = "2")]
        Email(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthResponse {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub token: String,
}

// ============================================================================
// service.basic.v1
// ============================================================================

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TimestampRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TimestampResponse {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetServerInfoRequest {}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct ServerVersion {
    #[prost(uint32, tag = "1")]
    pub major: u32,
    #[prost(uint32, tag = "2")]
    pub minor: u32,
    #[prost(uint32, tag = "3")]
    pub patch: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetServerInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub server_version: Option<ServerVersion>,
    #[prost(uint32, tag = "2")]
    pub http_port: u32,
    #[prost(enumeration = "RunningStatus", tag = "3")]
    pub status: i32,
    #[prost(string, tag = "4")]
    pub unique_identifier: String,
    #[prost(string, tag = "5")]
    pub server_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetIdRequest {
    #[prost(string, tag = "1")]
    pub ocid: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetIdResponse {
    #[prost(uint64, tag = "1")]
    pub id: u64,
}

// ============================================================================
// service.server_manage.v1
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetServerStatusRequest {
    #[prost(enumeration = "RunningStatus", tag = "1")]
    pub server_status: i32,
    #[prost(string, tag = "2")]
    pub reason: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SetServerStatusResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetConfigRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetConfigResponse {
    #[prost(string, tag = "1")]
    pub content: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetConfigRequest {
    #[prost(string, tag = "1")]
    pub content: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SetConfigResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BanUserRequest {
    #[prost(uint64, tag = "1")]
    pub user_id: u64,
    #[prost(string, optional, tag = "2")]
    pub reason: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub duration: Option<Duration>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BanUserResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UnbanUserRequest {
    #[prost(uint64, tag = "1")]
    pub user_id: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UnbanUserResponse {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteAccountRequest {
    #[prost(uint64, tag = "1")]
    pub user_id: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteAccountResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Announcement {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(string, tag = "2")]
    pub content: String,
    #[prost(uint64, tag = "3")]
    pub publisher_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PublishAnnouncementRequest {
    #[prost(message, optional, tag = "1")]
    pub announcement: Option<Announcement>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PublishAnnouncementResponse {
    #[prost(uint64, tag = "1")]
    pub id: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetMonitoringMetricsRequest {
    #[prost(bool, tag = "1")]
    pub include_system_metrics: bool,
    #[prost(bool, tag = "2")]
    pub include_tokio_metrics: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SystemMetrics {
    #[prost(double, tag = "1")]
    pub cpu_usage_percent: f64,
    #[prost(double, tag = "2")]
    pub memory_usage_percent: f64,
    #[prost(double, tag = "3")]
    pub disk_usage_percent: f64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct MonitoringMetrics {
    #[prost(uint64, tag = "1")]
    pub active_connections: u64,
    #[prost(uint64, tag = "2")]
    pub total_users: u64,
    #[prost(double, tag = "3")]
    pub messages_per_second: f64,
    #[prost(uint64, tag = "4")]
    pub uptime_seconds: u64,
    #[prost(message, optional, tag = "5")]
    pub system: Option<SystemMetrics>,
    #[prost(message, optional, tag = "6")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetMonitoringMetricsResponse {
    #[prost(message, optional, tag = "1")]
    pub metrics: Option<MonitoringMetrics>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListServerRolesRequest {
    #[prost(uint64, tag = "1")]
    pub page_size: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerRole {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(uint64, repeated, tag = "4")]
    pub permissions: Vec<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListServerRolesResponse {
    #[prost(message, repeated, tag = "1")]
    pub roles: Vec<ServerRole>,
}

// ============================================================================
// service.ourchat.v1
// ============================================================================

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetAccountInfoRequest {
    #[prost(uint64, optional, tag = "1")]
    pub id: Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAccountInfoResponse {
    #[prost(string, tag = "1")]
    pub ocid: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub user_name: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FetchMsgsRequest {
    #[prost(message, optional, tag = "1")]
    pub time: Option<Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchMsgsResponse {
    #[prost(uint64, tag = "1")]
    pub msg_id: u64,
    #[prost(message, optional, tag = "2")]
    pub time: Option<Timestamp>,
    #[prost(uint64, optional, tag = "3")]
    pub sender_id: Option<u64>,
    #[prost(string, tag = "4")]
    pub content: String,
    #[prost(bool, tag = "5")]
    pub is_announcement: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_timestamp_datetime_conversion() {
        let time = Utc.with_ymd_and_hms(2025, 4, 5, 8, 15, 42).unwrap();
        let stamp = Timestamp::from(time);
        assert_eq!(stamp.seconds, time.timestamp());
        assert_eq!(stamp.to_datetime(), Some(time));
    }

    #[test]
    fn test_negative_nanos_is_not_a_datetime() {
        let stamp = Timestamp {
            seconds: 0,
            nanos: -1,
        };
        assert_eq!(stamp.to_datetime(), None);
    }

    #[test]
    fn test_auth_request_encodes_oneof_account() {
        let request = AuthRequest {
            password: "secret".to_string(),
            account: Some(auth_request::Account::Email("admin@example.com".to_string())),
        };
        let decoded = AuthRequest::decode(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_unknown_running_status_is_rejected() {
        assert_eq!(RunningStatus::try_from(1), Ok(RunningStatus::Maintaining));
        assert!(RunningStatus::try_from(7).is_err());
    }
}
