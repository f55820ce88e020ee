//! Typed client stubs, one per server service.
//!
//! Stubs are thin: each method names its RPC and forwards to the shared
//! `Transport`. They take `&self`, so views can share them freely.

use std::sync::Arc;

use tonic::codec::Streaming;
use tonic::IntoRequest;

use crate::error::RpcError;

use super::proto::{
    AuthRequest, AuthResponse, BanUserRequest, BanUserResponse, DeleteAccountRequest,
    DeleteAccountResponse, FetchMsgsRequest, FetchMsgsResponse, GetAccountInfoRequest,
    GetAccountInfoResponse, GetConfigRequest, GetConfigResponse, GetIdRequest, GetIdResponse,
    GetMonitoringMetricsRequest, GetMonitoringMetricsResponse, GetServerInfoRequest,
    GetServerInfoResponse, ListServerRolesRequest, ListServerRolesResponse, PingRequest,
    PingResponse, PublishAnnouncementRequest, PublishAnnouncementResponse, SetConfigRequest,
    SetConfigResponse, SetServerStatusRequest, SetServerStatusResponse, TimestampRequest,
    TimestampResponse, UnbanUserRequest, UnbanUserResponse,
};
use super::transport::Transport;

/// Core chat service (`service.ourchat.v1.OurChatService`)
#[derive(Debug, Clone)]
pub struct CoreClient {
    transport: Arc<Transport>,
}

impl CoreClient {
    pub const SERVICE: &'static str = "service.ourchat.v1.OurChatService";

    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub async fn get_account_info(
        &self,
        request: impl IntoRequest<GetAccountInfoRequest>,
    ) -> Result<GetAccountInfoResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "GetAccountInfo", request)
            .await
    }

    /// Stream of message deliveries since the requested time
    pub async fn fetch_msgs(
        &self,
        request: impl IntoRequest<FetchMsgsRequest>,
    ) -> Result<Streaming<FetchMsgsResponse>, RpcError> {
        self.transport
            .server_streaming(Self::SERVICE, "FetchMsgs", request)
            .await
    }
}

/// Unauthenticated server information (`service.basic.v1.BasicService`)
#[derive(Debug, Clone)]
pub struct BasicClient {
    transport: Arc<Transport>,
}

impl BasicClient {
    pub const SERVICE: &'static str = "service.basic.v1.BasicService";

    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub async fn get_server_info(
        &self,
        request: impl IntoRequest<GetServerInfoRequest>,
    ) -> Result<GetServerInfoResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "GetServerInfo", request)
            .await
    }

    pub async fn timestamp(
        &self,
        request: impl IntoRequest<TimestampRequest>,
    ) -> Result<TimestampResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "Timestamp", request).await
    }

    pub async fn ping(
        &self,
        request: impl IntoRequest<PingRequest>,
    ) -> Result<PingResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "Ping", request).await
    }

    pub async fn get_id(
        &self,
        request: impl IntoRequest<GetIdRequest>,
    ) -> Result<GetIdResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "GetId", request).await
    }
}

/// Administrative operations (`service.server_manage.v1.ServerManageService`)
#[derive(Debug, Clone)]
pub struct ServerManageClient {
    transport: Arc<Transport>,
}

impl ServerManageClient {
    pub const SERVICE: &'static str = "service.server_manage.v1.ServerManageService";

    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub async fn set_server_status(
        &self,
        request: impl IntoRequest<SetServerStatusRequest>,
    ) -> Result<SetServerStatusResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "SetServerStatus", request)
            .await
    }

    pub async fn get_config(
        &self,
        request: impl IntoRequest<GetConfigRequest>,
    ) -> Result<GetConfigResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "GetConfig", request).await
    }

    pub async fn set_config(
        &self,
        request: impl IntoRequest<SetConfigRequest>,
    ) -> Result<SetConfigResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "SetConfig", request).await
    }

    pub async fn ban_user(
        &self,
        request: impl IntoRequest<BanUserRequest>,
    ) -> Result<BanUserResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "BanUser", request).await
    }

    pub async fn unban_user(
        &self,
        request: impl IntoRequest<UnbanUserRequest>,
    ) -> Result<UnbanUserResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "UnbanUser", request).await
    }

    pub async fn delete_account(
        &self,
        request: impl IntoRequest<DeleteAccountRequest>,
    ) -> Result<DeleteAccountResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "DeleteAccount", request)
            .await
    }

    pub async fn publish_announcement(
        &self,
        request: impl IntoRequest<PublishAnnouncementRequest>,
    ) -> Result<PublishAnnouncementResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "PublishAnnouncement", request)
            .await
    }

    pub async fn get_monitoring_metrics(
        &self,
        request: impl IntoRequest<GetMonitoringMetricsRequest>,
    ) -> Result<GetMonitoringMetricsResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "GetMonitoringMetrics", request)
            .await
    }

    pub async fn list_server_roles(
        &self,
        request: impl IntoRequest<ListServerRolesRequest>,
    ) -> Result<ListServerRolesResponse, RpcError> {
        self.transport
            .unary(Self::SERVICE, "ListServerRoles", request)
            .await
    }
}

/// Credential exchange (`service.auth.v1.AuthService`)
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Arc<Transport>,
}

impl AuthClient {
    pub const SERVICE: &'static str = "service.auth.v1.AuthService";

    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub async fn auth(
        &self,
        request: impl IntoRequest<AuthRequest>,
    ) -> Result<AuthResponse, RpcError> {
        self.transport.unary(Self::SERVICE, "Auth", request).await
    }
}
