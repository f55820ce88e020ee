use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::info;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{
    BanUserRequest, DeleteAccountRequest, ListServerRolesRequest, ServerRole, UnbanUserRequest,
};
use crate::rpc::ClientRegistry;

use super::{View, ViewData};

const ROLE_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub permissions: Vec<u64>,
}

impl From<ServerRole> for RoleInfo {
    fn from(role: ServerRole) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
            permissions: role.permissions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersData {
    pub roles: Vec<RoleInfo>,
}

/// User moderation: server roles, bans and account deletion
pub struct UsersView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(UsersView::new(registry))
}

impl UsersView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Ban `user_id`. No duration means permanent.
    pub async fn ban(
        &self,
        user_id: u64,
        duration: Option<Duration>,
        reason: Option<String>,
    ) -> Result<(), RpcError> {
        self.registry
            .server_manage()
            .ban_user(BanUserRequest {
                user_id,
                reason,
                duration: duration.map(Into::into),
            })
            .await?;
        info!(user_id, ?duration, "User banned");
        Ok(())
    }

    pub async fn unban(&self, user_id: u64) -> Result<(), RpcError> {
        self.registry
            .server_manage()
            .unban_user(UnbanUserRequest { user_id })
            .await?;
        info!(user_id, "User unbanned");
        Ok(())
    }

    pub async fn delete_account(&self, user_id: u64) -> Result<(), RpcError> {
        self.registry
            .server_manage()
            .delete_account(DeleteAccountRequest { user_id })
            .await?;
        info!(user_id, "Account deleted");
        Ok(())
    }
}

impl View for UsersView {
    fn route(&self) -> RouteName {
        RouteName::Users
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let response = self
                .registry
                .server_manage()
                .list_server_roles(ListServerRolesRequest {
                    page_size: ROLE_PAGE_SIZE,
                })
                .await?;
            Ok(ViewData::Users(UsersData {
                roles: response.roles.into_iter().map(RoleInfo::from).collect(),
            }))
        }
        .boxed()
    }
}
