use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::info;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{
    Announcement, GetAccountInfoRequest, GetIdRequest, GetServerInfoRequest,
    PublishAnnouncementRequest, RunningStatus, SetServerStatusRequest,
};
use crate::rpc::ClientRegistry;

use super::{ServerStatus, View, ViewData};

#[derive(Debug, Clone, Serialize)]
pub struct ServicesData {
    pub server_name: String,
    pub status: ServerStatus,
}

/// Server running state and announcements
pub struct ServicesView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(ServicesView::new(registry))
}

impl ServicesView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    pub async fn set_status(&self, status: RunningStatus, reason: &str) -> Result<(), RpcError> {
        self.registry
            .server_manage()
            .set_server_status(SetServerStatusRequest {
                server_status: status as i32,
                reason: reason.to_string(),
            })
            .await?;
        info!(?status, "Server status changed");
        Ok(())
    }

    /// Publish an announcement as the logged-in account. Returns its id.
    pub async fn announce(&self, title: &str, content: &str) -> Result<u64, RpcError> {
        let account = self
            .registry
            .core()
            .get_account_info(GetAccountInfoRequest { id: None })
            .await?;
        let publisher = self
            .registry
            .basic()
            .get_id(GetIdRequest { ocid: account.ocid })
            .await?;

        let response = self
            .registry
            .server_manage()
            .publish_announcement(PublishAnnouncementRequest {
                announcement: Some(Announcement {
                    title: title.to_string(),
                    content: content.to_string(),
                    publisher_id: publisher.id,
                }),
            })
            .await?;
        info!(id = response.id, "Announcement published");
        Ok(response.id)
    }
}

impl View for ServicesView {
    fn route(&self) -> RouteName {
        RouteName::Services
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let info = self
                .registry
                .basic()
                .get_server_info(GetServerInfoRequest {})
                .await?;
            Ok(ViewData::Services(ServicesData {
                status: ServerStatus::from(info.status),
                server_name: info.server_name,
            }))
        }
        .boxed()
    }
}
