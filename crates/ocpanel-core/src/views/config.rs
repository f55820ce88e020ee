use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::info;

use crate::error::RpcError;
use crate::router::RouteName;
use crate::rpc::proto::{GetConfigRequest, SetConfigRequest};
use crate::rpc::ClientRegistry;

use super::{View, ViewData};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    /// Parsed config, or the raw text if the server sent something that isn't JSON
    pub content: serde_json::Value,
}

/// Remote server configuration editor
pub struct ConfigView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(ConfigView::new(registry))
}

/// Reject config text that is not a JSON object before it reaches the server
pub fn validate(content: &str) -> Result<serde_json::Value, RpcError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| RpcError::InvalidRequest(format!("config is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(RpcError::InvalidRequest(
            "config must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

impl ConfigView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Raw config text as the server returns it
    pub async fn get(&self) -> Result<String, RpcError> {
        let response = self
            .registry
            .server_manage()
            .get_config(GetConfigRequest {})
            .await?;
        Ok(response.content)
    }

    pub async fn set(&self, content: &str) -> Result<(), RpcError> {
        validate(content)?;
        self.registry
            .server_manage()
            .set_config(SetConfigRequest {
                content: content.to_string(),
            })
            .await?;
        info!(bytes = content.len(), "Server config updated");
        Ok(())
    }
}

impl View for ConfigView {
    fn route(&self) -> RouteName {
        RouteName::Config
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let raw = self.get().await?;
            let content = serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw));
            Ok(ViewData::Config(ConfigData { content }))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_object() {
        let value = validate(r#"{"port": 7777, "debug": false}"#).unwrap();
        assert_eq!(value["port"], 7777);
    }

    #[test]
    fn test_validate_rejects_bad_json() {
        assert!(matches!(
            validate("{port: 7777"),
            Err(RpcError::InvalidRequest(_))
        ));
        assert!(matches!(validate("[1, 2]"), Err(RpcError::InvalidRequest(_))));
        assert!(matches!(validate(""), Err(RpcError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_config_without_call() {
        let registry = ClientRegistry::new(
            "http://127.0.0.1:9/backend",
            crate::session::SessionStore::in_memory(),
        )
        .unwrap();
        let view = ConfigView::new(Arc::new(registry));
        let err = view.set("not json").await.unwrap_err();
        assert!(matches!(err, RpcError::InvalidRequest(ref m) if m.contains("not valid JSON")));
    }
}
