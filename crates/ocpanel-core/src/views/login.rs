use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::info;

use crate::error::{LoginError, RpcError, StorageError};
use crate::router::RouteName;
use crate::rpc::proto::{auth_request::Account, AuthRequest, GetServerInfoRequest};
use crate::rpc::ClientRegistry;

use super::{ServerInfo, View, ViewData};

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub server: ServerInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub user_id: u64,
}

/// Login page: shows which server is being logged into and exchanges
/// credentials for a session token.
pub struct LoginView {
    registry: Arc<ClientRegistry>,
}

pub fn build(registry: Arc<ClientRegistry>) -> Box<dyn View> {
    Box::new(LoginView::new(registry))
}

/// Accounts containing `@` are emails, anything else is an OCID
pub fn account_for(account: &str) -> Account {
    if account.contains('@') {
        Account::Email(account.to_string())
    } else {
        Account::Ocid(account.to_string())
    }
}

impl LoginView {
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Exchange credentials for a token and store it.
    ///
    /// Empty fields are rejected before any call is made.
    pub async fn submit(&self, account: &str, password: &str) -> Result<LoginOutcome, LoginError> {
        let account = account.trim();
        if account.is_empty() {
            return Err(LoginError::MissingField("account"));
        }
        if password.is_empty() {
            return Err(LoginError::MissingField("password"));
        }

        let response = self
            .registry
            .auth()
            .auth(AuthRequest {
                password: password.to_string(),
                account: Some(account_for(account)),
            })
            .await?;

        self.registry.session().set_token(&response.token)?;
        info!(user_id = response.id, "Logged in");
        Ok(LoginOutcome {
            user_id: response.id,
        })
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.registry.session().clear_token()
    }
}

impl View for LoginView {
    fn route(&self) -> RouteName {
        RouteName::Login
    }

    fn load(&self) -> BoxFuture<'_, Result<ViewData, RpcError>> {
        async move {
            let response = self
                .registry
                .basic()
                .get_server_info(GetServerInfoRequest {})
                .await?;
            Ok(ViewData::Login(LoginData {
                server: ServerInfo::from(response),
            }))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    fn view() -> (LoginView, SessionStore) {
        let session = SessionStore::in_memory();
        // Nothing listens here; any call that got through would fail as Rpc
        let registry = ClientRegistry::new("http://127.0.0.1:9/backend", session.clone()).unwrap();
        (LoginView::new(Arc::new(registry)), session)
    }

    #[test]
    fn test_account_kind() {
        assert_eq!(
            account_for("admin@example.com"),
            Account::Email("admin@example.com".to_string())
        );
        assert_eq!(account_for("admin01"), Account::Ocid("admin01".to_string()));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_without_call() {
        let (view, session) = view();

        let err = view.submit("", "secret").await.unwrap_err();
        assert!(matches!(err, LoginError::MissingField("account")));

        let err = view.submit("   ", "secret").await.unwrap_err();
        assert!(matches!(err, LoginError::MissingField("account")));

        let err = view.submit("admin", "").await.unwrap_err();
        assert!(matches!(err, LoginError::MissingField("password")));

        assert_eq!(session.get_token().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let (view, session) = view();
        session.set_token("abc").unwrap();

        view.logout().unwrap();
        assert_eq!(session.get_token().unwrap(), None);
        assert_eq!(view.route(), RouteName::Login);
    }
}
