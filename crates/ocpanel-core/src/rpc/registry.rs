use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::error::ConfigurationError;
use crate::session::SessionStore;

use super::clients::{AuthClient, BasicClient, CoreClient, ServerManageClient};
use super::interceptor::AuthInterceptor;
use super::transport::Transport;

/// Names of the services the registry exposes, in accessor order
pub const SERVICES: [&str; 4] = [
    CoreClient::SERVICE,
    BasicClient::SERVICE,
    ServerManageClient::SERVICE,
    AuthClient::SERVICE,
];

static SHARED: OnceLock<Arc<ClientRegistry>> = OnceLock::new();

/// Owns the shared transport and the four client stubs built over it.
///
/// Built once at startup and shared behind an `Arc`. Nothing here is rebuilt
/// when the credential changes; the interceptor reads the session on each call.
#[derive(Debug)]
pub struct ClientRegistry {
    session: SessionStore,
    transport: Arc<Transport>,
    core: CoreClient,
    basic: BasicClient,
    server_manage: ServerManageClient,
    auth: AuthClient,
}

impl ClientRegistry {
    /// Must be called inside a tokio runtime. A malformed `base_address`
    /// fails here and is not retried.
    pub fn new(base_address: &str, session: SessionStore) -> Result<Self, ConfigurationError> {
        let interceptor = AuthInterceptor::new(session.clone());
        let transport = Arc::new(Transport::new(base_address, interceptor)?);

        info!(services = SERVICES.len(), "Client registry initialized");
        Ok(Self {
            session,
            core: CoreClient::new(Arc::clone(&transport)),
            basic: BasicClient::new(Arc::clone(&transport)),
            server_manage: ServerManageClient::new(Arc::clone(&transport)),
            auth: AuthClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// The process-wide registry. The first successful call builds it; later
    /// calls return the same instance and ignore their arguments.
    pub fn shared(
        base_address: &str,
        session: SessionStore,
    ) -> Result<Arc<Self>, ConfigurationError> {
        if let Some(existing) = SHARED.get() {
            if existing.transport.base_address() != base_address.trim() {
                warn!(
                    requested = base_address,
                    active = existing.transport.base_address(),
                    "Client registry already initialized; keeping the active address"
                );
            }
            return Ok(Arc::clone(existing));
        }

        let registry = Arc::new(Self::new(base_address, session)?);
        // A racing caller may have won; its registry is the one kept
        Ok(Arc::clone(SHARED.get_or_init(|| registry)))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn core(&self) -> &CoreClient {
        &self.core
    }

    pub fn basic(&self) -> &BasicClient {
        &self.basic
    }

    pub fn server_manage(&self) -> &ServerManageClient {
        &self.server_manage
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }
}
