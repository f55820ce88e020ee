//! Bearer-token interceptor applied to every outgoing call.

use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::trace;

use crate::session::SessionStore;

/// Metadata key carrying the session credential
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Reads the session token at call time and attaches it as
/// `authorization: Bearer <token>`.
///
/// Installed once on the shared transport, so unary and server-streaming
/// calls pass through the same code.
#[derive(Clone, Debug)]
pub struct AuthInterceptor {
    session: SessionStore,
}

impl AuthInterceptor {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Attach the credential to `request` if a token is present. Existing
    /// metadata entries are kept.
    pub fn attach<T>(&self, mut request: Request<T>) -> Result<Request<T>, Status> {
        let token = self
            .session
            .get_token()
            .map_err(|e| Status::internal(format!("credential storage unavailable: {e}")))?;

        let Some(token) = token else {
            trace!("No session token, call sent without credential");
            return Ok(request);
        };

        let value: MetadataValue<Ascii> = format!("Bearer {token}")
            .parse()
            .map_err(|_| Status::unauthenticated("stored token is not a valid header value"))?;
        request.metadata_mut().insert(AUTHORIZATION_HEADER, value);
        Ok(request)
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
        self.attach(request)
    }
}
