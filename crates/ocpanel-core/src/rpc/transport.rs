//! The single shared gRPC transport.
//!
//! One lazily-connected `Channel` wrapped in the auth interceptor. Every
//! client stub holds an `Arc` to the same `Transport`.

use std::fmt;

use tonic::client::Grpc;
use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::http::Uri;
use tonic::codegen::InterceptedService;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{IntoRequest, Status};
use tracing::{debug, info};

use crate::error::{ConfigurationError, RpcError};

use super::interceptor::AuthInterceptor;

/// Channel with the bearer-token interceptor installed
pub type AuthChannel = InterceptedService<Channel, AuthInterceptor>;

/// Origin and path prefix split out of a base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BaseAddress {
    pub origin: String,
    pub prefix: String,
    /// `https` addresses are only ever dialed over TLS
    pub tls: bool,
}

impl BaseAddress {
    /// Parse `scheme://authority[/prefix]`. A trailing `/` on the prefix is dropped.
    pub(crate) fn parse(address: &str) -> Result<Self, ConfigurationError> {
        let malformed = |reason: &str| ConfigurationError::MalformedAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = address.trim().parse().map_err(|e| malformed(&format!("{e}")))?;

        let authority = uri
            .authority()
            .ok_or_else(|| ConfigurationError::MissingAuthority(address.to_string()))?;
        let scheme = match uri.scheme_str() {
            Some(scheme @ ("http" | "https")) => scheme,
            _ => return Err(ConfigurationError::UnsupportedScheme(address.to_string())),
        };
        if uri.query().is_some() {
            return Err(malformed("query strings are not allowed"));
        }

        let prefix = uri.path().trim_end_matches('/').to_string();
        PathAndQuery::try_from(format!("{prefix}/")).map_err(|e| malformed(&format!("{e}")))?;

        Ok(Self {
            origin: format!("{scheme}://{authority}"),
            prefix,
            tls: scheme == "https",
        })
    }
}

pub struct Transport {
    base_address: String,
    prefix: String,
    channel: AuthChannel,
}

impl Transport {
    /// Build the transport. The connection itself is opened on first use,
    /// but this must run inside a tokio runtime.
    pub fn new(base_address: &str, interceptor: AuthInterceptor) -> Result<Self, ConfigurationError> {
        let BaseAddress {
            origin,
            prefix,
            tls,
        } = BaseAddress::parse(base_address)?;

        let mut endpoint = Endpoint::from_shared(origin.clone())?;
        if tls {
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
        }
        let channel = InterceptedService::new(endpoint.connect_lazy(), interceptor);

        info!(%origin, %prefix, tls, "RPC transport configured");
        Ok(Self {
            base_address: base_address.trim().to_string(),
            prefix,
            channel,
        })
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn path_prefix(&self) -> &str {
        &self.prefix
    }

    /// Full request path for `service`/`method`, including the prefix
    pub fn method_path(&self, service: &str, method: &str) -> Result<PathAndQuery, Status> {
        PathAndQuery::try_from(format!("{}/{}/{}", self.prefix, service, method))
            .map_err(|e| Status::internal(format!("invalid method path: {e}")))
    }

    async fn ready(&self) -> Result<Grpc<AuthChannel>, Status> {
        let mut grpc = Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))?;
        Ok(grpc)
    }

    pub async fn unary<Req, Resp>(
        &self,
        service: &str,
        method: &str,
        request: impl IntoRequest<Req>,
    ) -> Result<Resp, RpcError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let path = self.method_path(service, method)?;
        debug!(%path, "Unary call");
        let mut grpc = self.ready().await?;
        let response = grpc
            .unary(request.into_request(), path, ProstCodec::default())
            .await?;
        Ok(response.into_inner())
    }

    pub async fn server_streaming<Req, Resp>(
        &self,
        service: &str,
        method: &str,
        request: impl IntoRequest<Req>,
    ) -> Result<Streaming<Resp>, RpcError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let path = self.method_path(service, method)?;
        debug!(%path, "Server-streaming call");
        let mut grpc = self.ready().await?;
        let response = grpc
            .server_streaming(request.into_request(), path, ProstCodec::default())
            .await?;
        Ok(response.into_inner())
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_address", &self.base_address)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
