//! Authenticated RPC plumbing.
//!
//! One `Transport` (lazy tonic channel plus `AuthInterceptor`) is built per
//! `ClientRegistry`, and the four typed stubs share it.

pub mod clients;
pub mod interceptor;
pub mod proto;
pub mod registry;
pub mod transport;

pub use clients::{AuthClient, BasicClient, CoreClient, ServerManageClient};
pub use interceptor::{AuthInterceptor, AUTHORIZATION_HEADER};
pub use registry::{ClientRegistry, SERVICES};
pub use transport::{AuthChannel, Transport};
