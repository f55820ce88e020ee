//! ocpanel core library.
//!
//! Session-authenticated RPC access to an OurChat server plus the route guard
//! for its admin panel:
//! - `session`: the bearer token store and its storage backends
//! - `rpc`: one shared transport, the bearer-token interceptor, typed stubs
//! - `router`: route table, navigation guard, router
//! - `views`: per-route data loading and actions
//! - `config`: on-disk configuration

pub mod config;
pub mod error;
pub mod router;
pub mod rpc;
pub mod session;
pub mod views;

pub use config::{Config, StorageBackend};
pub use error::{ConfigurationError, LoginError, NavigationError, RpcError, StorageError};
pub use router::{GuardDecision, Navigation, NavigationGuard, RouteName, Router};
pub use rpc::ClientRegistry;
pub use session::SessionStore;
pub use views::{View, ViewData};
