//! Session credential management.
//!
//! This module provides:
//! - `SessionStore`: reads and writes the bearer token under the `token` key
//! - `TokenStorage`: the key/value backend, with file, keychain and in-memory
//!   implementations
//!
//! The token is opaque; absence means logged out.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, KeyringStorage, MemoryStorage, TokenStorage};
pub use store::{SessionStore, TOKEN_KEY};
