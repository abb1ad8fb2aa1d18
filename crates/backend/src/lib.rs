//! Monitoring-backend client: token authentication and idempotent
//! check upserts over HTTP.

pub mod client;
pub mod traits;

pub use client::{BackendSettings, HttpBackend};
pub use traits::{AuthToken, BackendClient, BackendError, Credential};
