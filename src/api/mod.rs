//! HTTP access to the client records backend with consistent timeouts and error
//! handling. Feature modules implement their remote traits on top of
//! [`ApiClient`] so request setup, auth headers and error mapping live in one
//! place.

mod client;
pub mod config;
mod error;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
