//! The HTTP transport behind remote grids.
//!
//! A grid's `http` options section deserializes into [`HttpClientConfig`],
//! which [`HttpClient::from_config`] turns into a pooled reqwest client.
//! Pages are requested with [`HttpClient::get`] and read back through
//! [`HttpResponse`].

mod client;
mod config;
mod response;

pub use client::HttpClient;
pub use config::HttpClientConfig;
pub use response::HttpResponse;
