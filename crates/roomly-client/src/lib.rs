//! HTTP client for the Roomly marketplace API.

pub mod http;

pub use crate::http::ApiClient;
