//! Core traits for the invdns client
//!
//! - [`Transport`]: Send a prepared request to the inventory API

pub mod transport;

pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
