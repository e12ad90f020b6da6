// # invdns-core
//
// Core library for the inventory DNS record client.
//
// ## Architecture Overview
//
// - **ArgSpec**: One payload field: registers CLI flags, extracts and
//   validates a payload fragment, supplies example flags
// - **RecordDescriptor / Registry**: Immutable table declaring the specs
//   of every record type and action, plus the computed `ip_type` rule
// - **Dispatcher**: Folds a payload, maps the action to an HTTP call and
//   hands it to a `Transport`
// - **Transport**: Trait for sending one request (reqwest implementation
//   lives in `invdns-http`)
//
// ## Data Flow
//
// CLI flags → `ArgMatches` → ordered extractors fold into one payload →
// `ip_type` hook → `ApiRequest` → `Transport::send` → rendered response

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod format;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use action::Action;
pub use config::{ClientConfig, OutputFormat};
pub use dispatch::{Dispatched, Dispatcher, Outcome, build_payload, record_commands};
pub use error::{Error, Result};
pub use fields::{ArgSpec, IpFamily, Payload};
pub use registry::{IpTypeRule, RecordDescriptor, Registry};
pub use traits::{ApiRequest, ApiResponse, HttpMethod, Transport};
