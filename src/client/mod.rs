//! Extraction service client.
//!
//! The extraction service turns a PLC-configuration export and a base CSV
//! into raw records. This module provides:
//! - `ExtractionService`: the trait the session drives
//! - `HttpExtractionClient`: multipart upload over HTTP
//! - `MockExtractionService`: canned responses for tests
//! - Response-contract decoding and the `ExtractionError` taxonomy

pub mod error;
pub mod http;
pub mod mock;
pub mod response;
pub mod traits;

// Re-export key types
pub use error::ExtractionError;
pub use http::HttpExtractionClient;
pub use mock::{MockConfig, MockExtractionService};
pub use response::{parse_body, parse_response};
pub use traits::{ExtractionService, HealthStatus, SourceFiles};
