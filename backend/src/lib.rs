//! Skill swap marketplace backend.
//!
//! Members publish the skills they offer and want, browse each other in a
//! filtered directory, exchange swap requests and rate completed swaps.
//! Administrators see aggregate statistics.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
