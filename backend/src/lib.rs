//! Gatehouse account service library.
//!
//! Hexagonal layout: [`domain`] holds the signup, login and session
//! use-cases behind port traits; [`inbound`] exposes them over HTTP and
//! [`outbound`] supplies storage and credential adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
