//! Catalogue backend library modules.
//!
//! Hexagonal layout: [`domain`] owns entities, services, and ports;
//! [`inbound`] adapts HTTP onto the domain; [`outbound`] adapts the
//! persistence gateway ports; [`server`] assembles the pieces.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::trace::Trace;
