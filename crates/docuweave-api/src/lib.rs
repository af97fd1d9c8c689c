//! Docuweave HTTP API
//!
//! Thin axum boundary over the service layer: request parsing, validation,
//! and response shaping. Exported as a library so integration tests can build
//! the router in-process.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod validation;
