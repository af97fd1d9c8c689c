//! API constants
//!
//! Versioned path prefix shared by routes, OpenAPI annotations, and tests.

/// API base path prefix
pub const API_PREFIX: &str = "/api/v0";

/// Public path prefix where uploaded artifacts are served from.
pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";
