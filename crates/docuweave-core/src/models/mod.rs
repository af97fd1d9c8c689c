//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod assistant;
mod business;
mod document_request;
mod email_template;
mod recipient;
mod upload_token;

// Re-export all models for convenient imports
pub use assistant::*;
pub use business::*;
pub use document_request::*;
pub use email_template::*;
pub use recipient::*;
pub use upload_token::*;
