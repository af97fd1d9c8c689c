//! Docuweave services
//!
//! Service layer orchestrating the document-request workflow (token issuance,
//! status transitions, notification dispatch) plus the external collaborators:
//! business-registry lookup and the generative-model assistant. All stateful
//! logic goes through the repository traits in `docuweave-db`.

pub mod ai;
pub mod business;
pub mod email;
pub mod request;
pub mod token;

pub use ai::{AssistantClient, GeminiClient};
pub use business::{BusinessLookupService, HttpRegistryClient, RegistryClient};
pub use email::{
    EmailService, EmailTransport, SendOutcome, SimulatedEmailTransport, SmtpEmailTransport,
};
pub use request::{DispatchOutcome, DocumentRequestService, EmailPreview, PreviewRecipient};
pub use token::TokenIssuer;
