//! Docuweave repositories
//!
//! Repository traits for the three stores (recipients, document requests,
//! upload tokens) and their in-memory implementations. Service logic depends
//! only on the traits, never on a concrete store, so the host can swap in
//! whatever persistence it chooses.

mod memory;
mod traits;

pub use memory::{
    InMemoryDocumentRequestRepository, InMemoryRecipientRepository, InMemoryUploadTokenRepository,
};
pub use traits::{
    DocumentRequestRepository, DynDocumentRequestRepository, DynRecipientRepository,
    DynUploadTokenRepository, RecipientRepository, RequestMutation, UploadTokenRepository,
};
