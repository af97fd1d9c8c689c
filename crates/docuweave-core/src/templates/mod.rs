//! Document template catalog and substitution.
//!
//! Business-document templates (quote / contract / invoice) are fixed strings
//! with `{{PLACEHOLDER}}` markers. [`substitution::apply_data`] fills them
//! from client/project data; anything left unresolved is rewritten to a
//! bracketed `[LABEL]` so the model (or a human) can fill in the blanks.

mod catalog;
pub mod substitution;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::DocumentKind;

pub use substitution::{apply_data, ClientData, ProjectData};

/// One entry of the fixed template catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentTemplate {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    pub kind: DocumentKind,
    #[schema(value_type = String)]
    pub category: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    /// Variables the template is primarily driven by (informational).
    #[schema(value_type = Vec<String>)]
    pub variables: &'static [&'static str],
    #[serde(skip)]
    #[schema(ignore)]
    pub template: &'static str,
}

/// The full catalog, in display order.
pub fn all() -> &'static [DocumentTemplate] {
    catalog::templates()
}

/// Look a template up by its id.
pub fn by_id(id: &str) -> Option<&'static DocumentTemplate> {
    all().iter().find(|t| t.id == id)
}

/// The default template for a document kind (used when no id is given).
pub fn default_for(kind: DocumentKind) -> &'static DocumentTemplate {
    all()
        .iter()
        .find(|t| t.kind == kind && t.category == "standard")
        .unwrap_or(&all()[0])
}

/// Templates of one kind, in catalog order.
pub fn by_kind(kind: DocumentKind) -> Vec<&'static DocumentTemplate> {
    all().iter().filter(|t| t.kind == kind).collect()
}
