use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    DocumentRequest,
    Notification,
    Reminder,
    Custom,
}

/// A named, versioned email template with `{{var}}` placeholders.
///
/// The declared `variables` list is used only for rendering, never for
/// enforcement: a declared variable with no supplied value renders as the
/// empty string. Rendering never fails.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailTemplate {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub content: String,
    pub variables: Vec<String>,
    pub category: TemplateCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplate {
    pub fn new(
        name: &str,
        subject: &str,
        content: &str,
        variables: &[&str],
        category: TemplateCategory,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Render the body, substituting every declared variable.
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        Self::substitute(&self.content, &self.variables, values)
    }

    /// Render the subject line with the same substitution rules.
    pub fn render_subject(&self, values: &HashMap<String, String>) -> String {
        Self::substitute(&self.subject, &self.variables, values)
    }

    fn substitute(
        text: &str,
        variables: &[String],
        values: &HashMap<String, String>,
    ) -> String {
        let mut out = text.to_string();
        for name in variables {
            let marker = format!("{{{{{}}}}}", name);
            let value = values.get(name).map(String::as_str).unwrap_or("");
            out = out.replace(&marker, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> EmailTemplate {
        EmailTemplate::new(
            "문서 요청",
            "[{{companyName}}] 문서 제출 요청",
            "<p>안녕하세요, {{recipientName}}님. {{message}}</p>",
            &["companyName", "recipientName", "message"],
            TemplateCategory::DocumentRequest,
        )
    }

    #[test]
    fn test_render_substitutes_supplied_variables() {
        let mut values = HashMap::new();
        values.insert("recipientName".to_string(), "홍길동".to_string());
        values.insert("message".to_string(), "서류를 부탁드립니다.".to_string());
        let body = template().render(&values);
        assert!(body.contains("홍길동"));
        assert!(!body.contains("{{recipientName}}"));
    }

    #[test]
    fn test_missing_variables_render_as_empty_string() {
        let body = template().render(&HashMap::new());
        assert!(!body.contains("{{"));
        assert!(body.contains("안녕하세요, 님."));
    }

    #[test]
    fn test_render_subject() {
        let mut values = HashMap::new();
        values.insert("companyName".to_string(), "길동상사".to_string());
        assert_eq!(
            template().render_subject(&values),
            "[길동상사] 문서 제출 요청"
        );
    }
}
