//! Placeholder substitution for document templates.
//!
//! Substitution runs in fixed passes: client fields, project fields, the
//! open-ended extra map, date-derived fields, then a final catch-all that
//! rewrites any remaining `{{KEY}}` to `[KEY]`. Placeholder names across the
//! passes do not overlap, so no pass can re-match text inserted by an earlier
//! one. Pure and deterministic: the reference date is a parameter.

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

/// Counterparty fields for a business document.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ClientData {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// 사업자등록번호
    pub business_number: Option<String>,
}

/// Project fields for a business document.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    /// Total amount in KRW
    pub total_amount: Option<i64>,
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

static REMAINING_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid"));

fn replace(out: &mut String, key: &str, value: &str) {
    let marker = format!("{{{{{}}}}}", key);
    *out = out.replace(&marker, value);
}

/// Replace `{{KEY}}` with the value, or the bracketed label when the value is
/// missing or blank. Substitution is a defaulting pass, not an error path.
fn replace_or_label(out: &mut String, key: &str, value: Option<&str>, label: &str) {
    let resolved = match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("[{}]", label),
    };
    replace(out, key, &resolved);
}

/// Format a KRW amount with thousands separators, e.g. `1234567` → `1,234,567원`.
fn format_krw(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}원", sign, grouped)
}

/// Fill a template from client/project data and an extra map.
///
/// `today` drives the date-derived fields (`ISSUE_DATE`, `VALIDITY_PERIOD`).
pub fn apply_data(
    template: &str,
    client: &ClientData,
    project: &ProjectData,
    extra: &BTreeMap<String, serde_json::Value>,
    today: NaiveDate,
) -> String {
    let mut out = template.to_string();

    // Pass 1: client fields
    replace_or_label(&mut out, "CLIENT_NAME", client.name.as_deref(), "고객명");
    replace_or_label(
        &mut out,
        "CLIENT_COMPANY",
        client.company.as_deref(),
        "회사명",
    );
    replace_or_label(&mut out, "CLIENT_EMAIL", client.email.as_deref(), "이메일");
    replace_or_label(&mut out, "CLIENT_PHONE", client.phone.as_deref(), "연락처");
    replace_or_label(&mut out, "CLIENT_ADDRESS", client.address.as_deref(), "주소");
    replace_or_label(
        &mut out,
        "CLIENT_BUSINESS_NUMBER",
        client.business_number.as_deref(),
        "사업자등록번호",
    );

    // Pass 2: project fields
    replace_or_label(
        &mut out,
        "PROJECT_TITLE",
        project.title.as_deref(),
        "프로젝트명",
    );
    replace_or_label(
        &mut out,
        "PROJECT_DESCRIPTION",
        project.description.as_deref(),
        "프로젝트 설명",
    );
    replace_or_label(
        &mut out,
        "START_DATE",
        project.start_date.as_deref(),
        "시작일",
    );
    replace_or_label(&mut out, "END_DATE", project.end_date.as_deref(), "종료일");
    replace_or_label(&mut out, "DURATION", project.duration.as_deref(), "기간");
    let total = project.total_amount.map(format_krw);
    replace_or_label(&mut out, "TOTAL_AMOUNT", total.as_deref(), "총액");
    replace_or_label(
        &mut out,
        "PAYMENT_TERMS",
        project.payment_terms.as_deref(),
        "결제 조건",
    );
    if !project.deliverables.is_empty() {
        let list = project
            .deliverables
            .iter()
            .map(|d| format!("- {}", d))
            .collect::<Vec<_>>()
            .join("\n");
        replace(&mut out, "DELIVERABLES", &list);
    }

    // Pass 3: open-ended extras
    for (key, value) in extra {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => format!("[{}]", key),
            other => other.to_string(),
        };
        replace(&mut out, key, &rendered);
    }

    // Pass 4: date-derived fields
    let issue_date = format!(
        "{}. {}. {}.",
        today.format("%Y"),
        today.format("%-m"),
        today.format("%-d")
    );
    replace(&mut out, "ISSUE_DATE", &issue_date);
    replace(&mut out, "VALIDITY_PERIOD", "발행일로부터 30일");

    // Pass 5: default every remaining placeholder to its bracketed label
    REMAINING_PLACEHOLDER
        .replace_all(&out, |caps: &regex::Captures<'_>| format!("[{}]", &caps[1]))
        .into_owned()
}
