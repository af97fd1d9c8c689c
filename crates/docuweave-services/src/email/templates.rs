//! Built-in email templates.
//!
//! Declared variables render to the empty string when no value is supplied;
//! rendering never fails.

use std::sync::LazyLock;

use docuweave_core::models::{EmailTemplate, TemplateCategory};

static DOCUMENT_REQUEST: LazyLock<EmailTemplate> = LazyLock::new(|| {
    EmailTemplate::new(
        "문서 요청",
        "[{{companyName}}] 문서 제출 요청",
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;">
  <h2>안녕하세요, {{recipientName}}님</h2>
  <p>{{companyName}}에서 다음 문서 제출을 요청드립니다.</p>

  <div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3>프로젝트: {{projectName}}</h3>
    <p>{{message}}</p>

    <h4>요청 문서 목록:</h4>
    {{documentList}}

    <p style="margin-top: 20px;">
      <strong>제출 기한:</strong> {{dueDate}}
    </p>
  </div>

  <div style="margin: 30px 0;">
    <a href="{{uploadUrl}}"
       style="background: #3b82f6; color: white; padding: 12px 24px;
              text-decoration: none; border-radius: 6px; display: inline-block;">
      문서 업로드하기
    </a>
  </div>

  <p style="color: #666; font-size: 14px;">
    이 링크는 {{expiryDate}}까지 유효합니다.<br>
    문의사항이 있으시면 회신해주세요.
  </p>
</div>"#,
        &[
            "companyName",
            "recipientName",
            "projectName",
            "message",
            "documentList",
            "dueDate",
            "uploadUrl",
            "expiryDate",
        ],
        TemplateCategory::DocumentRequest,
    )
});

static DOCUMENT_APPROVED: LazyLock<EmailTemplate> = LazyLock::new(|| {
    EmailTemplate::new(
        "문서 승인 알림",
        "[{{companyName}}] 문서가 승인되었습니다",
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;">
  <h2>문서 승인 완료</h2>
  <p>{{recipientName}}님이 제출하신 문서가 승인되었습니다.</p>

  <div style="background: #d1fae5; padding: 15px; border-radius: 8px; margin: 20px 0;">
    <p><strong>문서명:</strong> {{documentName}}</p>
    <p><strong>프로젝트:</strong> {{projectName}}</p>
    <p><strong>승인일시:</strong> {{approvedAt}}</p>
  </div>

  <p>감사합니다.</p>
</div>"#,
        &[
            "companyName",
            "recipientName",
            "documentName",
            "projectName",
            "approvedAt",
        ],
        TemplateCategory::Notification,
    )
});

static DOCUMENT_REJECTED: LazyLock<EmailTemplate> = LazyLock::new(|| {
    EmailTemplate::new(
        "문서 반려 알림",
        "[{{companyName}}] 문서 재제출 요청",
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;">
  <h2>문서 재제출 필요</h2>
  <p>{{recipientName}}님이 제출하신 문서를 검토한 결과, 재제출이 필요합니다.</p>

  <div style="background: #fee2e2; padding: 15px; border-radius: 8px; margin: 20px 0;">
    <p><strong>문서명:</strong> {{documentName}}</p>
    <p><strong>반려 사유:</strong></p>
    <p style="margin-left: 20px;">{{rejectionReason}}</p>
  </div>

  <div style="margin: 30px 0;">
    <a href="{{uploadUrl}}"
       style="background: #ef4444; color: white; padding: 12px 24px;
              text-decoration: none; border-radius: 6px; display: inline-block;">
      문서 다시 제출하기
    </a>
  </div>
</div>"#,
        &[
            "companyName",
            "recipientName",
            "documentName",
            "rejectionReason",
            "uploadUrl",
        ],
        TemplateCategory::Notification,
    )
});

/// The document-request email sent on dispatch.
pub fn document_request() -> &'static EmailTemplate {
    &DOCUMENT_REQUEST
}

/// Sent to the recipient when a document is approved.
pub fn document_approved() -> &'static EmailTemplate {
    &DOCUMENT_APPROVED
}

/// Sent to the recipient when a document is rejected.
pub fn document_rejected() -> &'static EmailTemplate {
    &DOCUMENT_REJECTED
}
