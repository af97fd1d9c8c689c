//! The fixed document-template catalog.
//!
//! Markdown bodies with `{{PLACEHOLDER}}` markers. Placeholder names are
//! unique across substitution passes; values inserted for one placeholder are
//! never re-scanned by a later pass.

use super::DocumentTemplate;
use crate::models::DocumentKind;

pub(super) fn templates() -> &'static [DocumentTemplate] {
    TEMPLATES
}

static TEMPLATES: &[DocumentTemplate] = &[
    DocumentTemplate {
        id: "standard-quote",
        name: "표준 견적서",
        kind: DocumentKind::Quote,
        category: "standard",
        description: "일반적인 프리랜서 프로젝트용 표준 견적서",
        variables: &[
            "CLIENT_NAME",
            "CLIENT_COMPANY",
            "PROJECT_TITLE",
            "START_DATE",
            "END_DATE",
            "TOTAL_AMOUNT",
            "PAYMENT_TERMS",
        ],
        template: r#"
# 견적서

## 수신
- **고객명**: {{CLIENT_NAME}}
- **회사명**: {{CLIENT_COMPANY}}
- **연락처**: {{CLIENT_PHONE}}
- **이메일**: {{CLIENT_EMAIL}}
- **주소**: {{CLIENT_ADDRESS}}

## 공급자 정보
- **공급자명**: {{SUPPLIER_NAME}}
- **사업자등록번호**: {{SUPPLIER_BUSINESS_NUMBER}}
- **연락처**: {{SUPPLIER_PHONE}}
- **이메일**: {{SUPPLIER_EMAIL}}

## 프로젝트 개요
- **프로젝트명**: {{PROJECT_TITLE}}
- **프로젝트 설명**: {{PROJECT_DESCRIPTION}}
- **작업 기간**: {{START_DATE}} ~ {{END_DATE}} ({{DURATION}})

## 견적 내역

| 항목 | 상세 내용 | 수량 | 단가 | 금액 |
|------|----------|------|------|------|
| {{ITEM_1}} | {{ITEM_1_DESC}} | {{ITEM_1_QTY}} | {{ITEM_1_PRICE}} | {{ITEM_1_TOTAL}} |
| {{ITEM_2}} | {{ITEM_2_DESC}} | {{ITEM_2_QTY}} | {{ITEM_2_PRICE}} | {{ITEM_2_TOTAL}} |
| {{ITEM_3}} | {{ITEM_3_DESC}} | {{ITEM_3_QTY}} | {{ITEM_3_PRICE}} | {{ITEM_3_TOTAL}} |

### 합계
- **공급가액**: {{SUPPLY_AMOUNT}}
- **부가세(10%)**: {{VAT_AMOUNT}}
- **총 금액**: {{TOTAL_AMOUNT}}

## 결제 조건
{{PAYMENT_TERMS}}

## 납품 사항
{{DELIVERABLES}}

## 유의 사항
1. 본 견적서의 유효기간은 발행일로부터 30일입니다.
2. 작업 범위 변경 시 추가 비용이 발생할 수 있습니다.
3. 부가세는 별도입니다.

---
**발행일**: {{ISSUE_DATE}}
**유효기간**: {{VALIDITY_PERIOD}}
"#,
    },
    DocumentTemplate {
        id: "web-dev-quote",
        name: "웹 개발 견적서",
        kind: DocumentKind::Quote,
        category: "web",
        description: "웹사이트 및 웹 애플리케이션 개발 프로젝트용",
        variables: &[
            "CLIENT_NAME",
            "PROJECT_TITLE",
            "PAGES_COUNT",
            "FEATURES",
            "TOTAL_AMOUNT",
        ],
        template: r#"
# 웹 개발 프로젝트 견적서

## 고객 정보
- **고객명**: {{CLIENT_NAME}}
- **회사명**: {{CLIENT_COMPANY}}
- **프로젝트명**: {{PROJECT_TITLE}}

## 개발 범위

### 기본 개발 사항
- **페이지 수**: {{PAGES_COUNT}}
- **반응형 디자인**: {{RESPONSIVE}}
- **CMS 구축**: {{CMS}}

### 주요 기능
{{FEATURES}}

### 기술 스택
- **프론트엔드**: {{FRONTEND_STACK}}
- **백엔드**: {{BACKEND_STACK}}
- **데이터베이스**: {{DATABASE}}

## 견적 금액
| 항목 | 내용 | 금액 |
|------|------|------|
| 기획/디자인 | UI/UX 디자인, 와이어프레임 | {{DESIGN_COST}} |
| 프론트엔드 개발 | {{PAGES_COUNT}} 페이지 구현 | {{FRONTEND_COST}} |
| 백엔드 개발 | 서버 및 API 개발 | {{BACKEND_COST}} |
| 테스트/배포 | QA 및 서버 배포 | {{DEPLOYMENT_COST}} |
| **합계** | | **{{TOTAL_AMOUNT}}** |

## 결제 조건
{{PAYMENT_TERMS}}

---
**견적 유효기간**: {{VALIDITY_PERIOD}}
"#,
    },
    DocumentTemplate {
        id: "standard-contract",
        name: "표준 용역 계약서",
        kind: DocumentKind::Contract,
        category: "standard",
        description: "프리랜서 용역 계약서 표준 양식",
        variables: &[
            "CLIENT_NAME",
            "CLIENT_COMPANY",
            "PROJECT_TITLE",
            "START_DATE",
            "END_DATE",
            "TOTAL_AMOUNT",
        ],
        template: r#"
# 용역 계약서

## 계약 당사자

### 갑 (발주자)
- **회사명**: {{CLIENT_COMPANY}}
- **대표자**: {{CLIENT_NAME}}
- **사업자등록번호**: {{CLIENT_BUSINESS_NUMBER}}
- **주소**: {{CLIENT_ADDRESS}}
- **연락처**: {{CLIENT_PHONE}}

### 을 (수급자)
- **성명/상호**: {{SUPPLIER_NAME}}
- **사업자등록번호**: {{SUPPLIER_BUSINESS_NUMBER}}
- **주소**: {{SUPPLIER_ADDRESS}}
- **연락처**: {{SUPPLIER_PHONE}}

## 계약 내용

### 제1조 (계약의 목적)
본 계약은 갑이 을에게 의뢰한 "{{PROJECT_TITLE}}" 프로젝트(이하 "본 프로젝트")의 수행에 관한 제반 사항을 규정함을 목적으로 한다.

### 제2조 (용역의 내용)
을은 다음과 같은 용역을 수행한다:
{{PROJECT_DESCRIPTION}}

### 제3조 (계약 기간)
- **계약 기간**: {{START_DATE}} ~ {{END_DATE}}
- **총 기간**: {{DURATION}}

### 제4조 (계약 금액 및 지급 방법)
1. **총 계약 금액**: {{TOTAL_AMOUNT}} (부가세 포함)
2. **지급 방법**: {{PAYMENT_TERMS}}
3. **지급 계좌**: {{BANK_ACCOUNT}}

### 제5조 (납품 및 검수)
1. 을은 계약 기간 내에 다음의 산출물을 납품한다:
{{DELIVERABLES}}
2. 갑은 납품일로부터 7일 이내에 검수를 완료하여야 한다.
3. 검수 기간 내 이의를 제기하지 않을 경우 검수가 완료된 것으로 간주한다.

### 제6조 (지적재산권)
1. 본 프로젝트로 인해 발생한 모든 지적재산권은 대금 지급 완료 시 갑에게 귀속된다.
2. 을은 본 프로젝트 수행 과정에서 제3자의 지적재산권을 침해하지 않을 것을 보증한다.

### 제7조 (비밀유지)
1. 양 당사자는 본 계약과 관련하여 취득한 상대방의 영업비밀 및 기밀정보를 제3자에게 누설하여서는 안 된다.
2. 본 조항은 계약 종료 후에도 3년간 유효하다.

### 제8조 (계약의 해지)
1. 당사자 일방이 본 계약을 위반한 경우, 상대방은 서면으로 시정을 요구할 수 있다.
2. 시정 요구 후 7일 이내에 시정되지 않을 경우 계약을 해지할 수 있다.

### 제9조 (손해배상)
당사자 일방의 귀책사유로 인해 상대방에게 손해가 발생한 경우, 귀책 당사자는 상대방의 손해를 배상하여야 한다.

### 제10조 (기타)
1. 본 계약에 명시되지 않은 사항은 상호 협의하여 결정한다.
2. 본 계약과 관련한 분쟁은 갑의 소재지 관할 법원으로 한다.

본 계약의 체결을 증명하기 위하여 계약서 2부를 작성하여 갑과 을이 서명 날인 후 각 1부씩 보관한다.

**계약 체결일**: {{CONTRACT_DATE}}

**갑**: _____________________ (인)

**을**: _____________________ (인)
"#,
    },
    DocumentTemplate {
        id: "freelance-contract",
        name: "프리랜서 용역 계약서",
        kind: DocumentKind::Contract,
        category: "freelance",
        description: "일반 프리랜서 업무용 표준 계약서",
        variables: &[
            "CLIENT_NAME",
            "CLIENT_COMPANY",
            "PROJECT_TITLE",
            "START_DATE",
            "END_DATE",
            "TOTAL_AMOUNT",
        ],
        template: r#"
# 프리랜서 용역 계약서

## 계약 당사자

**위탁자** (이하 "갑")
- 회사명: {{CLIENT_COMPANY}}
- 대표자: {{CLIENT_NAME}}
- 사업자등록번호: {{CLIENT_BUSINESS_NUMBER}}
- 주소: {{CLIENT_ADDRESS}}

**수탁자** (이하 "을")
- 성명: {{SUPPLIER_NAME}}
- 주민등록번호/사업자등록번호: {{SUPPLIER_BUSINESS_NUMBER}}
- 주소: {{SUPPLIER_ADDRESS}}
- 연락처: {{SUPPLIER_PHONE}}

## 제1조 (목적)
본 계약은 "갑"이 "을"에게 위탁하는 업무의 내용과 그에 따른 권리, 의무 및 책임사항을 명확히 하는 것을 목적으로 한다.

## 제2조 (업무 내용)
1. **프로젝트명**: {{PROJECT_TITLE}}
2. **업무 범위**: {{PROJECT_DESCRIPTION}}
3. **산출물**: {{DELIVERABLES}}

## 제3조 (계약 기간)
- **계약 기간**: {{START_DATE}} ~ {{END_DATE}}
- **총 기간**: {{DURATION}}

## 제4조 (용역 대금)
1. **총 금액**: {{TOTAL_AMOUNT}} (부가세 포함)
2. **지급 방법**: {{PAYMENT_TERMS}}
3. **정산 방법**: 세금계산서 또는 계산서 발행 후 7일 이내

## 제5조 (권리 귀속)
1. 본 계약에 따라 "을"이 작성한 모든 결과물의 지적재산권은 대금 지급 완료 시 "갑"에게 귀속된다.
2. "을"은 "갑"의 사전 동의 없이 결과물을 제3자에게 제공하거나 다른 용도로 사용할 수 없다.

## 제6조 (비밀유지)
1. "을"은 업무 수행 과정에서 알게 된 "갑"의 영업비밀을 제3자에게 누설하지 않는다.
2. 이 의무는 계약 종료 후에도 {{CONFIDENTIALITY_PERIOD}}간 유효하다.

## 제7조 (계약 해지)
다음의 경우 즉시 계약을 해지할 수 있다:
1. 일방이 본 계약을 위반하고 시정 요구 후 7일 이내 시정하지 않는 경우
2. "을"이 업무를 계속 수행할 수 없는 부득이한 사유가 발생한 경우

## 제8조 (기타)
1. 본 계약에 명시되지 않은 사항은 민법 및 상법의 규정에 따른다.
2. 본 계약과 관련한 분쟁은 상호 협의하여 해결하고, 협의가 이루어지지 않을 경우 "갑" 소재지 관할 법원에서 해결한다.

**계약 체결일**: {{CONTRACT_DATE}}

**갑**: _____________________ (인)

**을**: _____________________ (인)
"#,
    },
    DocumentTemplate {
        id: "standard-invoice",
        name: "표준 세금계산서/청구서",
        kind: DocumentKind::Invoice,
        category: "standard",
        description: "프리랜서 세금계산서/청구서 표준 양식",
        variables: &[
            "CLIENT_NAME",
            "CLIENT_COMPANY",
            "INVOICE_NUMBER",
            "INVOICE_DATE",
            "TOTAL_AMOUNT",
        ],
        template: r#"
# 세금계산서

## 문서 정보
- **계산서 번호**: {{INVOICE_NUMBER}}
- **발행일**: {{INVOICE_DATE}}
- **공급일자**: {{SUPPLY_DATE}}

## 공급자 (매도자)
| 항목 | 내용 |
|------|------|
| 사업자등록번호 | {{SUPPLIER_BUSINESS_NUMBER}} |
| 상호 | {{SUPPLIER_NAME}} |
| 주소 | {{SUPPLIER_ADDRESS}} |
| 연락처 | {{SUPPLIER_PHONE}} |
| 이메일 | {{SUPPLIER_EMAIL}} |

## 공급받는자 (매수자)
| 항목 | 내용 |
|------|------|
| 사업자등록번호 | {{CLIENT_BUSINESS_NUMBER}} |
| 상호 | {{CLIENT_COMPANY}} |
| 대표자 | {{CLIENT_NAME}} |
| 주소 | {{CLIENT_ADDRESS}} |

## 공급 내역

| 품목 | 규격 | 수량 | 단가 | 공급가액 | 세액 |
|------|------|------|------|----------|------|
| {{ITEM_1}} | {{ITEM_1_SPEC}} | {{ITEM_1_QTY}} | {{ITEM_1_PRICE}} | {{ITEM_1_AMOUNT}} | {{ITEM_1_TAX}} |
| {{ITEM_2}} | {{ITEM_2_SPEC}} | {{ITEM_2_QTY}} | {{ITEM_2_PRICE}} | {{ITEM_2_AMOUNT}} | {{ITEM_2_TAX}} |

## 합계 금액

| 구분 | 금액 |
|------|------|
| 공급가액 | {{SUPPLY_AMOUNT}} |
| 세액 | {{TAX_AMOUNT}} |
| **총 합계** | **{{TOTAL_AMOUNT}}** |

## 결제 정보
- **결제 조건**: {{PAYMENT_TERMS}}
- **결제 기한**: {{PAYMENT_DUE_DATE}}
- **입금 계좌**: {{BANK_ACCOUNT}}

## 비고
{{NOTES}}

---

위 금액을 청구합니다.

**발행일**: {{INVOICE_DATE}}

**공급자**: {{SUPPLIER_NAME}} (인)
"#,
    },
];
