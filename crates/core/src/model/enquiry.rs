use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DeleteStatus, DisplayStatus};

/// An inbound enquiry. Repeat submissions matching an existing active
/// record by email (or, failing that, mobile) merge into it instead of
/// creating a new row: `count` grows, attribution fields are overwritten,
/// `created_at` keeps the first contact time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Enquiry {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    /// Free-form enquiry type chosen by the site form.
    pub kind: Option<String>,
    pub message: Option<String>,
    /// Plain foreign identifiers, not validated against the hierarchy.
    pub category_id: Option<i64>,
    pub service_id: Option<i64>,
    pub ip_address: Option<String>,
    pub url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub count: i64,
    pub display_status: DisplayStatus,
    pub delete_status: DeleteStatus,
    /// First contact time; never updated on merge.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub category_id: Option<i64>,
    pub service_id: Option<i64>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

/// Request attribution passed through from the transport layer unvalidated.
#[derive(Debug, Clone, Default)]
pub struct RequestOrigin {
    pub ip_address: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryView {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub category_id: Option<i64>,
    pub service_id: Option<i64>,
    pub ip_address: Option<String>,
    pub url: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub count: i64,
    pub display_status: DisplayStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Enquiry> for EnquiryView {
    fn from(e: Enquiry) -> Self {
        EnquiryView {
            id: e.id,
            public_id: e.public_id,
            name: e.name,
            email: e.email,
            mobile: e.mobile,
            city: e.city,
            kind: e.kind,
            message: e.message,
            category_id: e.category_id,
            service_id: e.service_id,
            ip_address: e.ip_address,
            url: e.url,
            utm_source: e.utm_source,
            utm_medium: e.utm_medium,
            utm_campaign: e.utm_campaign,
            utm_term: e.utm_term,
            utm_content: e.utm_content,
            count: e.count,
            display_status: e.display_status,
            created_at: e.created_at,
        }
    }
}
