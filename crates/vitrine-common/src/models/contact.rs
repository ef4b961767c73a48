//! Contact details and visitor submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

/// One contact channel shown on the site (phone, email, address, hours, whatsapp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for ContactInfo {
    const KIND: ResourceKind = ResourceKind::ContactInfo;

    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactInfoPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub value: String,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

/// A message left through the public contact form.
///
/// `is_read` moves from false to true once, through an explicit action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ContactSubmission {
    const KIND: ResourceKind = ResourceKind::ContactSubmissions;

    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /api/contact/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}
