//! FAQ models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Faq {
    const KIND: ResourceKind = ResourceKind::Faqs;

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

/// Create and update share one JSON body.
#[derive(Debug, Clone, Serialize)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
    pub order: i32,
    pub is_active: bool,
}
