//! About-page content models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutContent {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for AboutContent {
    const KIND: ResourceKind = ResourceKind::About;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutContentUpdate {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}
