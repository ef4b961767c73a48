//! License and certificate scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: i64,
    pub title: String,
    pub image_path: String,
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for License {
    const KIND: ResourceKind = ResourceKind::Licenses;

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
pub struct LicenseUpdate {
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub is_active: bool,
}
