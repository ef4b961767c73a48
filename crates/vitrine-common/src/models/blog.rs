//! Blog post models.
//!
//! Posts have no `order` or `is_active`; visibility is `is_published`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_path: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for BlogPost {
    const KIND: ResourceKind = ResourceKind::Blog;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_published
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPostUpdate {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
}
