//! Carousel slide models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};

/// A hero-carousel slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_path: String,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for CarouselSlide {
    const KIND: ResourceKind = ResourceKind::Carousel;

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

/// Metadata update. Never carries `image_path`; the image has its own endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CarouselSlideUpdate {
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub order: i32,
    pub is_active: bool,
}
