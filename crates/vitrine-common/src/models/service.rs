//! Service models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, ResourceKind};
use crate::media::RawGallery;

/// Key the backend assigns when a service is created without an image.
pub const DEFAULT_SERVICE_IMAGE: &str = "services/default-placeholder.jpg";

/// A company service, optionally with a gallery and a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_path: String,
    /// Gallery keys; a JSON array, a comma-joined string or a native list.
    #[serde(default)]
    pub images: Option<RawGallery>,
    /// External embed URL or a relative local file key.
    pub video_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    pub fn has_placeholder_image(&self) -> bool {
        self.image_path == DEFAULT_SERVICE_IMAGE
    }

    pub fn has_video(&self) -> bool {
        self.video_url.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

impl Record for Service {
    const KIND: ResourceKind = ResourceKind::Services;

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

/// Metadata update. Image, gallery and video travel through their own endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceUpdate {
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let service: Service = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Surveying",
            "description": null,
            "image_path": "services/default-placeholder.jpg",
            "images": "[\"services/a.png\"]",
            "video_url": "",
            "order": 2,
            "is_active": true,
            "created_at": "2024-05-01T08:30:00",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(service.images, Some(RawGallery::Text("[\"services/a.png\"]".into())));
        assert!(service.has_placeholder_image());
        assert!(!service.has_video());
        assert!(service.created_at.is_some());
        assert!(service.updated_at.is_none());
    }

    #[test]
    fn accepts_native_gallery_list() {
        let service: Service = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Mapping",
            "image_path": "services/m.png",
            "images": ["a.png", "b.png"],
            "video_url": "https://vimeo.com/1"
        }))
        .unwrap();
        assert_eq!(service.images, Some(RawGallery::List(vec!["a.png".into(), "b.png".into()])));
        assert!(service.is_active);
        assert!(service.has_video());
    }
}
