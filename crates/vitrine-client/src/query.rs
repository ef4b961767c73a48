//! Listing filters sent as query parameters.

use serde::Serialize;
use vitrine_common::models::ProjectStatus;

/// Filters accepted by collection endpoints. Unset filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
}

impl ListQuery {
    /// Every record, active or not.
    pub fn all() -> Self {
        Self { active_only: Some(false), ..Default::default() }
    }

    pub fn active() -> Self {
        Self { active_only: Some(true), ..Default::default() }
    }

    pub fn published(published_only: bool) -> Self {
        Self { published_only: Some(published_only), ..Default::default() }
    }

    pub fn unread(unread_only: bool) -> Self {
        Self { unread_only: Some(unread_only), ..Default::default() }
    }

    pub fn with_status(mut self, status: Option<ProjectStatus>) -> Self {
        self.status_filter = status;
        self
    }
}
