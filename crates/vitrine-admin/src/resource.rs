//! Per-type behaviour plugged into the generic controller.

use std::fmt;

use async_trait::async_trait;
use vitrine_client::{ApiClient, ListQuery, Result};
use vitrine_common::models::Record;
use vitrine_common::{MediaResolver, VitrineResult};

/// Summary card for one record in a section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub detail: Option<String>,
    pub image_url: Option<String>,
    pub badges: Vec<String>,
    pub order: Option<i32>,
}

impl Card {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            detail: None,
            image_url: None,
            badges: Vec::new(),
            order: None,
        }
    }

    pub fn detail(mut self, detail: Option<&str>) -> Self {
        self.detail = detail
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| truncate(d, 120));
        self
    }

    pub fn image(mut self, url: String) -> Self {
        self.image_url = Some(url).filter(|u| !u.is_empty());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badges.push(badge.into());
        self
    }

    pub fn active_badge(self, active: bool) -> Self {
        self.badge(if active { "Active" } else { "Inactive" })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)?;
        if let Some(order) = self.order {
            write!(f, " (order {order})")?;
        }
        if !self.badges.is_empty() {
            write!(f, " [{}]", self.badges.join(", "))?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "\n    {detail}")?;
        }
        if let Some(url) = &self.image_url {
            write!(f, "\n    {url}")?;
        }
        Ok(())
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Form type for collections the admin can only list, mark and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoForm {}

/// A content type the admin panel can list and delete.
pub trait Resource: Record {
    /// Editable field set; [`NoForm`] when records cannot be created or edited.
    type Form: Clone + fmt::Debug + Send + Sync + 'static;

    /// Filters for the admin listing. Defaults to every record.
    fn admin_query() -> ListQuery {
        ListQuery::all()
    }

    fn card(&self, media: &MediaResolver) -> Card;
}

/// A content type the admin panel can also create and edit.
///
/// Its [`Resource::Form`] must also be `Validate + Default` for the controller to
/// open and submit it.
#[async_trait]
pub trait Editable: Resource {
    /// Pre-fill the edit form, resolving media to previewable URLs.
    fn to_form(&self, media: &MediaResolver) -> Self::Form;

    /// Checks that only apply on create, such as a required image.
    fn check_create(_form: &Self::Form) -> VitrineResult<()> {
        Ok(())
    }

    /// One create call carrying metadata and any attached files.
    async fn create(api: &ApiClient, form: &Self::Form) -> Result<Self>;

    /// The minimum set of update calls for an edit.
    async fn update(api: &ApiClient, id: i64, form: &Self::Form) -> Result<Self>;
}

// ── Shared form helpers ───────────────────────────────────────────────────────

pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Trimmed text, kept even when blank so an edit can clear a field.
pub(crate) fn text(value: &str) -> Option<String> {
    Some(value.trim().to_owned())
}

/// Trimmed text, `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

pub(crate) fn or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_display() {
        let card = Card::new(3, "Hero")
            .order(2)
            .active_badge(false)
            .detail(Some("  subtitle  "))
            .image(String::new());
        assert_eq!(card.to_string(), "#3 Hero (order 2) [Inactive]\n    subtitle");
        assert_eq!(card.image_url, None);
    }

    #[test]
    fn long_detail_is_shortened() {
        let long = "x".repeat(200);
        let card = Card::new(1, "t").detail(Some(&long));
        assert_eq!(card.detail.unwrap().chars().count(), 121);
    }

    #[test]
    fn helpers() {
        assert_eq!(flag(true), "true");
        assert_eq!(text("  a "), Some("a".to_owned()));
        assert_eq!(text("   "), Some(String::new()));
        assert_eq!(non_blank("   "), None);
        assert_eq!(or_empty(None), "");
    }
}
