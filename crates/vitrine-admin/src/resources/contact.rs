//! Contact details (editable) and visitor submissions (read, mark, delete).

use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, ListQuery, Result};
use vitrine_common::models::{ContactInfo, ContactInfoPayload, ContactSubmission};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{non_blank, or_empty, Card, Editable, NoForm, Resource};

/// Channel types the site knows how to render.
pub const CONTACT_TYPES: [&str; 5] = ["phone", "email", "address", "hours", "whatsapp"];

#[derive(Debug, Clone, Validate)]
pub struct ContactInfoForm {
    #[validate(custom(function = "not_blank", message = "Type is required"))]
    pub kind: String,
    #[validate(custom(function = "not_blank", message = "Label is required"))]
    pub label: String,
    #[validate(custom(function = "not_blank", message = "Value is required"))]
    pub value: String,
    pub icon: String,
    pub order: i32,
    pub is_active: bool,
}

impl Default for ContactInfoForm {
    fn default() -> Self {
        Self {
            kind: CONTACT_TYPES[0].to_owned(),
            label: String::new(),
            value: String::new(),
            icon: String::new(),
            order: 0,
            is_active: true,
        }
    }
}

impl ContactInfoForm {
    fn payload(&self) -> ContactInfoPayload {
        ContactInfoPayload {
            kind: self.kind.trim().to_owned(),
            label: self.label.trim().to_owned(),
            value: self.value.trim().to_owned(),
            icon: non_blank(&self.icon),
            order: self.order,
            is_active: self.is_active,
        }
    }
}

impl Resource for ContactInfo {
    type Form = ContactInfoForm;

    fn card(&self, _media: &MediaResolver) -> Card {
        Card::new(self.id, &self.label)
            .detail(Some(self.value.as_str()))
            .order(self.order)
            .badge(self.kind.clone())
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for ContactInfo {
    fn to_form(&self, _media: &MediaResolver) -> ContactInfoForm {
        ContactInfoForm {
            kind: self.kind.clone(),
            label: self.label.clone(),
            value: self.value.clone(),
            icon: or_empty(self.icon.as_ref()),
            order: self.order,
            is_active: self.is_active,
        }
    }

    async fn create(api: &ApiClient, form: &ContactInfoForm) -> Result<Self> {
        api.create_json(&form.payload()).await
    }

    async fn update(api: &ApiClient, id: i64, form: &ContactInfoForm) -> Result<Self> {
        api.update(id, &form.payload()).await
    }
}

impl Resource for ContactSubmission {
    type Form = NoForm;

    /// Read and unread alike.
    fn admin_query() -> ListQuery {
        ListQuery::unread(false)
    }

    fn card(&self, _media: &MediaResolver) -> Card {
        let title = match self.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(subject) => format!("{} <{}>: {subject}", self.name, self.email),
            None => format!("{} <{}>", self.name, self.email),
        };
        let mut card = Card::new(self.id, title).detail(Some(self.message.as_str()));
        if !self.is_read {
            card = card.badge("Unread");
        }
        if let Some(at) = self.created_at {
            card = card.badge(at.format("%Y-%m-%d %H:%M").to_string());
        }
        card
    }
}
