use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::models::{License, LicenseUpdate};
use vitrine_common::validation::{not_blank, require};
use vitrine_common::{MediaResolver, VitrineResult};

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct LicenseForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub order: i32,
    pub is_active: bool,
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Default for LicenseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            order: 0,
            is_active: true,
            image: None,
            image_preview: None,
        }
    }
}

impl Resource for License {
    type Form = LicenseForm;

    fn card(&self, media: &MediaResolver) -> Card {
        Card::new(self.id, &self.title)
            .detail(self.description.as_deref())
            .image(media.resolve(&self.image_path))
            .order(self.order)
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for License {
    fn to_form(&self, media: &MediaResolver) -> LicenseForm {
        LicenseForm {
            title: self.title.clone(),
            description: or_empty(self.description.as_ref()),
            order: self.order,
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve(&self.image_path)).filter(|u| !u.is_empty()),
        }
    }

    fn check_create(form: &LicenseForm) -> VitrineResult<()> {
        require(form.image.as_ref(), "Image is required")
    }

    async fn create(api: &ApiClient, form: &LicenseForm) -> Result<Self> {
        let body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("description", Some(form.description.as_str()))
            .text("order", form.order.to_string())
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &LicenseForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = LicenseUpdate {
            title: form.title.trim().to_owned(),
            description: text(&form.description),
            order: form.order,
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
