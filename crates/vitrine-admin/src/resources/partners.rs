use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::models::{Partner, PartnerUpdate};
use vitrine_common::validation::{not_blank, require};
use vitrine_common::{MediaResolver, VitrineResult};

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct PartnerForm {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    pub website_url: String,
    pub order: i32,
    pub is_active: bool,
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Default for PartnerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            website_url: String::new(),
            order: 0,
            is_active: true,
            image: None,
            image_preview: None,
        }
    }
}

impl Resource for Partner {
    type Form = PartnerForm;

    fn card(&self, media: &MediaResolver) -> Card {
        Card::new(self.id, &self.name)
            .detail(self.website_url.as_deref())
            .image(media.resolve(&self.image_path))
            .order(self.order)
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for Partner {
    fn to_form(&self, media: &MediaResolver) -> PartnerForm {
        PartnerForm {
            name: self.name.clone(),
            website_url: or_empty(self.website_url.as_ref()),
            order: self.order,
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve(&self.image_path)).filter(|u| !u.is_empty()),
        }
    }

    fn check_create(form: &PartnerForm) -> VitrineResult<()> {
        require(form.image.as_ref(), "Logo is required")
    }

    async fn create(api: &ApiClient, form: &PartnerForm) -> Result<Self> {
        let body = FormBody::new()
            .text("name", form.name.trim())
            .opt_text("website_url", Some(form.website_url.as_str()))
            .text("order", form.order.to_string())
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &PartnerForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = PartnerUpdate {
            name: form.name.trim().to_owned(),
            website_url: text(&form.website_url),
            order: form.order,
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
