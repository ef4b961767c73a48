use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::models::{AboutContent, AboutContentUpdate};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct AboutForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub is_active: bool,
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Default for AboutForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            is_active: true,
            image: None,
            image_preview: None,
        }
    }
}

impl Resource for AboutContent {
    type Form = AboutForm;

    fn card(&self, media: &MediaResolver) -> Card {
        Card::new(self.id, &self.title)
            .detail(self.subtitle.as_deref().or(self.description.as_deref()))
            .image(media.resolve_opt(self.image_path.as_deref()))
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for AboutContent {
    fn to_form(&self, media: &MediaResolver) -> AboutForm {
        AboutForm {
            title: self.title.clone(),
            subtitle: or_empty(self.subtitle.as_ref()),
            description: or_empty(self.description.as_ref()),
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve_opt(self.image_path.as_deref())).filter(|u| !u.is_empty()),
        }
    }

    async fn create(api: &ApiClient, form: &AboutForm) -> Result<Self> {
        let body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("subtitle", Some(form.subtitle.as_str()))
            .opt_text("description", Some(form.description.as_str()))
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &AboutForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = AboutContentUpdate {
            title: form.title.trim().to_owned(),
            subtitle: text(&form.subtitle),
            description: text(&form.description),
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
