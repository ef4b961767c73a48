use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::models::{CarouselSlide, CarouselSlideUpdate};
use vitrine_common::validation::{not_blank, require};
use vitrine_common::{MediaResolver, VitrineResult};

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct CarouselForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub order: i32,
    pub is_active: bool,
    /// A newly chosen image. `None` on edit keeps the stored one.
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Default for CarouselForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            button_text: String::new(),
            button_link: String::new(),
            order: 0,
            is_active: true,
            image: None,
            image_preview: None,
        }
    }
}

impl Resource for CarouselSlide {
    type Form = CarouselForm;

    fn card(&self, media: &MediaResolver) -> Card {
        Card::new(self.id, &self.title)
            .detail(self.subtitle.as_deref())
            .image(media.resolve(&self.image_path))
            .order(self.order)
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for CarouselSlide {
    fn to_form(&self, media: &MediaResolver) -> CarouselForm {
        CarouselForm {
            title: self.title.clone(),
            subtitle: or_empty(self.subtitle.as_ref()),
            button_text: or_empty(self.button_text.as_ref()),
            button_link: or_empty(self.button_link.as_ref()),
            order: self.order,
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve(&self.image_path)).filter(|u| !u.is_empty()),
        }
    }

    fn check_create(form: &CarouselForm) -> VitrineResult<()> {
        require(form.image.as_ref(), "Image is required")
    }

    async fn create(api: &ApiClient, form: &CarouselForm) -> Result<Self> {
        let body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("subtitle", Some(form.subtitle.as_str()))
            .opt_text("button_text", Some(form.button_text.as_str()))
            .opt_text("button_link", Some(form.button_link.as_str()))
            .text("order", form.order.to_string())
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &CarouselForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = CarouselSlideUpdate {
            title: form.title.trim().to_owned(),
            subtitle: text(&form.subtitle),
            button_text: text(&form.button_text),
            button_link: text(&form.button_link),
            order: form.order,
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
