use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::models::{PortfolioProject, PortfolioProjectUpdate, ProjectStatus};
use vitrine_common::validation::{not_blank, require};
use vitrine_common::{MediaResolver, VitrineResult};

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Validate)]
pub struct PortfolioForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub order: i32,
    pub is_active: bool,
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Default for PortfolioForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: ProjectStatus::default(),
            order: 0,
            is_active: true,
            image: None,
            image_preview: None,
        }
    }
}

impl Resource for PortfolioProject {
    type Form = PortfolioForm;

    fn card(&self, media: &MediaResolver) -> Card {
        Card::new(self.id, &self.title)
            .detail(self.description.as_deref())
            .image(media.resolve(&self.image_path))
            .order(self.order)
            .badge(self.status.as_str())
            .active_badge(self.is_active)
    }
}

#[async_trait]
impl Editable for PortfolioProject {
    fn to_form(&self, media: &MediaResolver) -> PortfolioForm {
        PortfolioForm {
            title: self.title.clone(),
            description: or_empty(self.description.as_ref()),
            status: self.status,
            order: self.order,
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve(&self.image_path)).filter(|u| !u.is_empty()),
        }
    }

    fn check_create(form: &PortfolioForm) -> VitrineResult<()> {
        require(form.image.as_ref(), "Image is required")
    }

    async fn create(api: &ApiClient, form: &PortfolioForm) -> Result<Self> {
        let body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("description", Some(form.description.as_str()))
            .text("status", form.status.as_str())
            .text("order", form.order.to_string())
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &PortfolioForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = PortfolioProjectUpdate {
            title: form.title.trim().to_owned(),
            description: text(&form.description),
            status: form.status,
            order: form.order,
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
