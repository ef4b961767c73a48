use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, ListQuery, MediaSlot, Result, Upload};
use vitrine_common::models::{BlogPost, BlogPostUpdate};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

#[derive(Debug, Clone, Default, Validate)]
pub struct BlogForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub is_published: bool,
    /// Optional on create as well as edit.
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
}

impl Resource for BlogPost {
    type Form = BlogForm;

    /// Drafts included.
    fn admin_query() -> ListQuery {
        ListQuery::published(false)
    }

    fn card(&self, media: &MediaResolver) -> Card {
        let mut card = Card::new(self.id, &self.title)
            .detail(self.excerpt.as_deref())
            .image(media.resolve_opt(self.image_path.as_deref()))
            .badge(if self.is_published { "Published" } else { "Draft" });
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            card = card.badge(category);
        }
        card
    }
}

#[async_trait]
impl Editable for BlogPost {
    fn to_form(&self, media: &MediaResolver) -> BlogForm {
        BlogForm {
            title: self.title.clone(),
            excerpt: or_empty(self.excerpt.as_ref()),
            content: or_empty(self.content.as_ref()),
            author: or_empty(self.author.as_ref()),
            category: or_empty(self.category.as_ref()),
            is_published: self.is_published,
            image: None,
            image_preview: Some(media.resolve_opt(self.image_path.as_deref())).filter(|u| !u.is_empty()),
        }
    }

    async fn create(api: &ApiClient, form: &BlogForm) -> Result<Self> {
        let body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("excerpt", Some(form.excerpt.as_str()))
            .opt_text("content", Some(form.content.as_str()))
            .opt_text("author", Some(form.author.as_str()))
            .opt_text("category", Some(form.category.as_str()))
            .text("is_published", flag(form.is_published))
            .opt_file("image", form.image.clone())?;
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &BlogForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }
        let update = BlogPostUpdate {
            title: form.title.trim().to_owned(),
            excerpt: text(&form.excerpt),
            content: text(&form.content),
            author: text(&form.author),
            category: text(&form.category),
            is_published: form.is_published,
        };
        api.update(id, &update).await
    }
}
