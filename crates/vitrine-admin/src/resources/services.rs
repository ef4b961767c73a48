//! Services: the one resource with a multi-image gallery and a video.
//!
//! Edits go out as separate calls, each sent only when its part changed:
//! primary image, then gallery, then video, then the metadata update.

use async_trait::async_trait;
use validator::Validate;
use vitrine_client::{ApiClient, FormBody, MediaSlot, Result, Upload};
use vitrine_common::media::{decode_gallery_with_source, encode_gallery, is_absolute, GallerySource, VideoSource};
use vitrine_common::models::{Service, ServiceUpdate};
use vitrine_common::validation::not_blank;
use vitrine_common::MediaResolver;

use crate::resource::{flag, or_empty, text, Card, Editable, Resource};

/// A stored gallery image still attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub key: String,
    pub preview: String,
}

/// Video input. A file and a URL are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VideoInput {
    /// Leave whatever is stored alone.
    #[default]
    Keep,
    File(Upload),
    Url(String),
    /// The operator cleared both inputs.
    Remove,
}

#[derive(Debug, Clone, Validate)]
pub struct ServiceForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub order: i32,
    pub is_active: bool,
    pub image: Option<Upload>,
    pub image_preview: Option<String>,
    /// Stored gallery images, individually removable before submit.
    pub gallery_existing: Vec<GalleryEntry>,
    /// New gallery files, uploaded on submit and appended after the kept entries.
    pub gallery_new: Vec<Upload>,
    pub video: VideoInput,
    pub video_preview: Option<VideoSource>,
    /// Gallery keys as loaded, to detect changes on edit.
    pub loaded_gallery: Vec<String>,
    pub loaded_video: Option<String>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            order: 0,
            is_active: true,
            image: None,
            image_preview: None,
            gallery_existing: Vec::new(),
            gallery_new: Vec::new(),
            video: VideoInput::Keep,
            video_preview: None,
            loaded_gallery: Vec::new(),
            loaded_video: None,
        }
    }
}

impl ServiceForm {
    /// Choosing a file clears any URL.
    pub fn set_video_file(&mut self, upload: Upload) {
        self.video = VideoInput::File(upload);
    }

    /// Entering a URL clears any chosen file. A blank URL clears both.
    pub fn set_video_url(&mut self, url: &str) {
        let url = url.trim();
        self.video = if url.is_empty() {
            VideoInput::Remove
        } else {
            VideoInput::Url(url.to_owned())
        };
    }

    pub fn clear_video(&mut self) {
        self.video = VideoInput::Remove;
        self.video_preview = None;
    }

    pub fn add_gallery_image(&mut self, upload: Upload) {
        self.gallery_new.push(upload);
    }

    /// Drop a stored gallery image by key. Returns `false` if it was not attached.
    pub fn remove_gallery_image(&mut self, key: &str) -> bool {
        let before = self.gallery_existing.len();
        self.gallery_existing.retain(|e| e.key != key);
        self.gallery_existing.len() != before
    }

    fn kept_gallery(&self) -> Vec<String> {
        self.gallery_existing.iter().map(|e| e.key.clone()).collect()
    }

    /// The video part for an edit, or `None` when the stored video stays as is.
    fn video_change(&self) -> Result<Option<FormBody>> {
        let body = match &self.video {
            VideoInput::Keep => None,
            VideoInput::File(upload) => Some(FormBody::new().file("video_file", upload.clone())?),
            VideoInput::Url(url) if self.loaded_video.as_deref() == Some(url.as_str()) => None,
            VideoInput::Url(url) => Some(FormBody::new().text("video_url", url.clone())),
            // An empty value is the explicit removal signal.
            VideoInput::Remove if self.loaded_video.is_some() => {
                Some(FormBody::new().text("video_url", ""))
            }
            VideoInput::Remove => None,
        };
        Ok(body)
    }
}

impl Resource for Service {
    type Form = ServiceForm;

    fn card(&self, media: &MediaResolver) -> Card {
        let mut card = Card::new(self.id, &self.title)
            .detail(self.description.as_deref())
            .image(media.resolve(&self.image_path))
            .order(self.order)
            .active_badge(self.is_active);
        let (gallery, source) = decode_gallery_with_source(self.images.as_ref(), &self.image_path);
        if source != GallerySource::Primary && gallery.len() > 1 {
            card = card.badge(format!("{} images", gallery.len()));
        }
        if self.has_video() {
            card = card.badge("Video");
        }
        if self.has_placeholder_image() {
            card = card.badge("Placeholder image");
        }
        card
    }
}

#[async_trait]
impl Editable for Service {
    fn to_form(&self, media: &MediaResolver) -> ServiceForm {
        // Only an explicit gallery counts; the primary-image fallback is display-only.
        let (keys, source) = decode_gallery_with_source(self.images.as_ref(), &self.image_path);
        let loaded_gallery = if source == GallerySource::Primary { Vec::new() } else { keys };
        let loaded_video = self
            .video_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        let video = match &loaded_video {
            Some(url) if is_absolute(url) => VideoInput::Url(url.clone()),
            _ => VideoInput::Keep,
        };

        ServiceForm {
            title: self.title.clone(),
            description: or_empty(self.description.as_ref()),
            order: self.order,
            is_active: self.is_active,
            image: None,
            image_preview: Some(media.resolve(&self.image_path)).filter(|u| !u.is_empty()),
            gallery_existing: loaded_gallery
                .iter()
                .map(|key| GalleryEntry { key: key.clone(), preview: media.resolve(key) })
                .collect(),
            gallery_new: Vec::new(),
            video,
            video_preview: media.video(loaded_video.as_deref()),
            loaded_gallery,
            loaded_video,
        }
    }

    async fn create(api: &ApiClient, form: &ServiceForm) -> Result<Self> {
        let mut gallery = form.kept_gallery();
        gallery.extend(api.upload_service_images(form.gallery_new.clone()).await?);

        let mut body = FormBody::new()
            .text("title", form.title.trim())
            .opt_text("description", Some(form.description.as_str()))
            .text("order", form.order.to_string())
            .text("is_active", flag(form.is_active))
            .opt_file("image", form.image.clone())?;
        if !gallery.is_empty() {
            body = body.text("images_json", encode_gallery(&gallery));
        }
        body = match &form.video {
            VideoInput::File(upload) => body.file("video_file", upload.clone())?,
            VideoInput::Url(url) => body.opt_text("video_url", Some(url.as_str())),
            VideoInput::Keep | VideoInput::Remove => body,
        };
        api.create_multipart(body).await
    }

    async fn update(api: &ApiClient, id: i64, form: &ServiceForm) -> Result<Self> {
        if let Some(image) = form.image.clone() {
            let body = FormBody::new().file("image", image)?;
            api.update_media::<Self>(id, MediaSlot::Image, body).await?;
        }

        let mut gallery = form.kept_gallery();
        gallery.extend(api.upload_service_images(form.gallery_new.clone()).await?);
        if gallery != form.loaded_gallery {
            let body = FormBody::new().text("images_json", encode_gallery(&gallery));
            api.update_media::<Self>(id, MediaSlot::Images, body).await?;
        }

        if let Some(body) = form.video_change()? {
            api.update_media::<Self>(id, MediaSlot::Video, body).await?;
        }

        let update = ServiceUpdate {
            title: form.title.trim().to_owned(),
            description: text(&form.description),
            order: form.order,
            is_active: form.is_active,
        };
        api.update(id, &update).await
    }
}
