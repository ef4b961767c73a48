//! Display-ready projections of the public content records.
//!
//! Every media reference is resolved here, so a renderer only ever sees
//! absolute URLs.

use serde::Serialize;
use vitrine_common::media::{decode_gallery_with_source, GallerySource, MediaResolver, VideoSource};
use vitrine_common::models::{
    AboutContent, BlogPost, CarouselSlide, ContactInfo, Faq, License, Partner, PortfolioProject,
    ProjectStatus, Service, Statistic,
};

/// Shown in place of the backend's default service image.
pub const SERVICE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/400x300?text=Service";

pub const DEFAULT_STATISTIC_ICON: &str = "flaticon-worker";

/// Length of the teaser cut from a post body when it has no excerpt.
pub const EXCERPT_CHARS: usize = 100;

/// Icon for a contact entry of the given type, used when the entry names none.
pub fn contact_icon(kind: &str) -> &'static str {
    match kind {
        "phone" | "whatsapp" => "flaticon-call",
        "email" => "flaticon-send-mail",
        "hours" => "flaticon-calendar",
        _ => "flaticon-address",
    }
}

fn present(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub button: Option<ButtonView>,
}

impl SlideView {
    pub fn new(slide: &CarouselSlide, media: &MediaResolver) -> Self {
        let button = match (present(slide.button_text.as_ref()), present(slide.button_link.as_ref())) {
            (Some(text), Some(link)) => Some(ButtonView { text, link }),
            _ => None,
        };
        Self {
            id: slide.id,
            title: slide.title.clone(),
            subtitle: present(slide.subtitle.as_ref()),
            image_url: media.resolve(&slide.image_path),
            button,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    /// Never empty while the service has an image: falls back to the main image.
    pub gallery: Vec<String>,
    pub video: Option<VideoSource>,
}

impl ServiceView {
    pub fn new(service: &Service, media: &MediaResolver) -> Self {
        let image_url = if service.has_placeholder_image() {
            SERVICE_PLACEHOLDER_URL.to_owned()
        } else {
            media.resolve(&service.image_path)
        };

        let (keys, source) = decode_gallery_with_source(service.images.as_ref(), &service.image_path);
        let gallery = match source {
            GallerySource::Primary if image_url.is_empty() => Vec::new(),
            GallerySource::Primary => vec![image_url.clone()],
            _ => keys.iter().map(|k| media.resolve(k)).collect(),
        };

        Self {
            id: service.id,
            title: service.title.clone(),
            description: present(service.description.as_ref()),
            image_url,
            gallery,
            video: media.video(service.video_url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub status: ProjectStatus,
}

impl PortfolioView {
    pub fn new(project: &PortfolioProject, media: &MediaResolver) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: present(project.description.as_ref()),
            image_url: media.resolve(&project.image_path),
            status: project.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPostView {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// `YYYY-MM-DD` of publication, or of creation for posts without one.
    pub date: Option<String>,
}

impl BlogPostView {
    pub fn new(post: &BlogPost, media: &MediaResolver) -> Self {
        let excerpt = present(post.excerpt.as_ref()).unwrap_or_else(|| {
            post.content
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(EXCERPT_CHARS)
                .collect()
        });
        let image_url = Some(media.resolve_opt(post.image_path.as_deref())).filter(|u| !u.is_empty());
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt,
            image_url,
            author: present(post.author.as_ref()),
            category: present(post.category.as_ref()),
            date: post
                .published_at
                .or(post.created_at)
                .map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutView {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl AboutView {
    pub fn new(about: &AboutContent, media: &MediaResolver) -> Self {
        Self {
            title: about.title.clone(),
            subtitle: present(about.subtitle.as_ref()),
            description: present(about.description.as_ref()),
            image_url: Some(media.resolve_opt(about.image_path.as_deref())).filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
}

impl From<&Faq> for FaqView {
    fn from(faq: &Faq) -> Self {
        Self { question: faq.question.clone(), answer: faq.answer.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticView {
    pub label: String,
    pub value: i64,
    pub icon: String,
}

impl From<&Statistic> for StatisticView {
    fn from(stat: &Statistic) -> Self {
        Self {
            label: stat.label.clone(),
            value: stat.value,
            icon: present(stat.icon.as_ref()).unwrap_or_else(|| DEFAULT_STATISTIC_ICON.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactItemView {
    pub kind: String,
    pub label: String,
    pub value: String,
    pub icon: String,
}

impl From<&ContactInfo> for ContactItemView {
    fn from(info: &ContactInfo) -> Self {
        Self {
            kind: info.kind.clone(),
            label: info.label.clone(),
            value: info.value.clone(),
            icon: present(info.icon.as_ref()).unwrap_or_else(|| contact_icon(&info.kind).to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerView {
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
}

impl PartnerView {
    pub fn new(partner: &Partner, media: &MediaResolver) -> Self {
        Self {
            name: partner.name.clone(),
            logo_url: media.resolve(&partner.image_path),
            website_url: present(partner.website_url.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseView {
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
}

impl LicenseView {
    pub fn new(license: &License, media: &MediaResolver) -> Self {
        Self {
            title: license.title.clone(),
            image_url: media.resolve(&license.image_path),
            description: present(license.description.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_common::media::RawGallery;
    use vitrine_common::models::DEFAULT_SERVICE_IMAGE;

    fn media() -> MediaResolver {
        MediaResolver::new("http://cdn.test/uploads")
    }

    fn service(image: &str, images: Option<RawGallery>, video: Option<&str>) -> Service {
        Service {
            id: 1,
            title: "Survey".into(),
            description: Some("  ".into()),
            image_path: image.into(),
            images,
            video_url: video.map(str::to_owned),
            order: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn placeholder_service_uses_external_image() {
        let view = ServiceView::new(&service(DEFAULT_SERVICE_IMAGE, None, None), &media());
        assert_eq!(view.image_url, SERVICE_PLACEHOLDER_URL);
        assert_eq!(view.gallery, [SERVICE_PLACEHOLDER_URL]);
        assert_eq!(view.description, None);
    }

    #[test]
    fn service_gallery_resolves_each_entry() {
        let raw = RawGallery::Text("[\"services/a.png\", \"https://x.test/b.png\"]".into());
        let view = ServiceView::new(&service("services/main.png", Some(raw), None), &media());
        assert_eq!(
            view.gallery,
            ["http://cdn.test/uploads/services/a.png", "https://x.test/b.png"]
        );
    }

    #[test]
    fn service_video_is_classified() {
        let local = ServiceView::new(&service("s.png", None, Some("services/videos/a.mp4")), &media());
        assert_eq!(
            local.video,
            Some(VideoSource::File { url: "http://cdn.test/uploads/services/videos/a.mp4".into() })
        );
        let external = ServiceView::new(&service("s.png", None, Some("https://youtu.be/abc")), &media());
        assert!(matches!(external.video, Some(VideoSource::Embed { .. })));
    }

    #[test]
    fn excerpt_falls_back_to_content_prefix() {
        let post = BlogPost {
            id: 1,
            title: "News".into(),
            excerpt: None,
            content: Some("é".repeat(150)),
            image_path: None,
            author: None,
            category: Some("Updates".into()),
            is_published: true,
            published_at: None,
            created_at: None,
            updated_at: None,
        };
        let view = BlogPostView::new(&post, &media());
        assert_eq!(view.excerpt.chars().count(), EXCERPT_CHARS);
        assert_eq!(view.image_url, None);
        assert_eq!(view.category.as_deref(), Some("Updates"));
    }

    #[test]
    fn icons_fall_back_by_type() {
        assert_eq!(contact_icon("whatsapp"), "flaticon-call");
        assert_eq!(contact_icon("email"), "flaticon-send-mail");
        assert_eq!(contact_icon("fax"), "flaticon-address");

        let stat = Statistic {
            id: 1,
            label: "Projects".into(),
            value: 40,
            icon: None,
            order: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(StatisticView::from(&stat).icon, DEFAULT_STATISTIC_ICON);
    }

    #[test]
    fn slide_button_needs_text_and_link() {
        let mut slide = CarouselSlide {
            id: 1,
            title: "Hello".into(),
            subtitle: None,
            image_path: "carousel/a.png".into(),
            button_text: Some("More".into()),
            button_link: None,
            order: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(SlideView::new(&slide, &media()).button, None);
        slide.button_link = Some("/about".into());
        assert_eq!(
            SlideView::new(&slide, &media()).button,
            Some(ButtonView { text: "More".into(), link: "/about".into() })
        );
    }
}
