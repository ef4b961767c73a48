//! Page loaders for the public website.
//!
//! Loaders never fail. An unreachable backend produces empty sections, which the
//! renderer treats as "keep the static fallback content".

use serde::Serialize;
use vitrine_client::PublicClient;
use vitrine_common::models::ProjectStatus;

use crate::views::{
    AboutView, BlogPostView, ContactItemView, FaqView, LicenseView, PartnerView, PortfolioView,
    ServiceView, SlideView, StatisticView,
};

/// Blog posts shown on the home page.
pub const HOME_POSTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub slides: Vec<SlideView>,
    pub services: Vec<ServiceView>,
    pub posts: Vec<BlogPostView>,
    pub statistics: Vec<StatisticView>,
    pub about: Option<AboutView>,
    pub faqs: Vec<FaqView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AboutPage {
    pub about: Option<AboutView>,
    pub statistics: Vec<StatisticView>,
    pub partners: Vec<PartnerView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioPage {
    pub filter: Option<ProjectStatus>,
    pub projects: Vec<PortfolioView>,
}

#[derive(Clone)]
pub struct Site {
    client: PublicClient,
}

impl Site {
    pub fn new(client: PublicClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PublicClient {
        &self.client
    }

    /// All home-page sections, fetched concurrently.
    pub async fn home(&self) -> HomePage {
        let c = &self.client;
        let (slides, services, posts, statistics, about, faqs) = tokio::join!(
            c.carousel_slides(),
            c.services(),
            c.blog_posts(),
            c.statistics(),
            c.about(),
            c.faqs(),
        );
        let media = c.media();
        HomePage {
            slides: slides.iter().map(|s| SlideView::new(s, media)).collect(),
            services: services.iter().map(|s| ServiceView::new(s, media)).collect(),
            posts: posts.iter().take(HOME_POSTS).map(|p| BlogPostView::new(p, media)).collect(),
            statistics: statistics.iter().map(StatisticView::from).collect(),
            about: about.as_ref().map(|a| AboutView::new(a, media)),
            faqs: faqs.iter().map(FaqView::from).collect(),
        }
    }

    pub async fn services(&self) -> Vec<ServiceView> {
        let media = self.client.media();
        self.client.services().await.iter().map(|s| ServiceView::new(s, media)).collect()
    }

    /// One service by id, looked up among the active ones.
    pub async fn service(&self, id: i64) -> Option<ServiceView> {
        self.services().await.into_iter().find(|s| s.id == id)
    }

    pub async fn portfolio(&self, filter: Option<ProjectStatus>) -> PortfolioPage {
        let media = self.client.media();
        let projects = self.client.portfolio_projects(filter).await;
        PortfolioPage {
            filter,
            projects: projects.iter().map(|p| PortfolioView::new(p, media)).collect(),
        }
    }

    pub async fn blog(&self) -> Vec<BlogPostView> {
        let media = self.client.media();
        self.client.blog_posts().await.iter().map(|p| BlogPostView::new(p, media)).collect()
    }

    pub async fn about(&self) -> AboutPage {
        let c = &self.client;
        let (about, statistics, partners) = tokio::join!(c.about(), c.statistics(), c.partners());
        let media = c.media();
        AboutPage {
            about: about.as_ref().map(|a| AboutView::new(a, media)),
            statistics: statistics.iter().map(StatisticView::from).collect(),
            partners: partners.iter().map(|p| PartnerView::new(p, media)).collect(),
        }
    }

    pub async fn faqs(&self) -> Vec<FaqView> {
        self.client.faqs().await.iter().map(FaqView::from).collect()
    }

    pub async fn contact(&self) -> Vec<ContactItemView> {
        self.client.contact_info().await.iter().map(ContactItemView::from).collect()
    }

    pub async fn licenses(&self) -> Vec<LicenseView> {
        let media = self.client.media();
        self.client.licenses().await.iter().map(|l| LicenseView::new(l, media)).collect()
    }
}
