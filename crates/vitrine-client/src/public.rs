//! Unauthenticated client for the public website.
//!
//! Listings never fail: any transport or decode problem is logged and an empty
//! collection is returned, so an anonymous visitor never sees a raw error.
//! Mutations (the contact form) do propagate their failure.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use vitrine_common::config::ApiConfig;
use vitrine_common::media::MediaResolver;
use vitrine_common::models::{
    AboutContent, BlogPost, CarouselSlide, ContactInfo, ContactRequest, ContactSubmission, Faq,
    License, Partner, PortfolioProject, ProjectStatus, Record, Service, Statistic,
};

use crate::error::{ClientError, Result};
use crate::query::ListQuery;
use crate::response;

#[derive(Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
    media: MediaResolver,
}

impl PublicClient {
    pub fn new(base_url: &str, upload_base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build().map_err(ClientError::Http)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            media: MediaResolver::new(upload_base),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.base_url(), &config.upload_base(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    /// Displayable URL for a stored media reference.
    pub fn image_url(&self, reference: &str) -> String {
        self.media.resolve(reference)
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &ListQuery) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .request(Method::GET, &url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::from_send(&self.base_url, e))?;
        response::decode(resp).await
    }

    /// Listing with the empty-collection fallback.
    pub async fn list<R: Record>(&self, query: &ListQuery) -> Vec<R> {
        let path = R::KIND.path();
        match self.fetch::<Vec<R>>(path, query).await {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(%path, "public listing degraded to empty: {e}");
                Vec::new()
            }
        }
    }

    // ── Collections ───────────────────────────────────────────────────────────

    pub async fn carousel_slides(&self) -> Vec<CarouselSlide> {
        self.list(&ListQuery::active()).await
    }

    pub async fn services(&self) -> Vec<Service> {
        self.list(&ListQuery::active()).await
    }

    pub async fn portfolio_projects(&self, status: Option<ProjectStatus>) -> Vec<PortfolioProject> {
        self.list(&ListQuery::active().with_status(status)).await
    }

    pub async fn blog_posts(&self) -> Vec<BlogPost> {
        self.list(&ListQuery::published(true)).await
    }

    pub async fn faqs(&self) -> Vec<Faq> {
        self.list(&ListQuery::active()).await
    }

    /// The one active About record, or `None`.
    pub async fn about(&self) -> Option<AboutContent> {
        self.list::<AboutContent>(&ListQuery::active()).await.into_iter().next()
    }

    pub async fn contact_info(&self) -> Vec<ContactInfo> {
        self.list(&ListQuery::active()).await
    }

    pub async fn statistics(&self) -> Vec<Statistic> {
        self.list(&ListQuery::active()).await
    }

    pub async fn partners(&self) -> Vec<Partner> {
        self.list(&ListQuery::active()).await
    }

    pub async fn licenses(&self) -> Vec<License> {
        self.list(&ListQuery::active()).await
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Send the contact form. Failures propagate: [`ClientError::Transport`] when
    /// the backend is unreachable, [`ClientError::Api`] when it refuses.
    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<Option<ContactSubmission>> {
        let url = format!("{}/api/contact/submit", self.base_url);
        tracing::debug!("submitting contact form");
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::from_send(&self.base_url, e))?;
        response::decode(resp).await
    }
}
