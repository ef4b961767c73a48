//! Section registry, navigation and dashboard.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vitrine_client::{ClientError, ListQuery, Result};
use vitrine_common::models::{
    AboutContent, BlogPost, CarouselSlide, ContactInfo, ContactSubmission, Faq, License, Partner,
    PortfolioProject, ResourceKind, Service, Statistic,
};
use vitrine_common::VitrineError;

use crate::controller::ResourceController;
use crate::resource::{Card, Resource};
use crate::session::{SessionGate, SessionState};
use crate::AdminContext;

/// A navigable admin section, independent of its record type.
#[async_trait]
pub trait Section: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Fetch the section's listing. Returns the record count.
    async fn refresh(&self) -> Result<usize>;

    fn cards(&self) -> Vec<Card>;

    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
impl<R: Resource> Section for ResourceController<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    async fn refresh(&self) -> Result<usize> {
        self.list().await
    }

    fn cards(&self) -> Vec<Card> {
        ResourceController::cards(self)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        ResourceController::delete(self, id).await
    }
}

/// Headline counts shown after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub active_carousel: usize,
    pub active_services: usize,
    pub active_portfolio: usize,
    pub unread_submissions: usize,
}

struct Registered {
    section: Arc<dyn Section>,
    typed: Arc<dyn Any + Send + Sync>,
}

pub struct AdminShell {
    ctx: AdminContext,
    gate: SessionGate,
    sections: Mutex<BTreeMap<ResourceKind, Registered>>,
    current: Mutex<Option<ResourceKind>>,
    dashboard: Mutex<Option<DashboardCounts>>,
}

impl AdminShell {
    pub fn new(ctx: AdminContext) -> Self {
        let gate = SessionGate::new(ctx.api.clone());
        Self {
            ctx,
            gate,
            sections: Mutex::new(BTreeMap::new()),
            current: Mutex::new(None),
            dashboard: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &AdminContext {
        &self.ctx
    }

    pub fn session(&self) -> &SessionGate {
        &self.gate
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Register the controller for `R`. Registering twice returns the existing one.
    pub fn register<R: Resource>(&self) -> Arc<ResourceController<R>> {
        let mut sections = self.sections.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = sections.get(&R::KIND) {
            if let Ok(typed) = Arc::clone(&existing.typed).downcast::<ResourceController<R>>() {
                return typed;
            }
        }
        let controller = Arc::new(ResourceController::<R>::new(self.ctx.clone()));
        sections.insert(
            R::KIND,
            Registered {
                section: controller.clone(),
                typed: controller.clone(),
            },
        );
        controller
    }

    /// The typed controller for `R`, registering it on first use.
    pub fn controller<R: Resource>(&self) -> Arc<ResourceController<R>> {
        self.register::<R>()
    }

    pub fn register_all(&self) {
        self.register::<CarouselSlide>();
        self.register::<Service>();
        self.register::<PortfolioProject>();
        self.register::<BlogPost>();
        self.register::<Faq>();
        self.register::<AboutContent>();
        self.register::<ContactInfo>();
        self.register::<ContactSubmission>();
        self.register::<Statistic>();
        self.register::<Partner>();
        self.register::<License>();
    }

    pub fn section_kinds(&self) -> Vec<ResourceKind> {
        self.sections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    pub fn section(&self, kind: ResourceKind) -> Option<Arc<dyn Section>> {
        self.sections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&kind)
            .map(|r| Arc::clone(&r.section))
    }

    pub fn current_section(&self) -> Option<ResourceKind> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Session ───────────────────────────────────────────────────────────────

    /// Resume any stored session and load the dashboard when it holds.
    pub async fn start(&self) -> SessionState {
        let state = self.gate.start().await;
        if matches!(state, SessionState::Authenticated(_)) {
            self.load_dashboard().await;
        }
        state
    }

    /// Resume any stored session without touching the dashboard.
    pub async fn resume(&self) -> SessionState {
        self.gate.start().await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.gate.login(username, password).await?;
        self.load_dashboard().await;
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
        *self.dashboard.lock().unwrap_or_else(|e| e.into_inner()) = None;
        self.gate.logout()
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Switch to a section and list it. Every visit fetches afresh.
    pub async fn navigate(&self, kind: ResourceKind) -> Result<usize> {
        if !self.gate.is_authenticated() {
            return Err(ClientError::validation("Sign in to manage content"));
        }
        let section = self
            .section(kind)
            .ok_or_else(|| ClientError::from(VitrineError::UnknownResource(kind.slug().to_owned())))?;
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(kind);
        section.refresh().await
    }

    // ── Dashboard ─────────────────────────────────────────────────────────────

    pub fn dashboard(&self) -> Option<DashboardCounts> {
        *self.dashboard.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the four headline counts in parallel. A failure is logged and leaves
    /// the counters unset.
    pub async fn load_dashboard(&self) -> Option<DashboardCounts> {
        let api = &self.ctx.api;
        let active = ListQuery::active();
        let unread_query = ListQuery::unread(true);
        let (carousel, services, portfolio, unread) = tokio::join!(
            api.list::<CarouselSlide>(&active),
            api.list::<Service>(&active),
            api.list::<PortfolioProject>(&active),
            api.list::<ContactSubmission>(&unread_query),
        );

        let counts = match (carousel, services, portfolio, unread) {
            (Ok(c), Ok(s), Ok(p), Ok(u)) => Some(DashboardCounts {
                active_carousel: c.len(),
                active_services: s.len(),
                active_portfolio: p.len(),
                unread_submissions: u.iter().filter(|m| !m.is_read).count(),
            }),
            (c, s, p, u) => {
                let first = [c.err(), s.err(), p.err(), u.err()].into_iter().flatten().next();
                if let Some(e) = first {
                    tracing::warn!("dashboard load failed: {e}");
                }
                None
            }
        };
        *self.dashboard.lock().unwrap_or_else(|e| e.into_inner()) = counts;
        counts
    }
}
