//! Admin-panel orchestration for Vitrine.
//!
//! - [`SessionGate`] owns the authentication lifecycle.
//! - [`ResourceController`] drives list/create/edit/delete for one content type.
//! - [`AdminShell`] registers sections, routes navigation and loads the dashboard.
//!
//! Front-ends plug in through the [`Notifier`] and [`Confirm`] seams.

pub mod controller;
pub mod notify;
pub mod resource;
pub mod resources;
pub mod session;
pub mod shell;

use std::sync::Arc;

use vitrine_client::ApiClient;
use vitrine_common::MediaResolver;

pub use controller::{FormMode, FormState, ListState, ResourceController};
pub use notify::{Confirm, Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use resource::{Card, Editable, NoForm, Resource};
pub use session::{SessionGate, SessionState};
pub use shell::{AdminShell, DashboardCounts, Section};

/// Everything a controller needs from its surroundings.
#[derive(Clone)]
pub struct AdminContext {
    pub api: ApiClient,
    pub media: MediaResolver,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
}

impl AdminContext {
    pub fn new(
        api: ApiClient,
        media: MediaResolver,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self { api, media, notifier, confirm }
    }
}
