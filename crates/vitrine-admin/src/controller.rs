//! The list/create/edit/delete state machine shared by every admin section.
//!
//! Each controller owns its own list and form state. Nothing is cached across
//! sections, and after every successful mutation the list is fetched again so the
//! view reflects the backend instead of a local patch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use validator::Validate;
use vitrine_client::{ClientError, Result};
use vitrine_common::models::{ContactSubmission, Record};
use vitrine_common::validation::validate_form;

use crate::resource::{Card, Editable, Resource};
use crate::AdminContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<R> {
    Idle,
    Loading,
    Populated(Vec<R>),
    Empty,
    LoadFailed(String),
}

impl<R> ListState<R> {
    pub fn records(&self) -> &[R] {
        match self {
            Self::Populated(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState<F> {
    Closed,
    Open {
        mode: FormMode,
        form: F,
        /// Inline error from the last failed submit.
        error: Option<String>,
    },
}

impl<F> FormState<F> {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Self::Open { mode, .. } => Some(*mode),
            Self::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            Self::Closed => None,
        }
    }
}

/// Held while a mutating call is in flight; a second acquire fails with `Busy`.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| ClientError::Busy)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct ResourceController<R: Resource> {
    ctx: AdminContext,
    list: Mutex<ListState<R>>,
    form: Mutex<FormState<R::Form>>,
    in_flight: AtomicBool,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            list: Mutex::new(ListState::Idle),
            form: Mutex::new(FormState::Closed),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn list_state(&self) -> ListState<R> {
        lock(&self.list).clone()
    }

    pub fn form_state(&self) -> FormState<R::Form> {
        lock(&self.form).clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Cards for the current listing, empty unless populated.
    pub fn cards(&self) -> Vec<Card> {
        lock(&self.list)
            .records()
            .iter()
            .map(|r| r.card(&self.ctx.media))
            .collect()
    }

    fn noun(&self) -> &'static str {
        R::KIND.noun()
    }

    /// Fetch the collection. Failures land in `LoadFailed`; there is no retry.
    pub async fn list(&self) -> Result<usize> {
        *lock(&self.list) = ListState::Loading;
        match self.ctx.api.list::<R>(&R::admin_query()).await {
            Ok(items) => {
                let count = items.len();
                *lock(&self.list) = if items.is_empty() {
                    ListState::Empty
                } else {
                    ListState::Populated(items)
                };
                tracing::debug!(resource = %R::KIND, count, "listed");
                Ok(count)
            }
            Err(e) => {
                *lock(&self.list) = ListState::LoadFailed(e.to_string());
                self.ctx
                    .notifier
                    .error(&format!("Failed to load {}: {e}", R::KIND.title().to_lowercase()));
                Err(e)
            }
        }
    }

    /// Delete after an explicit confirmation. Returns `false` when declined.
    ///
    /// A failed delete leaves the current list untouched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let prompt = format!("Delete this {}?", self.noun().to_lowercase());
        if !self.ctx.confirm.confirm(&prompt) {
            return Ok(false);
        }
        {
            let _guard = InFlight::acquire(&self.in_flight)?;
            if let Err(e) = self.ctx.api.delete::<R>(id).await {
                self.ctx.notifier.error(&format!("Failed to delete: {e}"));
                return Err(e);
            }
        }
        tracing::info!(resource = %R::KIND, id, "deleted");
        self.ctx.notifier.success(&format!("{} deleted", self.noun()));
        self.relist().await;
        Ok(true)
    }

    async fn relist(&self) {
        // list() already reported its own failure.
        let _ = self.list().await;
    }
}

impl<R> ResourceController<R>
where
    R: Editable,
    R::Form: Validate + Default,
{
    pub fn open_create(&self) {
        *lock(&self.form) = FormState::Open {
            mode: FormMode::Create,
            form: R::Form::default(),
            error: None,
        };
    }

    /// Fetch the record and open it for editing. On failure the form stays closed.
    pub async fn open_edit(&self, id: i64) -> Result<()> {
        match self.ctx.api.get::<R>(id).await {
            Ok(record) => {
                let opened = FormState::Open {
                    mode: FormMode::Edit(record.id()),
                    form: record.to_form(&self.ctx.media),
                    error: None,
                };
                let mut state = lock(&self.form);
                *state = opened;
                Ok(())
            }
            Err(e) => {
                self.ctx.notifier.error(&format!("Failed to load {}: {e}", self.noun().to_lowercase()));
                Err(e)
            }
        }
    }

    /// Apply a change to the open form. Returns `false` when no form is open.
    pub fn edit_form(&self, change: impl FnOnce(&mut R::Form)) -> bool {
        match &mut *lock(&self.form) {
            FormState::Open { form, .. } => {
                change(form);
                true
            }
            FormState::Closed => false,
        }
    }

    pub fn close_form(&self) {
        *lock(&self.form) = FormState::Closed;
    }

    /// Validate, send and re-list.
    ///
    /// Validation runs before any request. On failure the form stays open with
    /// the error recorded inline.
    pub async fn submit(&self) -> Result<R> {
        let (mode, form) = match &*lock(&self.form) {
            FormState::Open { mode, form, .. } => (*mode, form.clone()),
            FormState::Closed => return Err(ClientError::validation("No form is open")),
        };

        let outcome = {
            let _guard = InFlight::acquire(&self.in_flight)?;
            self.send(mode, &form).await
        };

        match outcome {
            Ok(record) => {
                *lock(&self.form) = FormState::Closed;
                let verb = match mode {
                    FormMode::Create => "created",
                    FormMode::Edit(_) => "updated",
                };
                tracing::info!(resource = %R::KIND, id = record.id(), "{verb}");
                self.ctx.notifier.success(&format!("{} {verb}", self.noun()));
                self.relist().await;
                Ok(record)
            }
            Err(e) => {
                if let FormState::Open { error, .. } = &mut *lock(&self.form) {
                    *error = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    async fn send(&self, mode: FormMode, form: &R::Form) -> Result<R> {
        validate_form(form)?;
        match mode {
            FormMode::Create => {
                R::check_create(form)?;
                R::create(&self.ctx.api, form).await
            }
            FormMode::Edit(id) => R::update(&self.ctx.api, id, form).await,
        }
    }
}

impl ResourceController<ContactSubmission> {
    /// Mark a submission read. Already-read submissions issue no call.
    pub async fn mark_read(&self, id: i64) -> Result<bool> {
        let already_read = lock(&self.list)
            .records()
            .iter()
            .any(|s| s.id == id && s.is_read);
        if already_read {
            return Ok(false);
        }
        {
            let _guard = InFlight::acquire(&self.in_flight)?;
            if let Err(e) = self.ctx.api.mark_submission_read(id).await {
                self.ctx.notifier.error(&format!("Failed to mark as read: {e}"));
                return Err(e);
            }
        }
        self.ctx.notifier.success("Marked as read");
        self.relist().await;
        Ok(true)
    }
}
