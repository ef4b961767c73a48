//! Public contact form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use validator::Validate;
use vitrine_client::{ClientError, PublicClient};
use vitrine_common::models::ContactRequest;
use vitrine_common::validation::{email_address, not_blank, validate_form};

pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent. We will get back to you soon.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ContactForm {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "email_address", message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Subject is required"))]
    pub subject: String,
    #[validate(custom(function = "not_blank", message = "Message is required"))]
    pub message: String,
}

impl ContactForm {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }

    fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: Some(self.subject.clone()),
            message: self.message.clone(),
        }
    }
}

/// What the visitor is told after pressing send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum ContactOutcome {
    Sent(String),
    /// Rejected before any request was made.
    Invalid(String),
    /// The backend could not be reached or did not answer in time.
    Unreachable(String),
    /// The backend answered with a refusal; carries its reason.
    Rejected(String),
    /// A previous send is still in flight.
    Busy,
}

impl ContactOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn message(&self) -> String {
        match self {
            Self::Sent(m) | Self::Invalid(m) | Self::Unreachable(m) | Self::Rejected(m) => m.clone(),
            Self::Busy => ClientError::Busy.to_string(),
        }
    }
}

pub struct ContactFormController {
    client: PublicClient,
    form: Mutex<ContactForm>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the send finishes or is abandoned.
struct Sending<'a>(&'a AtomicBool);

impl Drop for Sending<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock(m: &Mutex<ContactForm>) -> MutexGuard<'_, ContactForm> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl ContactFormController {
    pub fn new(client: PublicClient) -> Self {
        Self { client, form: Mutex::new(ContactForm::default()), in_flight: AtomicBool::new(false) }
    }

    pub fn form(&self) -> ContactForm {
        lock(&self.form).clone()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut ContactForm)) {
        apply(&mut lock(&self.form));
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate and send the form. The form is cleared only after a successful send.
    pub async fn submit(&self) -> ContactOutcome {
        let form = self.form().trimmed();
        if let Err(e) = validate_form(&form) {
            return ContactOutcome::Invalid(e.to_string());
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return ContactOutcome::Busy;
        }
        let sending = Sending(&self.in_flight);
        let result = self.client.submit_contact(&form.to_request()).await;
        drop(sending);

        match result {
            Ok(_) => {
                tracing::info!("contact form sent");
                *lock(&self.form) = ContactForm::default();
                ContactOutcome::Sent(SENT_MESSAGE.to_owned())
            }
            Err(e) if e.is_transport() => {
                tracing::warn!("contact form could not reach the backend: {e}");
                ContactOutcome::Unreachable(e.to_string())
            }
            Err(e) => {
                tracing::warn!("contact form rejected: {e}");
                ContactOutcome::Rejected(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: " Ann ".into(),
            email: " ann@example.com ".into(),
            subject: "Quote".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn surrounding_whitespace_is_not_an_error() {
        assert!(validate_form(&filled().trimmed()).is_ok());
        assert_eq!(filled().trimmed().name, "Ann");
    }

    #[test]
    fn blank_fields_and_bad_email_are_reported() {
        let form = ContactForm { email: "not-an-email".into(), subject: "   ".into(), ..filled() };
        let message = validate_form(&form.trimmed()).unwrap_err().to_string();
        assert!(message.contains("Please enter a valid email address"));
        assert!(message.contains("Subject is required"));
    }

    #[test]
    fn email_without_dotted_domain_is_refused() {
        let form = ContactForm { email: "a@localhost".into(), ..filled() };
        assert_eq!(
            validate_form(&form.trimmed()).unwrap_err().to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn request_carries_subject() {
        let request = filled().trimmed().to_request();
        assert_eq!(request.subject.as_deref(), Some("Quote"));
        assert_eq!(request.email, "ann@example.com");
    }
}
