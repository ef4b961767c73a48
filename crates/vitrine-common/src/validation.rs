//! Client-side form validation.
//!
//! Everything here runs before a request is built, so a failure never costs a round-trip.

use validator::{Validate, ValidateEmail};

use crate::error::VitrineError;

/// Validate a form, returning a VitrineError::Validation on failure.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), VitrineError> {
    form.validate().map_err(|e| VitrineError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    // field_errors() is a HashMap; keep messages stable for display
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reject a blank (empty or whitespace-only) required text field.
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Accept an email address whose domain has at least one dot, so `a@localhost` is refused.
pub fn email_address(value: &str) -> Result<(), validator::ValidationError> {
    let dotted_domain = value
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if !value.validate_email() || !dotted_domain {
        return Err(validator::ValidationError::new("email"));
    }
    Ok(())
}

/// Require a value that the form type cannot express on its own,
/// such as an image that is mandatory only when creating.
pub fn require<T>(value: Option<&T>, message: &str) -> Result<(), VitrineError> {
    match value {
        Some(_) => Ok(()),
        None => Err(VitrineError::validation(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct SignupForm {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        name: String,
        #[validate(email(message = "Enter a valid email address"))]
        email: String,
    }

    #[test]
    fn collects_field_messages() {
        let err = validate_form(&SignupForm { name: "  ".into(), email: "not-an-email".into() })
            .unwrap_err();
        assert_eq!(err.to_string(), "Enter a valid email address; Name is required");
    }

    #[test]
    fn accepts_valid_form() {
        assert!(validate_form(&SignupForm { name: "Ann".into(), email: "ann@example.com".into() }).is_ok());
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert!(email_address("ann@example.com").is_ok());
        assert!(email_address("ann@mail.example.co").is_ok());
        assert!(email_address("a@localhost").is_err());
        assert!(email_address("a@example.").is_err());
        assert!(email_address("a@.com").is_err());
        assert!(email_address("not-an-email").is_err());
    }

    #[test]
    fn require_reports_message() {
        let missing: Option<&u8> = None;
        assert_eq!(require(missing, "Image is required").unwrap_err().to_string(), "Image is required");
        assert!(require(Some(&1u8), "unused").is_ok());
    }
}
