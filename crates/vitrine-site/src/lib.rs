//! # vitrine-site
//!
//! The public website's data layer: page loaders that turn backend records into
//! display-ready views, and the visitor contact form.

pub mod contact;
pub mod pages;
pub mod views;

pub use contact::{ContactForm, ContactFormController, ContactOutcome};
pub use pages::{AboutPage, HomePage, PortfolioPage, Site};
