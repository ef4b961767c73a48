//! One module per content type: its form, its card and its create/update calls.

pub mod about;
pub mod blog;
pub mod carousel;
pub mod contact;
pub mod faqs;
pub mod licenses;
pub mod partners;
pub mod portfolio;
pub mod services;
pub mod statistics;

pub use about::AboutForm;
pub use blog::BlogForm;
pub use carousel::CarouselForm;
pub use contact::{ContactInfoForm, CONTACT_TYPES};
pub use faqs::FaqForm;
pub use licenses::LicenseForm;
pub use partners::PartnerForm;
pub use portfolio::PortfolioForm;
pub use services::{GalleryEntry, ServiceForm, VideoInput};
pub use statistics::StatisticForm;
