//! Content records as the backend serves them.
//!
//! Every record is backend-owned: `id` is assigned by the server and never edited
//! client-side, `order` drives display sequence. Each resource type gets its own
//! concrete struct; [`Record`] is the shared base shape.

pub mod about;
pub mod blog;
pub mod carousel;
pub mod contact;
pub mod faq;
pub mod license;
pub mod partner;
pub mod portfolio;
pub mod service;
pub mod statistic;
pub mod user;

pub use about::*;
pub use blog::*;
pub use carousel::*;
pub use contact::*;
pub use faq::*;
pub use license::*;
pub use partner::*;
pub use portfolio::*;
pub use service::*;
pub use statistic::*;
pub use user::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::VitrineError;

/// Base shape shared by every content record.
pub trait Record: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> i64;

    fn order(&self) -> i32 {
        0
    }

    fn is_active(&self) -> bool {
        true
    }
}

/// The closed set of content collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Carousel,
    Services,
    Portfolio,
    Blog,
    Faqs,
    About,
    ContactInfo,
    ContactSubmissions,
    Statistics,
    Partners,
    Licenses,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 11] = [
        Self::Carousel,
        Self::Services,
        Self::Portfolio,
        Self::Blog,
        Self::Faqs,
        Self::About,
        Self::ContactInfo,
        Self::ContactSubmissions,
        Self::Statistics,
        Self::Partners,
        Self::Licenses,
    ];

    /// Collection path under `/api`, e.g. `/api/contact/info`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Carousel => "/api/carousel",
            Self::Services => "/api/services",
            Self::Portfolio => "/api/portfolio",
            Self::Blog => "/api/blog",
            Self::Faqs => "/api/faqs",
            Self::About => "/api/about",
            Self::ContactInfo => "/api/contact/info",
            Self::ContactSubmissions => "/api/contact/submissions",
            Self::Statistics => "/api/statistics",
            Self::Partners => "/api/partners",
            Self::Licenses => "/api/licenses",
        }
    }

    /// Path of one record in the collection.
    pub fn item_path(self, id: i64) -> String {
        format!("{}/{id}", self.path())
    }

    /// Short name used on the command line and in logs.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Services => "services",
            Self::Portfolio => "portfolio",
            Self::Blog => "blog",
            Self::Faqs => "faqs",
            Self::About => "about",
            Self::ContactInfo => "contact-info",
            Self::ContactSubmissions => "submissions",
            Self::Statistics => "statistics",
            Self::Partners => "partners",
            Self::Licenses => "licenses",
        }
    }

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Carousel => "Carousel slides",
            Self::Services => "Services",
            Self::Portfolio => "Portfolio projects",
            Self::Blog => "Blog posts",
            Self::Faqs => "FAQs",
            Self::About => "About content",
            Self::ContactInfo => "Contact details",
            Self::ContactSubmissions => "Contact submissions",
            Self::Statistics => "Statistics",
            Self::Partners => "Partners",
            Self::Licenses => "Licenses",
        }
    }

    /// Singular noun for notifications ("Service deleted").
    pub fn noun(self) -> &'static str {
        match self {
            Self::Carousel => "Carousel slide",
            Self::Services => "Service",
            Self::Portfolio => "Portfolio project",
            Self::Blog => "Blog post",
            Self::Faqs => "FAQ",
            Self::About => "About content",
            Self::ContactInfo => "Contact detail",
            Self::ContactSubmissions => "Contact submission",
            Self::Statistics => "Statistic",
            Self::Partners => "Partner",
            Self::Licenses => "License",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or(VitrineError::UnknownResource(wanted))
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Lenient timestamp decoding.
///
/// The backend emits RFC 3339 for timezone-aware columns and naive ISO-8601
/// otherwise; naive values are taken as UTC. Anything unparseable becomes `None`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
