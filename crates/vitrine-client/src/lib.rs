//! REST clients for the Vitrine content backend.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitrine_client::{ApiClient, ListQuery, MemoryTokenStore};
//! use vitrine_common::models::Faq;
//!
//! #[tokio::main]
//! async fn main() -> vitrine_client::Result<()> {
//!     let api = ApiClient::new("http://localhost:8000", Arc::new(MemoryTokenStore::new()), None)?;
//!     api.login("admin", "secret").await?;
//!     let faqs: Vec<Faq> = api.list(&ListQuery::all()).await?;
//!     println!("{} FAQs", faqs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod public;
pub mod query;
pub mod rest;
pub mod token;
pub mod upload;

mod response;

pub use error::{ClientError, Result};
pub use public::PublicClient;
pub use query::ListQuery;
pub use rest::{ApiClient, MediaSlot};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use upload::{FormBody, Upload};
