//! Async client for the Affinity CRM v1 REST API
//!
//! Every endpoint is described once in an embedded operation registry. Calls
//! are validated against that description before a request is built, and list
//! endpoints can be consumed page by page or as a lazy stream of items.
//!
//! ```no_run
//! use affinity::{AffinityClient, EntityRef, ListPersonsParams};
//! use futures::TryStreamExt;
//!
//! # async fn run() -> affinity::Result<()> {
//! let client = AffinityClient::new("my-api-key")?;
//!
//! let me = client.whoami().await?;
//! println!("{}", me["user"]["email"]);
//!
//! let persons: Vec<_> = client
//!     .list_all_persons(&ListPersonsParams::term("smith"))
//!     .try_collect()
//!     .await?;
//! println!("{} persons", persons.len());
//!
//! client
//!     .set_field_value(1234, EntityRef::person(42), "Series A", None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod resource;

pub use api::auth::Credential;
pub use api::client::AffinityClient;
pub use config::ClientConfig;
pub use entities::*;
pub use error::{Error, FieldViolation, Result, ValidationError};
pub use resource::{CursorPager, Page};
