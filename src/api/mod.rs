//! Affinity API interaction module
//!
//! Core functionality for talking to the Affinity REST API: the API key,
//! the HTTP layer and the client that ties them to the operation registry.
//!
//! # Module Structure
//!
//! - [`auth`] - API key holder (HTTP Basic auth, empty username)
//! - [`client`] - Main client, generic operation invocation and pagination
//! - [`http`] - Request execution and response classification
//!
//! # Example
//!
//! ```no_run
//! use affinity::AffinityClient;
//! use serde_json::{json, Map, Value};
//!
//! async fn example() -> affinity::Result<()> {
//!     let client = AffinityClient::new("my-api-key")?;
//!     let mut args = Map::new();
//!     args.insert("person_id".to_string(), json!(123));
//!     let person: Value = client.call("get_person", args).await?;
//!     println!("{}", person["first_name"]);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
