//! Operation abstraction layer
//!
//! A data-driven description of the Affinity API. Operations are defined in
//! JSON files embedded at compile time, so every resource method runs through
//! the same validation, request and pagination code.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches operation descriptors from embedded JSON
//! - [`validate`] - Checks and normalizes call arguments against a descriptor
//! - [`fetcher`] - Page decoding and the cursor-following item stream
//!
//! # Operation Definitions
//!
//! Operations are defined in JSON files under `src/resources/`, one file per
//! resource family (`persons.json`, `notes.json`, ...). Each entry names the
//! verb, the path template, the parameters with their location, kind and
//! requiredness, and for list operations the key holding the items.

pub mod fetcher;
pub mod registry;
pub mod validate;

pub use fetcher::{CursorPager, Page, NEXT_PAGE_TOKEN};
pub use registry::{
    get_all_operation_names, get_operation, get_registry, Location, OperationDef, ParamKind,
    ParamSpec, Verb,
};
pub use validate::{validate, NormalizedArgs};
