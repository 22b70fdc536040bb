//! Affinity Client
//!
//! Main client for the Affinity API, combining the operation registry,
//! parameter validation and the HTTP layer. Resource-specific methods live in
//! [`crate::entities`] and all funnel into [`AffinityClient::call`].

use super::auth::Credential;
use super::http::HttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::resource::{self, CursorPager, OperationDef, Page};
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// Main Affinity client
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct AffinityClient {
    http: HttpClient,
    base_url: Url,
    page_size: u32,
}

impl AffinityClient {
    /// Create a client for the production endpoint
    pub fn new(api_key: impl Into<Credential>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with an explicit configuration
    pub fn with_config(api_key: impl Into<Credential>, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = HttpClient::new(api_key.into(), &config)?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Page size used by the `list_all_*` streams
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Build the absolute URL for a resolved operation path
    pub fn build_url(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    fn operation(name: &str) -> Result<&'static OperationDef> {
        resource::get_operation(name).ok_or_else(|| Error::UnknownOperation(name.to_string()))
    }

    /// Invoke any registered operation by name
    ///
    /// Arguments are validated against the operation's descriptor before
    /// anything is sent; the decoded JSON payload is returned as-is.
    pub async fn call(&self, operation: &str, args: Map<String, Value>) -> Result<Value> {
        let def = Self::operation(operation)?;
        let normalized = resource::validate(operation, def, &args)?;
        let url = self.build_url(&normalized.render_path(&def.path))?;

        self.http
            .execute(
                def.method.method(),
                url,
                &normalized.query,
                normalized.body.as_ref(),
            )
            .await
    }

    /// Invoke a list operation and decode one page
    pub async fn call_page(&self, operation: &str, args: Map<String, Value>) -> Result<Page<Value>> {
        let def = Self::operation(operation)?;
        let Some(items_key) = def.items_key.as_deref() else {
            return Err(Error::UnexpectedResponse(format!(
                "{} is not a list operation",
                operation
            )));
        };

        let response = self.call(operation, args).await?;
        Page::from_response(response, items_key)
    }

    /// Stream every item of a list operation across all pages
    ///
    /// Pages are requested lazily as the stream is polled. `page_size` is
    /// filled from the client configuration unless `args` sets it.
    pub fn call_all(
        &self,
        operation: &str,
        mut args: Map<String, Value>,
    ) -> BoxStream<'static, Result<Value>> {
        let accepts_page_size =
            resource::get_operation(operation).is_some_and(|def| def.param("page_size").is_some());
        if accepts_page_size && args.get("page_size").map_or(true, Value::is_null) {
            args.insert("page_size".to_string(), Value::from(self.page_size));
        }

        let client = self.clone();
        let operation = operation.to_string();

        CursorPager::new(move |cursor: Option<String>| {
            let client = client.clone();
            let operation = operation.clone();
            let mut args = args.clone();
            async move {
                if let Some(cursor) = cursor {
                    args.insert("page_token".to_string(), Value::String(cursor));
                }
                client.call_page(&operation, args).await
            }
        })
        .boxed()
    }

    /// [`call_all`](Self::call_all) for arguments that may have failed to build
    pub(crate) fn call_all_args(
        &self,
        operation: &str,
        args: Result<Map<String, Value>>,
    ) -> BoxStream<'static, Result<Value>> {
        match args {
            Ok(args) => self.call_all(operation, args),
            Err(e) => futures::stream::once(async move { Err(e) }).boxed(),
        }
    }
}

/// Serialize a params struct into an argument map
pub(crate) fn to_args<P: Serialize>(params: &P) -> Result<Map<String, Value>> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::Decode(serde::ser::Error::custom(format!(
            "parameters must serialize to an object, got {}",
            other
        )))),
    }
}

/// Add one argument, returning the map for chaining
pub(crate) fn with_arg(
    mut args: Map<String, Value>,
    name: &str,
    value: impl Into<Value>,
) -> Map<String, Value> {
    args.insert(name.to_string(), value.into());
    args
}
