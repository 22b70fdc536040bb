//! HTTP utilities for Affinity REST API calls
//!
//! [`HttpClient::execute`] is the one place a request leaves the process.

use super::auth::Credential;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper holding the connection pool and the API key
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    credential: Credential,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(credential: Credential, config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, credential })
    }

    /// Perform one request and classify the answer
    ///
    /// Any 2xx body is decoded as JSON (an empty body becomes `Value::Null`);
    /// anything else becomes [`Error::Api`] with the raw body text.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .basic_auth(self.credential.username(), Some(self.credential.secret()));

        if !query.is_empty() {
            request = request.query(query);
        }

        // `json` also sets Content-Type: application/json
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(Error::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        // DELETE and some updates answer with no body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
