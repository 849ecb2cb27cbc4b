//! Reqwest-backed role change adapter.
//!
//! Owns transport details only: endpoint construction, request
//! serialization, the request timeout, and mapping of HTTP failures onto
//! the port error. The path and body follow the account service's
//! `toggleType` contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::ports::{RoleChangeApi, RoleChangeApiError};
use crate::domain::{Role, SubjectId};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ROLE_CHANGE_PATH: [&str; 3] = ["api", "v1", "toggleType"];

/// Role change adapter performing HTTP PUT requests against one service.
pub struct HttpRoleChangeApi {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleChangeBody {
    user_type: Role,
}

impl HttpRoleChangeApi {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout. The timeout bounds
    /// each role change request end to end; there is no other cancellation.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint_for(&self, subject: &SubjectId) -> Result<Url, RoleChangeApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RoleChangeApiError::transport("base URL cannot carry path segments"))?
            .pop_if_empty()
            .extend(ROLE_CHANGE_PATH)
            .push(subject.as_str());
        Ok(url)
    }
}

#[async_trait]
impl RoleChangeApi for HttpRoleChangeApi {
    async fn change_role(
        &self,
        subject: &SubjectId,
        role: Role,
    ) -> Result<(), RoleChangeApiError> {
        let endpoint = self.endpoint_for(subject)?;
        let response = self
            .client
            .put(endpoint)
            .json(&RoleChangeBody { user_type: role })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(RoleChangeApiError::rejected(
            status.as_u16(),
            rejection_message(body.as_ref()),
        ))
    }
}

fn map_transport_error(error: reqwest::Error) -> RoleChangeApiError {
    RoleChangeApiError::transport(error.to_string())
}

/// Pull a human-readable message out of a JSON error body, falling back to
/// a truncated preview of the raw payload.
fn rejection_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.is_empty() {
                return message;
            }
        }
    }
    body_preview(body)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let text = String::from_utf8_lossy(body);
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.is_empty() {
        return "empty response body".to_owned();
    }
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}
