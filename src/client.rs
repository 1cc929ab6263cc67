/// HTTP calls against the host's conversation API
use crate::config::Endpoints;
use crate::conversation::OrganizationId;
use crate::error::{IdentityError, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn json_body(mut self, body: String) -> HttpRequest {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can put a request on the wire using the user's session
#[async_trait(?Send)]
pub trait HostTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// How a bulk delete went, as far as the client can tell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkDeleteResult {
    /// Host acknowledged the whole batch
    AllSucceeded(usize),
    /// Host rejected the batch
    AllFailed(String),
    /// No response; the batch may or may not have been applied
    Unknown(String),
}

#[derive(Debug, Serialize)]
struct BulkDeleteBody<'a> {
    conversation_uuids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct OrganizationSummary {
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

pub struct DeletionClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: HostTransport> DeletionClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        DeletionClient {
            transport,
            endpoints,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the host which organizations the session belongs to and take the first one
    pub async fn discover_organization(&self) -> Result<Option<OrganizationId>, IdentityError> {
        let request = HttpRequest::new(HttpMethod::Get, self.endpoints.organizations());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(IdentityError::Status(response.status));
        }

        let orgs: Vec<OrganizationSummary> =
            serde_json::from_str(&response.body).map_err(IdentityError::Decode)?;

        Ok(orgs
            .into_iter()
            .next()
            .and_then(|org| org.uuid.or(org.id))
            .and_then(|raw| OrganizationId::parse(&raw)))
    }

    pub async fn bulk_delete(&self, org: &OrganizationId, ids: &[String]) -> BulkDeleteResult {
        let body = match serde_json::to_string(&BulkDeleteBody {
            conversation_uuids: ids,
        }) {
            Ok(body) => body,
            Err(e) => return BulkDeleteResult::AllFailed(e.to_string()),
        };

        let request = HttpRequest::new(HttpMethod::Post, self.endpoints.delete_many(org)).json_body(body);
        log::debug!("POST delete_many with {} conversations", ids.len());

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => BulkDeleteResult::AllSucceeded(ids.len()),
            Ok(response) => BulkDeleteResult::AllFailed(error_detail(&response)),
            Err(e) => BulkDeleteResult::Unknown(e.to_string()),
        }
    }

    pub async fn single_delete(&self, org: &OrganizationId, conversation_id: &str) -> Result<(), String> {
        let request = HttpRequest::new(
            HttpMethod::Delete,
            self.endpoints.conversation(org, conversation_id),
        );
        log::debug!("DELETE conversation {}", conversation_id);

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(error_detail(&response)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Response body text, or the bare status when the host sent nothing
fn error_detail(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        body.to_string()
    }
}
