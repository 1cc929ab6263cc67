/// Organization id resolution
///
/// The host scopes every conversation call to an organization. The id is
/// looked up fresh on every delete run by asking a list of sources in order;
/// the first one that yields an id wins. A source that errors is logged and
/// skipped, it never aborts the lookup.
use crate::client::{DeletionClient, HostTransport};
use crate::conversation::OrganizationId;
use crate::error::IdentityError;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait(?Send)]
pub trait OrganizationSource {
    fn name(&self) -> &'static str;

    async fn resolve(&self) -> Result<Option<OrganizationId>, IdentityError>;
}

#[derive(Default)]
pub struct IdentityResolver<'a> {
    sources: Vec<Box<dyn OrganizationSource + 'a>>,
}

impl<'a> IdentityResolver<'a> {
    pub fn new() -> Self {
        IdentityResolver { sources: Vec::new() }
    }

    pub fn with_source(mut self, source: impl OrganizationSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub async fn resolve(&self) -> Option<OrganizationId> {
        for source in &self.sources {
            match source.resolve().await {
                Ok(Some(org)) => {
                    log::debug!("organization id resolved from {}", source.name());
                    return Some(org);
                }
                Ok(None) => log::debug!("no organization id in {}", source.name()),
                Err(e) => log::debug!("could not read organization id from {}: {}", source.name(), e),
            }
        }
        None
    }
}

#[derive(Debug, Deserialize)]
struct StoredUserData {
    #[serde(default)]
    organization_id: Option<String>,
    #[serde(default, rename = "organizationId")]
    organization_id_camel: Option<String>,
}

/// The user-data JSON blob the host keeps in localStorage
#[derive(Debug, Clone, Default)]
pub struct StoredUserDataSource {
    blob: Option<String>,
}

impl StoredUserDataSource {
    pub fn new(blob: Option<String>) -> Self {
        StoredUserDataSource { blob }
    }
}

#[async_trait(?Send)]
impl OrganizationSource for StoredUserDataSource {
    fn name(&self) -> &'static str {
        "stored user data"
    }

    async fn resolve(&self) -> Result<Option<OrganizationId>, IdentityError> {
        let Some(blob) = self.blob.as_deref() else {
            return Ok(None);
        };

        let data: StoredUserData = serde_json::from_str(blob).map_err(IdentityError::MalformedUserData)?;
        Ok(data
            .organization_id
            .as_deref()
            .and_then(OrganizationId::parse)
            .or_else(|| data.organization_id_camel.as_deref().and_then(OrganizationId::parse)))
    }
}

/// The organization id the page's initial state global carried
#[derive(Debug, Clone, Default)]
pub struct InitialStateSource {
    organization_id: Option<String>,
}

impl InitialStateSource {
    pub fn new(organization_id: Option<String>) -> Self {
        InitialStateSource { organization_id }
    }
}

#[async_trait(?Send)]
impl OrganizationSource for InitialStateSource {
    fn name(&self) -> &'static str {
        "page initial state"
    }

    async fn resolve(&self) -> Result<Option<OrganizationId>, IdentityError> {
        Ok(self.organization_id.as_deref().and_then(OrganizationId::parse))
    }
}

/// Asks the host API directly
pub struct DiscoverySource<'a, T> {
    client: &'a DeletionClient<T>,
}

impl<'a, T> DiscoverySource<'a, T> {
    pub fn new(client: &'a DeletionClient<T>) -> Self {
        DiscoverySource { client }
    }
}

#[async_trait(?Send)]
impl<T: HostTransport> OrganizationSource for DiscoverySource<'_, T> {
    fn name(&self) -> &'static str {
        "organization discovery"
    }

    async fn resolve(&self) -> Result<Option<OrganizationId>, IdentityError> {
        self.client.discover_organization().await
    }
}
