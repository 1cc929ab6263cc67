/// Popup configuration and host API endpoint construction
use crate::conversation::OrganizationId;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteConfig {
    /// The active tab must be on this host (or a subdomain of it)
    pub host: String,
    pub api_base: String,
    pub chat_path_prefix: String,
    pub title_limit: usize,
    /// localStorage keys tried in order for the stored user data blob
    pub user_data_keys: Vec<String>,
    pub status_hide_ms: u32,
    pub refresh_tip_ms: u32,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        DeleteConfig {
            host: "claude.ai".to_string(),
            api_base: "https://claude.ai/api".to_string(),
            chat_path_prefix: "/chat/".to_string(),
            title_limit: 50,
            user_data_keys: vec!["claude_user_data".to_string(), "user".to_string()],
            status_hide_ms: 5000,
            refresh_tip_ms: 3000,
        }
    }
}

impl DeleteConfig {
    /// Parse a partial JSON override; missing fields keep their defaults and
    /// unknown fields are rejected
    pub fn from_json(json: &str) -> Result<DeleteConfig, ConfigError> {
        let config: DeleteConfig = serde_json::from_str(json)?;
        Endpoints::new(&config.api_base)?;
        Ok(config)
    }

    /// Whether a tab URL belongs to the configured host
    pub fn is_host_url(&self, tab_url: &str) -> bool {
        let Ok(url) = Url::parse(tab_url) else {
            return false;
        };

        match url.host_str() {
            Some(host) => {
                let host = host.to_lowercase();
                let expected = self.host.to_lowercase();
                host == expected || host.ends_with(&format!(".{}", expected))
            }
            None => false,
        }
    }
}

/// URLs of the host API, rooted at the configured base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Result<Endpoints, ConfigError> {
        let base = Url::parse(api_base)?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(api_base.to_string()));
        }
        Ok(Endpoints { base })
    }

    pub fn organizations(&self) -> String {
        self.join(["organizations"])
    }

    pub fn delete_many(&self, org: &OrganizationId) -> String {
        self.join(["organizations", org.as_str(), "chat_conversations", "delete_many"])
    }

    pub fn conversation(&self, org: &OrganizationId, conversation_id: &str) -> String {
        self.join(["organizations", org.as_str(), "chat_conversations", conversation_id])
    }

    fn join<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> String {
        let mut url = self.base.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }
}
