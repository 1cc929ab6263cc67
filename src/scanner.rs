/// Conversation link extraction for Chat Bulk Delete
use crate::config::DeleteConfig;
use crate::conversation::ConversationRef;
use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An anchor read from the page's navigation panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawLink {
    pub href: String,
    #[serde(default)]
    pub text: String,
}

/// Turns navigation anchors into conversation refs
///
/// Algorithm:
/// 1. Keep only hrefs of the form `[scheme://host]<prefix><id>[/...][?...][#...]`,
///    where an absolute host must be the configured host or a subdomain of it
/// 2. Use the trimmed link text as the title, or `Chat N` when it is empty
///    (N counts matching links, starting at 1)
/// 3. Truncate titles to the configured limit
/// 4. Drop repeated ids, keeping the first occurrence
#[derive(Debug, Clone)]
pub struct ChatLinkScanner {
    pattern: Regex,
    title_limit: usize,
}

impl ChatLinkScanner {
    pub fn new(config: &DeleteConfig) -> Result<ChatLinkScanner, ConfigError> {
        let pattern = Regex::new(&format!(
            r"^(?i:(?:https?://(?:[^/?#]+\.)?{}(?::\d+)?)?){}([^/?#]+)",
            regex::escape(&config.host),
            regex::escape(&config.chat_path_prefix)
        ))?;

        Ok(ChatLinkScanner {
            pattern,
            title_limit: config.title_limit,
        })
    }

    /// Extract the conversation id from an href, if it is a chat link
    pub fn chat_id<'h>(&self, href: &'h str) -> Option<&'h str> {
        self.pattern
            .captures(href.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn scan(&self, links: &[RawLink]) -> Vec<ConversationRef> {
        let mut seen_ids = HashSet::new();

        links
            .iter()
            .filter_map(|link| self.chat_id(&link.href).map(|id| (id, link)))
            .enumerate()
            .filter_map(|(index, (id, link))| {
                if !seen_ids.insert(id.to_string()) {
                    return None;
                }

                let text = link.text.trim();
                let title = if text.is_empty() {
                    format!("Chat {}", index + 1)
                } else {
                    text.to_string()
                };

                Some(ConversationRef::new(
                    id.to_string(),
                    &title,
                    link.href.trim().to_string(),
                    self.title_limit,
                ))
            })
            .collect()
    }
}
