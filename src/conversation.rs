/// Data structures for Chat Bulk Delete
use serde::{Deserialize, Serialize};
use std::fmt;

/// A conversation link discovered in the page's navigation panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationRef {
    pub id: String,
    pub title: String,
    pub href: String,
}

impl ConversationRef {
    pub fn new(id: String, title: &str, href: String, title_limit: usize) -> ConversationRef {
        ConversationRef {
            id,
            title: truncate_title(title, title_limit),
            href,
        }
    }
}

/// Cut a title down to `limit` characters (not bytes, so multi-byte titles stay valid)
pub fn truncate_title(title: &str, limit: usize) -> String {
    title.chars().take(limit).collect()
}

/// Tenant identifier that scopes every conversation API call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Blank ids are treated as absent
    pub fn parse(raw: &str) -> Option<OrganizationId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(OrganizationId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMethod {
    Bulk,
    Individual,
}

/// A conversation that could not be deleted, with whatever the host said about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemFailure {
    pub id: String,
    pub error: String,
}

/// Result of one orchestration run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<ItemFailure>,
    pub method: DeleteMethod,
}

impl DeletionOutcome {
    pub fn bulk(count: usize) -> DeletionOutcome {
        DeletionOutcome {
            attempted: count,
            succeeded: count,
            failed: Vec::new(),
            method: DeleteMethod::Bulk,
        }
    }

    pub fn is_consistent(&self) -> bool {
        match self.method {
            DeleteMethod::Bulk => self.succeeded == self.attempted && self.failed.is_empty(),
            DeleteMethod::Individual => self.succeeded + self.failed.len() == self.attempted,
        }
    }

    pub fn is_failed(&self, id: &str) -> bool {
        self.failed.iter().any(|f| f.id == id)
    }
}
