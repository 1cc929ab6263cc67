/// The scanned chat list and which entries the user has ticked

use crate::conversation::ConversationRef;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSelection {
    chats: Vec<ConversationRef>,
    selected: HashSet<String>,
}

impl ChatSelection {
    pub fn new(chats: Vec<ConversationRef>) -> Self {
        ChatSelection {
            chats,
            selected: HashSet::new(),
        }
    }

    pub fn chats(&self) -> &[ConversationRef] {
        &self.chats
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Flip one entry; unknown ids are ignored
    pub fn toggle(&mut self, id: &str) {
        if !self.chats.iter().any(|c| c.id == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.chats.iter().map(|c| c.id.clone()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected chats in the order they are listed
    pub fn selected(&self) -> Vec<ConversationRef> {
        self.chats
            .iter()
            .filter(|c| self.selected.contains(&c.id))
            .cloned()
            .collect()
    }

    /// Drop chats from the list (and the selection); returns how many were removed
    pub fn remove<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let original_len = self.chats.len();

        self.chats.retain(|c| !doomed.contains(c.id.as_str()));
        self.selected.retain(|id| !doomed.contains(id.as_str()));

        original_len - self.chats.len()
    }

    pub fn can_delete(&self) -> bool {
        self.selected_count() > 0
    }

    pub fn delete_label(&self) -> String {
        format!("Delete Selected ({})", self.selected_count())
    }
}
