/// Popup state and the actions that change it
use crate::conversation::{ConversationRef, DeleteMethod, DeletionOutcome};
use crate::orchestrator::{DeleteProgress, ItemStatus};
use crate::selection::ChatSelection;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    /// Success and error messages clear themselves; info stays until replaced
    pub fn auto_hides(&self) -> bool {
        self.kind != StatusKind::Info
    }
}

/// Identifies one showing of a status message, so a stale hide timer
/// cannot clear a later showing of the same text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTicket(u64);

impl StatusTicket {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        StatusTicket(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u8,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    pub selection: ChatSelection,
    pub status: Option<StatusMessage>,
    pub busy: bool,
    pub progress: Option<ProgressView>,
    status_ticket: Option<StatusTicket>,
    /// Ids handed to the current delete run
    pending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    Busy(bool),
    Status(StatusTicket, StatusMessage),
    /// Hide the status, but only if it is still the showing with this ticket
    HideStatus(StatusTicket),
    Scanned(Vec<ConversationRef>),
    Toggle(String),
    SelectAll,
    DeselectAll,
    DeleteStarted(Vec<String>),
    ItemProgress(DeleteProgress),
    DeleteFinished(DeletionOutcome),
}

impl Reducible for PopupState {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            PopupAction::Busy(busy) => {
                next.busy = busy;
                if !busy {
                    next.progress = None;
                    next.pending.clear();
                }
            }
            PopupAction::Status(ticket, message) => {
                next.status = Some(message);
                next.status_ticket = Some(ticket);
            }
            PopupAction::HideStatus(ticket) => {
                if next.status_ticket == Some(ticket) {
                    next.status = None;
                    next.status_ticket = None;
                }
            }
            PopupAction::Scanned(chats) => next.selection = ChatSelection::new(chats),
            PopupAction::Toggle(id) => next.selection.toggle(&id),
            PopupAction::SelectAll => next.selection.select_all(),
            PopupAction::DeselectAll => next.selection.deselect_all(),
            PopupAction::DeleteStarted(ids) => {
                next.busy = true;
                next.progress = Some(ProgressView {
                    percent: 0,
                    message: format!("Deleting {} chats...", ids.len()),
                });
                next.pending = ids;
            }
            PopupAction::ItemProgress(progress) => {
                if progress.status == ItemStatus::Deleted {
                    next.selection.remove(&[progress.id.as_str()]);
                }
                next.progress = Some(ProgressView {
                    percent: progress.percent(),
                    message: format!(
                        "Deleting {}/{} ({} failed)",
                        progress.index, progress.total, progress.failed_so_far
                    ),
                });
            }
            PopupAction::DeleteFinished(outcome) => {
                let deleted: Vec<String> = next
                    .pending
                    .iter()
                    .filter(|id| !outcome.is_failed(id))
                    .cloned()
                    .collect();
                next.selection.remove(deleted.as_slice());
                next.pending.clear();
                next.progress = None;
            }
        }

        next.into()
    }
}

/// The one-line summary shown when a delete run ends
pub fn summary_message(outcome: &DeletionOutcome) -> StatusMessage {
    match outcome.method {
        DeleteMethod::Bulk => StatusMessage::success(format!(
            "Successfully deleted {} chat(s) (bulk)",
            outcome.succeeded
        )),
        DeleteMethod::Individual if outcome.failed.is_empty() => {
            StatusMessage::success(format!("Successfully deleted {} chat(s)", outcome.succeeded))
        }
        DeleteMethod::Individual if outcome.succeeded == 0 => {
            StatusMessage::error(format!("Failed to delete chats ({} failed)", outcome.failed.len()))
        }
        DeleteMethod::Individual => StatusMessage::error(format!(
            "Deleted {} chats, {} failed",
            outcome.succeeded,
            outcome.failed.len()
        )),
    }
}
