/// Bulk-then-sequential deletion of selected conversations
///
/// Algorithm:
/// 1. Resolve the organization id once; without it nothing is sent
/// 2. Try a single bulk delete with every selected id
/// 3. If the bulk call was rejected, or its fate is unknown, delete each id on
///    its own in selection order, pausing between requests
/// 4. Report one outcome
///
/// A failed bulk call re-traverses the whole selection: the host reports bulk
/// deletes as all-or-nothing, so there is no partial result to resume from.
use crate::client::{BulkDeleteResult, DeletionClient, HostTransport};
use crate::conversation::{ConversationRef, DeleteMethod, DeletionOutcome, ItemFailure, OrganizationId};
use crate::error::DeleteError;
use crate::identity::IdentityResolver;
use crate::pacing::Pacer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemStatus {
    Deleted,
    Failed(String),
}

/// Emitted after every attempt on the sequential path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteProgress {
    /// 1-based
    pub index: usize,
    pub total: usize,
    pub id: String,
    pub status: ItemStatus,
    pub succeeded_so_far: usize,
    pub failed_so_far: usize,
}

impl DeleteProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.index * 100) / self.total).min(100) as u8
    }
}

pub trait DeleteObserver {
    fn on_progress(&self, _progress: &DeleteProgress) {}

    fn on_complete(&self, _outcome: &DeletionOutcome) {}
}

pub struct DeleteOrchestrator<'a, T, P> {
    client: &'a DeletionClient<T>,
    identity: &'a IdentityResolver<'a>,
    pacer: &'a P,
}

impl<'a, T: HostTransport, P: Pacer> DeleteOrchestrator<'a, T, P> {
    pub fn new(client: &'a DeletionClient<T>, identity: &'a IdentityResolver<'a>, pacer: &'a P) -> Self {
        DeleteOrchestrator {
            client,
            identity,
            pacer,
        }
    }

    pub async fn run(
        &self,
        selection: &[ConversationRef],
        observer: &dyn DeleteObserver,
    ) -> Result<DeletionOutcome, DeleteError> {
        if selection.is_empty() {
            return Err(DeleteError::EmptySelection);
        }

        let Some(org) = self.identity.resolve().await else {
            log::warn!("could not determine organization id, nothing deleted");
            return Err(DeleteError::OrganizationUnresolved);
        };

        let ids: Vec<String> = selection.iter().map(|c| c.id.clone()).collect();

        let outcome = match self.client.bulk_delete(&org, &ids).await {
            BulkDeleteResult::AllSucceeded(count) => {
                log::info!("bulk deleted {} conversations", count);
                DeletionOutcome::bulk(count)
            }
            BulkDeleteResult::AllFailed(detail) => {
                log::info!("bulk delete failed ({}), falling back to individual deletes", detail);
                self.delete_individually(&org, &ids, observer).await
            }
            // may have been applied; handled like AllFailed
            BulkDeleteResult::Unknown(detail) => {
                log::info!("bulk delete error ({}), falling back to individual deletes", detail);
                self.delete_individually(&org, &ids, observer).await
            }
        };

        observer.on_complete(&outcome);
        Ok(outcome)
    }

    async fn delete_individually(
        &self,
        org: &OrganizationId,
        ids: &[String],
        observer: &dyn DeleteObserver,
    ) -> DeletionOutcome {
        let total = ids.len();
        let mut succeeded = 0;
        let mut failed = Vec::new();

        for (position, id) in ids.iter().enumerate() {
            let status = match self.client.single_delete(org, id).await {
                Ok(()) => {
                    succeeded += 1;
                    log::debug!("deleted conversation {}", id);
                    ItemStatus::Deleted
                }
                Err(error) => {
                    log::warn!("failed to delete conversation {}: {}", id, error);
                    failed.push(ItemFailure {
                        id: id.clone(),
                        error: error.clone(),
                    });
                    ItemStatus::Failed(error)
                }
            };

            observer.on_progress(&DeleteProgress {
                index: position + 1,
                total,
                id: id.clone(),
                status,
                succeeded_so_far: succeeded,
                failed_so_far: failed.len(),
            });

            if position + 1 < total {
                self.pacer.pause().await;
            }
        }

        DeletionOutcome {
            attempted: total,
            succeeded,
            failed,
            method: DeleteMethod::Individual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;
    use crate::identity::{DiscoverySource, InitialStateSource, StoredUserDataSource};
    use crate::pacing::NoPacing;
    use crate::testing::{
        CountingPacer, RecordingObserver, Reply, ScriptedTransport, block_on, chats, client_with,
    };

    fn known_org<'a>() -> IdentityResolver<'a> {
        IdentityResolver::new().with_source(InitialStateSource::new(Some("org-1".to_string())))
    }

    fn run(
        transport: ScriptedTransport,
        selection: &[ConversationRef],
    ) -> (
        Result<DeletionOutcome, DeleteError>,
        DeletionClient<ScriptedTransport>,
        RecordingObserver,
        usize,
    ) {
        let client = client_with(transport);
        let identity = known_org();
        let pacer = CountingPacer::default();
        let observer = RecordingObserver::default();

        let result = block_on(DeleteOrchestrator::new(&client, &identity, &pacer).run(selection, &observer));
        let pauses = pacer.pauses.get();
        (result, client, observer, pauses)
    }

    #[test]
    fn test_bulk_success() {
        let selection = chats(&["A", "B", "C"]);
        let transport = ScriptedTransport::new().on(HttpMethod::Post, "/delete_many", Reply::Status(200, "{}"));

        let (result, client, observer, pauses) = run(transport, &selection);
        let outcome = result.unwrap();

        assert_eq!(outcome, DeletionOutcome::bulk(3));
        assert_eq!(client.transport().count(HttpMethod::Delete), 0);
        assert!(observer.progress.borrow().is_empty());
        assert_eq!(*observer.completed.borrow(), vec![outcome]);
        assert_eq!(pauses, 0);
    }

    #[test]
    fn test_bulk_failure_falls_back_in_order() {
        let selection = chats(&["A", "B", "C"]);
        let transport = ScriptedTransport::new()
            .on(HttpMethod::Post, "/delete_many", Reply::Status(500, ""))
            .on(HttpMethod::Delete, "/chat_conversations/A", Reply::Status(200, ""))
            .on(HttpMethod::Delete, "/chat_conversations/B", Reply::Status(404, ""))
            .on(HttpMethod::Delete, "/chat_conversations/C", Reply::Status(204, ""));

        let (result, client, observer, pauses) = run(transport, &selection);
        let outcome = result.unwrap();

        assert_eq!(
            outcome,
            DeletionOutcome {
                attempted: 3,
                succeeded: 2,
                failed: vec![ItemFailure {
                    id: "B".to_string(),
                    error: "HTTP 404".to_string(),
                }],
                method: DeleteMethod::Individual,
            }
        );
        assert!(outcome.is_consistent());
        assert_eq!(client.transport().deleted_ids(), vec!["A", "B", "C"]);
        assert_eq!(pauses, 2);
        assert_eq!(observer.completed.borrow().len(), 1);
    }

    #[test]
    fn test_progress_events_track_running_counts() {
        let selection = chats(&["A", "B", "C"]);
        let transport = ScriptedTransport::new()
            .on(HttpMethod::Post, "/delete_many", Reply::Status(500, ""))
            .on(HttpMethod::Delete, "/chat_conversations/A", Reply::Status(200, ""))
            .on(HttpMethod::Delete, "/chat_conversations/B", Reply::Network("reset"))
            .on(HttpMethod::Delete, "/chat_conversations/C", Reply::Status(200, ""));

        let (_, _, observer, _) = run(transport, &selection);
        let progress = observer.progress.borrow();

        assert_eq!(progress.len(), 3);
        assert_eq!(progress[0].index, 1);
        assert_eq!(progress[0].status, ItemStatus::Deleted);
        assert_eq!(progress[1].id, "B");
        assert_eq!(progress[1].status, ItemStatus::Failed("reset".to_string()));
        assert_eq!((progress[1].succeeded_so_far, progress[1].failed_so_far), (1, 1));
        assert_eq!((progress[2].index, progress[2].total), (3, 3));
        assert_eq!((progress[2].succeeded_so_far, progress[2].failed_so_far), (2, 1));
        assert_eq!(progress[2].percent(), 100);
    }

    #[test]
    fn test_unknown_bulk_result_treated_as_failure() {
        let selection = chats(&["A", "B"]);
        let transport = ScriptedTransport::new()
            .on(HttpMethod::Post, "/delete_many", Reply::Network("timed out"))
            .on(HttpMethod::Delete, "/chat_conversations/A", Reply::Status(200, ""))
            .on(HttpMethod::Delete, "/chat_conversations/B", Reply::Status(200, ""));

        let (result, client, _, _) = run(transport, &selection);
        let outcome = result.unwrap();

        assert_eq!(outcome.method, DeleteMethod::Individual);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(client.transport().count(HttpMethod::Delete), 2);
    }

    #[test]
    fn test_every_item_attempted_once_even_when_all_fail() {
        let selection = chats(&["A", "B", "C", "D"]);
        let transport = ScriptedTransport::new().on(HttpMethod::Post, "/delete_many", Reply::Status(503, ""));

        let (result, client, _, pauses) = run(transport, &selection);
        let outcome = result.unwrap();

        assert_eq!(outcome.attempted, 4);
        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed.len(), 4);
        assert!(outcome.is_consistent());
        assert_eq!(client.transport().deleted_ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(pauses, 3);
    }

    #[test]
    fn test_single_item_fallback_never_pauses() {
        let selection = chats(&["A"]);
        let transport = ScriptedTransport::new()
            .on(HttpMethod::Post, "/delete_many", Reply::Status(400, "bad"))
            .on(HttpMethod::Delete, "/chat_conversations/A", Reply::Status(200, ""));

        let (result, _, _, pauses) = run(transport, &selection);

        assert_eq!(result.unwrap().succeeded, 1);
        assert_eq!(pauses, 0);
    }

    #[test]
    fn test_unresolved_organization_sends_no_deletes() {
        let selection = chats(&["A", "B", "C"]);
        let client = client_with(
            ScriptedTransport::new()
                .on(HttpMethod::Get, "/organizations", Reply::Status(500, ""))
                .on(HttpMethod::Post, "/delete_many", Reply::Status(200, "")),
        );
        let identity = IdentityResolver::new()
            .with_source(StoredUserDataSource::new(Some("garbage".to_string())))
            .with_source(InitialStateSource::new(None))
            .with_source(DiscoverySource::new(&client));
        let observer = RecordingObserver::default();

        let result = block_on(DeleteOrchestrator::new(&client, &identity, &NoPacing).run(&selection, &observer));

        assert_eq!(result, Err(DeleteError::OrganizationUnresolved));
        assert_eq!(client.transport().count(HttpMethod::Post), 0);
        assert_eq!(client.transport().count(HttpMethod::Delete), 0);
        assert!(observer.completed.borrow().is_empty());
    }

    #[test]
    fn test_empty_selection_rejected() {
        let (result, client, _, _) = run(ScriptedTransport::new(), &[]);

        assert_eq!(result, Err(DeleteError::EmptySelection));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_attempted_matches_selection_size() {
        for size in 1..=5 {
            let ids: Vec<String> = (0..size).map(|i| format!("c{}", i)).collect();
            let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let selection = chats(&id_refs);

            let bulk = ScriptedTransport::new().on(HttpMethod::Post, "/delete_many", Reply::Status(200, ""));
            assert_eq!(run(bulk, &selection).0.unwrap().attempted, size);

            let fallback = ScriptedTransport::new().on(HttpMethod::Post, "/delete_many", Reply::Status(500, ""));
            assert_eq!(run(fallback, &selection).0.unwrap().attempted, size);
        }
    }
}
