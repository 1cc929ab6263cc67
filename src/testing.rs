/// In-memory doubles for exercising the async delete flow without a browser
use crate::client::{DeletionClient, HostTransport, HttpMethod, HttpRequest, HttpResponse};
use crate::config::Endpoints;
use crate::conversation::{ConversationRef, DeletionOutcome, OrganizationId};
use crate::error::TransportError;
use crate::orchestrator::{DeleteObserver, DeleteProgress};
use crate::pacing::Pacer;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::future::Future;

pub fn block_on<F: Future>(future: F) -> F::Output {
    pollster::block_on(future)
}

pub fn org() -> OrganizationId {
    OrganizationId::parse("org-1").unwrap()
}

pub fn chats(ids: &[&str]) -> Vec<ConversationRef> {
    ids.iter()
        .map(|id| ConversationRef::new(id.to_string(), &format!("Chat {}", id), format!("/chat/{}", id), 50))
        .collect()
}

pub fn client_with(transport: ScriptedTransport) -> DeletionClient<ScriptedTransport> {
    DeletionClient::new(transport, Endpoints::new("https://claude.ai/api").unwrap())
}

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16, &'static str),
    Network(&'static str),
}

/// Answers requests from a route table (method + URL suffix); unmatched requests get a 404
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<(HttpMethod, String, Reply)>,
    log: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        ScriptedTransport::default()
    }

    pub fn on(mut self, method: HttpMethod, url_suffix: &str, reply: Reply) -> Self {
        self.routes.push((method, url_suffix.to_string(), reply));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.borrow().clone()
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.log.borrow().iter().filter(|r| r.method == method).count()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.method == HttpMethod::Delete)
            .filter_map(|r| r.url.rsplit('/').next().map(str::to_string))
            .collect()
    }
}

#[async_trait(?Send)]
impl HostTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self
            .routes
            .iter()
            .find(|(method, suffix, _)| *method == request.method && request.url.ends_with(suffix.as_str()))
            .map(|(_, _, reply)| *reply)
            .unwrap_or(Reply::Status(404, ""));

        self.log.borrow_mut().push(request);

        match reply {
            Reply::Status(status, body) => Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            Reply::Network(message) => Err(TransportError::Network(message.to_string())),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub progress: RefCell<Vec<DeleteProgress>>,
    pub completed: RefCell<Vec<DeletionOutcome>>,
}

impl DeleteObserver for RecordingObserver {
    fn on_progress(&self, progress: &DeleteProgress) {
        self.progress.borrow_mut().push(progress.clone());
    }

    fn on_complete(&self, outcome: &DeletionOutcome) {
        self.completed.borrow_mut().push(outcome.clone());
    }
}

#[derive(Default)]
pub struct CountingPacer {
    pub pauses: Cell<usize>,
}

#[async_trait(?Send)]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.set(self.pauses.get() + 1);
    }
}
