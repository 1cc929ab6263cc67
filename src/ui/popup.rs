/// Popup UI for the Chat Bulk Delete extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use gloo_timers::future::TimeoutFuture;
use patternfly_yew::prelude::*;
use std::rc::Rc;
use crate::bridge::{self, ActiveTab, PageIdentity, PageTransport};
use crate::client::DeletionClient;
use crate::config::{DeleteConfig, Endpoints};
use crate::conversation::{ConversationRef, DeletionOutcome};
use crate::error::PopupError;
use crate::identity::{DiscoverySource, IdentityResolver, InitialStateSource, StoredUserDataSource};
use crate::orchestrator::{DeleteObserver, DeleteOrchestrator, DeleteProgress};
use crate::pacing::FixedInterval;
use crate::scanner::ChatLinkScanner;
use crate::ui::components::{ChatRow, ProgressBar, StatusBanner};
use crate::ui::state::{PopupAction, PopupState, StatusMessage, StatusTicket, summary_message};

const REFRESH_TIP: &str = "Tip: Refresh the page to see updated chat list";

#[derive(Properties, PartialEq, Default)]
pub struct PopupProps {
    #[prop_or_default]
    pub config: Rc<DeleteConfig>,
}

/// Feeds orchestrator events into the popup reducer
struct PopupObserver {
    dispatcher: UseReducerDispatcher<PopupState>,
}

impl DeleteObserver for PopupObserver {
    fn on_progress(&self, progress: &DeleteProgress) {
        self.dispatcher.dispatch(PopupAction::ItemProgress(progress.clone()));
    }

    fn on_complete(&self, outcome: &DeletionOutcome) {
        self.dispatcher.dispatch(PopupAction::DeleteFinished(outcome.clone()));
    }
}

#[function_component(App)]
pub fn app(props: &PopupProps) -> Html {
    let state = use_reducer(PopupState::default);
    let config = props.config.clone();

    // Scan handler
    let on_scan = {
        let dispatcher = state.dispatcher();
        let config = config.clone();

        Callback::from(move |_| {
            let dispatcher = dispatcher.clone();
            let config = config.clone();

            dispatcher.dispatch(PopupAction::Busy(true));
            show_status(&dispatcher, &config, StatusMessage::info("Scanning chats..."));

            spawn_local(async move {
                match scan_chats(&config).await {
                    Ok(chats) if chats.is_empty() => {
                        dispatcher.dispatch(PopupAction::Scanned(chats));
                        show_status(&dispatcher, &config, StatusMessage::info("No chats found"));
                    }
                    Ok(chats) => {
                        let count = chats.len();
                        dispatcher.dispatch(PopupAction::Scanned(chats));
                        show_status(&dispatcher, &config, StatusMessage::success(format!("Found {} chats", count)));
                    }
                    Err(e) => {
                        log::error!("scan failed: {}", e);
                        show_status(&dispatcher, &config, StatusMessage::error(format!("Error: {}", e)));
                    }
                }
                dispatcher.dispatch(PopupAction::Busy(false));
            });
        })
    };

    let on_select_all = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(PopupAction::SelectAll))
    };

    let on_deselect_all = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(PopupAction::DeselectAll))
    };

    let on_toggle = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: String| dispatcher.dispatch(PopupAction::Toggle(id)))
    };

    // Delete handler
    let on_delete = {
        let state = state.clone();
        let config = config.clone();

        Callback::from(move |_| {
            let selected = state.selection.selected();
            if selected.is_empty() || !confirm_delete(selected.len()) {
                return;
            }

            let dispatcher = state.dispatcher();
            let config = config.clone();

            let ids: Vec<String> = selected.iter().map(|c| c.id.clone()).collect();
            dispatcher.dispatch(PopupAction::DeleteStarted(ids));
            show_status(
                &dispatcher,
                &config,
                StatusMessage::info(format!("Deleting {} chats...", selected.len())),
            );

            spawn_local(async move {
                let observer = PopupObserver {
                    dispatcher: dispatcher.clone(),
                };

                match delete_chats(&config, &selected, &observer).await {
                    Ok(outcome) => {
                        if !outcome.failed.is_empty() {
                            log::warn!("Some chats failed to delete: {:?}", outcome.failed);
                        }
                        show_status(&dispatcher, &config, summary_message(&outcome));

                        if outcome.succeeded > 0 {
                            let dispatcher = dispatcher.clone();
                            let config = config.clone();
                            spawn_local(async move {
                                TimeoutFuture::new(config.refresh_tip_ms).await;
                                show_status(&dispatcher, &config, StatusMessage::info(REFRESH_TIP));
                            });
                        }
                    }
                    Err(e) => {
                        log::error!("delete failed: {}", e);
                        show_status(&dispatcher, &config, StatusMessage::error(format!("Error deleting chats: {}", e)));
                    }
                }
                dispatcher.dispatch(PopupAction::Busy(false));
            });
        })
    };

    let is_busy = state.busy;
    let selection = &state.selection;

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Chat Bulk Delete"}</h1>

            <Button onclick={on_scan} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                {"Scan Chats"}
            </Button>

            // Status display
            if let Some(status) = state.status.clone() {
                <StatusBanner {status} />
            }

            if is_busy && state.progress.is_none() {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            if let Some(progress) = state.progress.clone() {
                <ProgressBar progress={progress.percent} label={Some(progress.message)} />
            }

            // Chat list (hidden until a scan finds something)
            if !selection.is_empty() {
                <div id="chatListContainer" class="chat-list-container">
                    <div class="flex-row-gap">
                        <Button onclick={on_select_all} disabled={is_busy} variant={ButtonVariant::Secondary}>
                            {"Select All"}
                        </Button>
                        <Button onclick={on_deselect_all} disabled={is_busy} variant={ButtonVariant::Secondary}>
                            {"Deselect All"}
                        </Button>
                    </div>

                    <div id="chatList" class="chat-list">
                        {for selection.chats().iter().enumerate().map(|(index, chat)| html! {
                            <ChatRow
                                key={chat.id.clone()}
                                chat={chat.clone()}
                                {index}
                                checked={selection.is_selected(&chat.id)}
                                disabled={is_busy}
                                on_toggle={on_toggle.clone()}
                            />
                        })}
                    </div>

                    <Button
                        onclick={on_delete}
                        disabled={is_busy || !selection.can_delete()}
                        variant={ButtonVariant::Danger}
                        block={true}
                    >
                        {selection.delete_label()}
                    </Button>
                </div>
            }

            <p class="footer-popup">
                {"Chat Bulk Delete v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn show_status(dispatcher: &UseReducerDispatcher<PopupState>, config: &DeleteConfig, message: StatusMessage) {
    let ticket = StatusTicket::next();
    let auto_hides = message.auto_hides();
    dispatcher.dispatch(PopupAction::Status(ticket, message));

    if auto_hides {
        let dispatcher = dispatcher.clone();
        let delay = config.status_hide_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            dispatcher.dispatch(PopupAction::HideStatus(ticket));
        });
    }
}

fn confirm_delete(count: usize) -> bool {
    let message = format!(
        "Are you sure you want to delete {} chat(s)? This action cannot be undone.",
        count
    );

    web_sys::window()
        .and_then(|window| window.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

async fn host_tab(config: &DeleteConfig) -> Result<ActiveTab, PopupError> {
    let tab = bridge::active_tab().await?.ok_or(PopupError::NoActiveTab)?;

    if !config.is_host_url(&tab.url) {
        return Err(PopupError::NotOnHost(config.host.clone()));
    }

    Ok(tab)
}

async fn scan_chats(config: &DeleteConfig) -> Result<Vec<ConversationRef>, PopupError> {
    let scanner = ChatLinkScanner::new(config)?;
    let tab = host_tab(config).await?;
    let links = bridge::navigation_links(tab.id).await?;

    Ok(scanner.scan(&links))
}

async fn delete_chats(
    config: &DeleteConfig,
    selected: &[ConversationRef],
    observer: &dyn DeleteObserver,
) -> Result<DeletionOutcome, PopupError> {
    let endpoints = Endpoints::new(&config.api_base)?;
    let tab = host_tab(config).await?;

    // Unreadable page state just means the first two sources come up empty
    let page = match bridge::page_identity(tab.id, &config.user_data_keys).await {
        Ok(page) => page,
        Err(e) => {
            log::debug!("could not read page identity: {}", e);
            PageIdentity::default()
        }
    };

    let client = DeletionClient::new(PageTransport::new(tab.id), endpoints);
    let identity = IdentityResolver::new()
        .with_source(StoredUserDataSource::new(page.stored_user_data))
        .with_source(InitialStateSource::new(page.initial_state_org_id))
        .with_source(DiscoverySource::new(&client));
    let pacer = FixedInterval::default();

    let outcome = DeleteOrchestrator::new(&client, &identity, &pacer)
        .run(selected, observer)
        .await?;

    log::info!(
        "deleted {}/{} chats ({:?})",
        outcome.succeeded,
        outcome.attempted,
        outcome.method
    );

    Ok(outcome)
}
