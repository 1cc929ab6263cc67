/// Reusable UI components

use crate::conversation::ConversationRef;
use crate::ui::state::{StatusKind, StatusMessage};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub progress: u8, // 0-100
    #[prop_or_default]
    pub label: Option<String>,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let progress = props.progress.min(100);

    html! {
        <div class="progress-block">
            if let Some(label) = &props.label {
                <p class="progress-label">{label}</p>
            }
            <div class="progress-container">
                <div class="progress-fill" style={format!("width: {}%", progress)}>
                    {format!("{}%", progress)}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub status: StatusMessage,
}

/// Stylesheet class for each kind of status (see popup.css)
pub fn status_class(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Info => "status-info",
        StatusKind::Success => "status-success",
        StatusKind::Error => "status-error",
    }
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    html! {
        <div class={classes!("status", status_class(props.status.kind))}>
            <p class="message-paragraph">{&props.status.text}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatRowProps {
    pub chat: ConversationRef,
    pub index: usize,
    pub checked: bool,
    #[prop_or(false)]
    pub disabled: bool,
    pub on_toggle: Callback<String>,
}

/// One checkbox line in the chat list
#[function_component(ChatRow)]
pub fn chat_row(props: &ChatRowProps) -> Html {
    let input_id = format!("chat-{}", props.index);

    let onchange = {
        let on_toggle = props.on_toggle.clone();
        let id = props.chat.id.clone();
        Callback::from(move |_: Event| on_toggle.emit(id.clone()))
    };

    html! {
        <div class="chat-item">
            <input
                type="checkbox"
                id={input_id.clone()}
                checked={props.checked}
                disabled={props.disabled}
                {onchange}
            />
            <label for={input_id} title={props.chat.title.clone()}>{&props.chat.title}</label>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes_differ_by_kind() {
        assert_eq!(status_class(StatusKind::Info), "status-info");
        assert_eq!(status_class(StatusKind::Success), "status-success");
        assert_eq!(status_class(StatusKind::Error), "status-error");
    }
}
