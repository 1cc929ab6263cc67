/// Rust side of the popup.js bridge (chrome.tabs / chrome.scripting)
use crate::client::{HostTransport, HttpRequest, HttpResponse};
use crate::error::{BridgeError, TransportError};
use crate::scanner::RawLink;
use async_trait::async_trait;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn scanNavigationLinks(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn readPageIdentity(tab_id: i32, storage_keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn pageFetch(tab_id: i32, request: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ActiveTab {
    pub id: i32,
    #[serde(default)]
    pub url: String,
}

/// Raw organization hints read from inside the page
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageIdentity {
    #[serde(default)]
    pub stored_user_data: Option<String>,
    #[serde(default)]
    pub initial_state_org_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FetchReply {
    Response(HttpResponse),
    Failure { error: String },
}

fn js_error(value: JsValue) -> BridgeError {
    if let Some(message) = value.as_string() {
        return BridgeError::Js(message);
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => BridgeError::Js(String::from(error.message())),
        None => BridgeError::Js(format!("{:?}", value)),
    }
}

fn decode<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, BridgeError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| BridgeError::Decode(e.to_string()))
}

pub async fn active_tab() -> Result<Option<ActiveTab>, BridgeError> {
    let tab_js = getActiveTab().await.map_err(js_error)?;
    decode(tab_js)
}

pub async fn navigation_links(tab_id: i32) -> Result<Vec<RawLink>, BridgeError> {
    let links_js = scanNavigationLinks(tab_id).await.map_err(js_error)?;
    decode(links_js)
}

pub async fn page_identity(tab_id: i32, storage_keys: &[String]) -> Result<PageIdentity, BridgeError> {
    let keys_js = serde_wasm_bindgen::to_value(storage_keys)
        .map_err(|e| BridgeError::Serialize(e.to_string()))?;
    let identity_js = readPageIdentity(tab_id, keys_js).await.map_err(js_error)?;
    decode(identity_js)
}

/// Sends requests from inside a tab, with that tab's cookies
#[derive(Debug, Clone, Copy)]
pub struct PageTransport {
    tab_id: i32,
}

impl PageTransport {
    pub fn new(tab_id: i32) -> Self {
        PageTransport { tab_id }
    }
}

#[async_trait(?Send)]
impl HostTransport for PageTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request_js = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| TransportError::Bridge(e.to_string()))?;

        let reply_js = pageFetch(self.tab_id, request_js)
            .await
            .map_err(|e| TransportError::Bridge(js_error(e).to_string()))?;

        match decode::<FetchReply>(reply_js) {
            Ok(FetchReply::Response(response)) => Ok(response),
            Ok(FetchReply::Failure { error }) => Err(TransportError::Network(error)),
            Err(e) => Err(TransportError::Bridge(e.to_string())),
        }
    }
}
