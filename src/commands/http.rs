//! Fetch Wrapper
//!
//! One request per call, no retry, no timeout. Mutating requests carry
//! the CSRF header; JSON endpoints are checked for a JSON content type
//! and unwrapped from the `{success, error, ...}` envelope.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use crate::error::ApiError;

pub(crate) enum Body {
    Empty,
    Json(String),
    Form(web_sys::FormData),
}

/// Shape of a body, as far as headers care
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BodyKind {
    Empty,
    Json,
    Form,
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Empty => BodyKind::Empty,
            Body::Json(_) => BodyKind::Json,
            Body::Form(_) => BodyKind::Form,
        }
    }
}

pub(crate) struct FetchRequest<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub body: Body,
    /// Attach `X-CSRFToken`
    pub csrf: bool,
    /// Send `Accept: application/json` and `X-Requested-With`
    pub expect_json: bool,
}

impl<'a> FetchRequest<'a> {
    pub fn get(url: &'a str) -> Self {
        Self { method: "GET", url, body: Body::Empty, csrf: false, expect_json: true }
    }

    pub fn post(url: &'a str, body: Body) -> Self {
        Self { method: "POST", url, body, csrf: true, expect_json: true }
    }

    /// Headers to set, given the page's CSRF token
    pub fn headers(&self, token: &str) -> Vec<(&'static str, String)> {
        request_headers(self.body.kind(), self.csrf, self.expect_json, token)
    }
}

/// Form bodies get their multipart `Content-Type` from the browser.
pub(crate) fn request_headers(
    body: BodyKind,
    csrf: bool,
    expect_json: bool,
    token: &str,
) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();
    if body == BodyKind::Json {
        headers.push(("Content-Type", "application/json".to_string()));
    }
    if expect_json {
        headers.push(("Accept", "application/json".to_string()));
        headers.push(("X-Requested-With", "XMLHttpRequest".to_string()));
    }
    if csrf {
        headers.push((crate::csrf::HEADER, token.to_string()));
    }
    headers
}

/// Text of a JS error the way `String(err)` renders it
pub(crate) fn js_error_text(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        format!("{}: {}", String::from(e.name()), String::from(e.message()))
    } else if let Some(s) = err.as_string() {
        s
    } else {
        format!("{:?}", err)
    }
}

fn network(err: JsValue) -> ApiError {
    ApiError::Network(js_error_text(&err))
}

pub(crate) async fn send(fetch: FetchRequest<'_>) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("No window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method(fetch.method);
    opts.set_credentials(RequestCredentials::SameOrigin);
    match &fetch.body {
        Body::Empty => {}
        Body::Json(text) => opts.set_body(&JsValue::from_str(text)),
        Body::Form(data) => opts.set_body(data.as_ref()),
    }

    let req = Request::new_with_str_and_init(fetch.url, &opts).map_err(network)?;
    let token = if fetch.csrf { crate::csrf::token() } else { String::new() };
    let headers = req.headers();
    for (name, value) in fetch.headers(&token) {
        headers.set(name, &value).map_err(network)?;
    }

    log::debug!(target: "http", "{} {}", fetch.method, fetch.url);
    let resp_value = JsFuture::from(window.fetch_with_request(&req)).await.map_err(network)?;
    resp_value.dyn_into::<Response>().map_err(network)
}

pub(crate) async fn body_text(resp: &Response) -> Result<String, ApiError> {
    let text = JsFuture::from(resp.text().map_err(network)?).await.map_err(network)?;
    Ok(text.as_string().unwrap_or_default())
}

pub(crate) fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json")
}

/// Read a JSON body, rejecting other content types with a body preview
pub(crate) async fn read_checked_text(resp: &Response, url: &str) -> Result<String, ApiError> {
    let content_type = resp.headers().get("content-type").ok().flatten().unwrap_or_default();
    let text = body_text(resp).await?;
    if !is_json(&content_type) {
        let shown_url = Some(resp.url()).filter(|u| !u.is_empty()).unwrap_or_else(|| url.to_string());
        log::warn!(target: "http", "non-JSON response {} from {}", resp.status(), shown_url);
        return Err(ApiError::non_json(resp.status(), &shown_url, &text));
    }
    Ok(text)
}

/// Content-type check + envelope
pub(crate) async fn read_envelope<T: DeserializeOwned>(resp: &Response, url: &str) -> Result<T, ApiError> {
    let text = read_checked_text(resp, url).await?;
    parse_envelope(&text)
}

/// Plain JSON body, no content-type check and no envelope
pub(crate) async fn read_json<T: DeserializeOwned>(resp: &Response) -> Result<T, ApiError> {
    let text = body_text(resp).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Fail on non-2xx before looking at the body
pub(crate) fn ensure_ok(resp: &Response) -> Result<(), ApiError> {
    if resp.ok() {
        Ok(())
    } else {
        Err(ApiError::Http { status: resp.status() })
    }
}

/// `{"success": true, ...}` -> `T`; anything else -> `Rejected`
pub(crate) fn parse_envelope<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let success = value.get("success").and_then(|v| v.as_bool()).unwrap_or(false);
    if !success {
        let msg = value
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown error");
        return Err(ApiError::Rejected(msg.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}
