//! User Commands
//!
//! Password reset, edit-user lookup/save and search-as-you-type.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::http::{self, Body, FetchRequest};
use crate::error::ApiError;
use crate::models::{AutocompleteResults, ResetPasswordResult, UserDetails, UserHit};

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_query(q: &str) -> String {
    utf8_percent_encode(q, URI_COMPONENT).to_string()
}

fn reset_request(url: &str) -> FetchRequest<'_> {
    FetchRequest::post(url, Body::Empty)
}

fn edit_request(action: &str, data: web_sys::FormData) -> FetchRequest<'_> {
    FetchRequest::post(action, Body::Form(data))
}

pub async fn reset_password(url: &str) -> Result<ResetPasswordResult, ApiError> {
    let resp = http::send(reset_request(url)).await?;
    http::read_envelope(&resp, url).await
}

/// `{pathname}?get_user_data={id}`
pub fn user_data_url(pathname: &str, user_id: &str) -> String {
    format!("{}?get_user_data={}", pathname, encode_query(user_id))
}

pub async fn get_user_data(pathname: &str, user_id: &str) -> Result<UserDetails, ApiError> {
    let url = user_data_url(pathname, user_id);
    let resp = http::send(FetchRequest::get(&url)).await?;
    http::read_envelope(&resp, &url).await
}

pub async fn save_user_edit(action: &str, form: &web_sys::HtmlFormElement) -> Result<(), ApiError> {
    let data = web_sys::FormData::new_with_form(form)
        .map_err(|e| ApiError::Network(http::js_error_text(&e)))?;
    let resp = http::send(edit_request(action, data)).await?;
    http::read_envelope::<serde::de::IgnoredAny>(&resp, action).await?;
    Ok(())
}

pub fn autocomplete_url(endpoint: &str, q: &str) -> String {
    format!("{}?q={}", endpoint, encode_query(q))
}

pub async fn autocomplete_users(endpoint: &str, q: &str) -> Result<Vec<UserHit>, ApiError> {
    let url = autocomplete_url(endpoint, q);
    let resp = http::send(FetchRequest::get(&url)).await?;
    let parsed: AutocompleteResults = http::read_json(&resp).await?;
    Ok(parsed.results)
}
