//! Password Reset
//!
//! Confirm-then-POST reset for a user row, and the overlay that reveals
//! the generated password.

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::commands;
use crate::config;
use crate::context::PageContext;
use crate::dom;
use crate::models::ResetPasswordResult;

const PW_MODAL_ID: &str = "pwModal";
const USERNAME_SLOT: &str = ".js-username";
const PASSWORD_SLOT: &str = ".js-password";
const COPY_BTN_ID: &str = "copyPwBtn";
const COPIED_MS: u32 = 1500;

/// Reset endpoint for a user.
///
/// The button's own `data-reset-url` wins; then a page-level
/// `data-reset-url-template` (with a `/0/` placeholder); then the
/// configured template.
pub fn resolve_reset_url(
    button_url: Option<&str>,
    page_template: Option<&str>,
    default_template: &str,
    user_id: &str,
) -> String {
    if let Some(url) = button_url.filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    match page_template.filter(|t| !t.is_empty()) {
        Some(tpl) if tpl.contains("/0/") => tpl.replacen("/0/", &format!("/{}/", user_id), 1),
        Some(tpl) => format!("{}{}/", tpl, user_id),
        None => config::expand(default_template, user_id),
    }
}

/// Text written into each slot of the overlay
pub fn overlay_texts(result: &ResetPasswordResult) -> [(&'static str, &str); 2] {
    [(USERNAME_SLOT, result.username.as_str()), (PASSWORD_SLOT, result.new_password.as_str())]
}

fn set_body_scroll(locked: bool) {
    if let Some(body) = dom::document().and_then(|doc| doc.body()) {
        let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
    }
}

pub fn open_password_modal(result: &ResetPasswordResult) {
    let Some(overlay) = dom::by_id(PW_MODAL_ID) else {
        log::error!(target: "password_reset", "password modal element not found");
        return;
    };
    for (slot, text) in overlay_texts(result) {
        if let Some(el) = dom::query_in(&overlay, slot) {
            dom::set_text(&el, text);
        }
    }
    dom::toggle_class(&overlay, "show", true);
    set_body_scroll(true);
    if let Some(html) = overlay.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.focus();
    }
}

pub fn close_password_modal() {
    let Some(overlay) = dom::by_id(PW_MODAL_ID) else {
        return;
    };
    dom::toggle_class(&overlay, "show", false);
    set_body_scroll(false);
}

fn copy_password() {
    let Some(password) = dom::query(&format!("#{} {}", PW_MODAL_ID, PASSWORD_SLOT)).and_then(|el| el.text_content()) else {
        return;
    };
    let Some(win) = dom::window() else { return };
    let promise = win.navigator().clipboard().write_text(&password);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!(target: "password_reset", "clipboard write failed: {:?}", e);
            return;
        }
        let Some(btn) = dom::by_id(COPY_BTN_ID) else { return };
        let old = btn.text_content().unwrap_or_default();
        dom::set_text(&btn, "Copied!");
        gloo_timers::future::TimeoutFuture::new(COPIED_MS).await;
        dom::set_text(&btn, &old);
    });
}

fn reset_password(ctx: &PageContext, button: &web_sys::Element) {
    let user_id = dom::attr(button, "data-user-id");
    let username = dom::attr(button, "data-username");
    if !dom::confirm(&format!("Reset password for {}?", username)) {
        return;
    }

    let page_template = dom::query("[data-reset-url-template]").and_then(|el| el.get_attribute("data-reset-url-template"));
    let url = resolve_reset_url(
        button.get_attribute("data-reset-url").as_deref(),
        page_template.as_deref(),
        &ctx.config().endpoints.reset_password,
        &user_id,
    );

    log::info!(target: "password_reset", "resetting password for {}", username);
    spawn_local(async move {
        match commands::reset_password(&url).await {
            Ok(result) => open_password_modal(&result),
            Err(e) => {
                log::error!(target: "password_reset", "{} failed: {}", url, e);
                dom::alert(&e.alert_text("Error"));
            }
        }
    });
}

pub fn wire(ctx: &PageContext) {
    for button in dom::query_all(".reset-btn") {
        let ctx = ctx.clone();
        let this = button.clone();
        dom::listen(&button, "click", move |_ev: web_sys::MouseEvent| reset_password(&ctx, &this));
    }

    if dom::by_id(PW_MODAL_ID).is_none() {
        return;
    }
    for close in dom::query_all(&format!("#{} [data-pw-close]", PW_MODAL_ID)) {
        dom::listen(&close, "click", |_ev: web_sys::MouseEvent| close_password_modal());
    }
    if let Some(copy) = dom::by_id(COPY_BTN_ID) {
        dom::listen(&copy, "click", |_ev: web_sys::MouseEvent| copy_password());
    }
    if let Some(doc) = dom::document() {
        dom::listen(&doc, "keydown", |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Escape" {
                close_password_modal();
            }
        });
    }
}
