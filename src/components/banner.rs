//! Banner Messages
//!
//! Dismissible Bootstrap alerts inserted at the top of a form. They
//! remove themselves after a few seconds.

use leptos::task::spawn_local;

use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class_name(self) -> &'static str {
        match self {
            BannerKind::Success => "alert alert-success alert-dismissible fade show",
            BannerKind::Error => "alert alert-danger alert-dismissible fade show",
        }
    }
}

/// Where the banner goes inside its host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

fn build(kind: BannerKind, message: &str) -> Option<web_sys::Element> {
    let doc = dom::document()?;
    let banner = doc.create_element("div").ok()?;
    banner.set_class_name(kind.class_name());
    banner.append_with_str_1(message).ok()?;
    let close = doc.create_element("button").ok()?;
    let _ = close.set_attribute("type", "button");
    close.set_class_name("btn-close");
    let _ = close.set_attribute("data-bs-dismiss", "alert");
    banner.append_child(&close).ok()?;
    Some(banner)
}

/// Show `message` in `host` for `dismiss_ms` milliseconds
pub fn show_in(host: &web_sys::Element, placement: Placement, kind: BannerKind, message: &str, dismiss_ms: u32) {
    match kind {
        BannerKind::Error => log::warn!(target: "banner", "{}", message),
        BannerKind::Success => log::info!(target: "banner", "{}", message),
    }
    let Some(banner) = build(kind, message) else { return };
    let inserted = match placement {
        Placement::First => host.insert_before(&banner, host.first_child().as_ref()),
        Placement::Last => host.append_child(&banner),
    };
    if inserted.is_err() {
        return;
    }
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(dismiss_ms).await;
        // Already gone if the user closed it
        if banner.parent_node().is_some() {
            banner.remove();
        }
    });
}

/// Banner at the top of the page's first form, gone after 5 s
pub fn show_message(kind: BannerKind, message: &str) {
    if let Some(form) = dom::query("form") {
        show_in(&form, Placement::First, kind, message, 5000);
    }
}
