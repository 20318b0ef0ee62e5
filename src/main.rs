#![allow(warnings)]
//! eBotar Admin Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod csrf;
mod dom;
mod error;
mod models;

use config::Config;
use context::PageContext;

fn main() {
    console_error_panic_hook::set_once();

    let (config, warning) = Config::load();
    let _ = console_logger::init(console_logger::parse_level(&config.log_level));
    if let Some(warning) = warning {
        log::warn!(target: "config", "{}", warning);
    }

    let ctx = PageContext::new(config);
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.ready_state() == "loading" {
        dom::listen(&doc, "DOMContentLoaded", move |_ev: web_sys::Event| app::wire_page(&ctx));
    } else {
        app::wire_page(&ctx);
    }
}
