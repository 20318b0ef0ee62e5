//! Position Reorder
//!
//! Drag rows of the positions table; the new order is POSTed when the
//! drag ends. The DOM keeps whatever order the user produced until the
//! page is resynchronized.

use leptos::task::spawn_local;
use row_dragdrop::{bind_sortable_rows, SortableOptions};

use crate::commands;
use crate::context::PageContext;
use crate::dom;
use crate::error::ApiError;

const TBODY_ID: &str = "positionsTbody";

/// Alert shown when the server does not accept the new order
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected(msg) => format!("Reorder failed: {}", msg),
        _ => "Reorder failed".to_string(),
    }
}

fn send_order(ctx: PageContext, order: Vec<String>) {
    let url = ctx.config().endpoints.positions_reorder.clone();
    log::info!(target: "reorder", "sending order {:?}", order);
    spawn_local(async move {
        match commands::reorder_positions(&url, order).await {
            Ok(()) => ctx.resync(),
            Err(e) => {
                log::error!(target: "reorder", "reorder rejected: {}", e);
                dom::alert(&failure_message(&e));
            }
        }
    });
}

pub fn wire(ctx: &PageContext) {
    let Some(tbody) = dom::by_id(TBODY_ID) else {
        return;
    };
    let ctx = ctx.clone();
    let rows = bind_sortable_rows(&tbody, SortableOptions::default(), move |order| send_order(ctx.clone(), order));
    log::debug!(target: "reorder", "{} sortable rows", rows);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(&ApiError::Rejected("Invalid position id: 99".into())),
            "Reorder failed: Invalid position id: 99"
        );
        assert_eq!(failure_message(&ApiError::Network("TypeError: Failed to fetch".into())), "Reorder failed");
        assert_eq!(failure_message(&ApiError::non_json(403, "/admin-ui/positions/reorder/", "<h1>Forbidden</h1>")), "Reorder failed");
    }
}
