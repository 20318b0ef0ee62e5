//! eBotar Admin Frontend
//!
//! Binds every widget to the current page.

use crate::components::{
    applications, candidate_form, course_select, department_delete, election, modal_populator, password_reset,
    position_reorder, profile, user_autocomplete, user_edit,
};
use crate::context::PageContext;

pub fn wire_page(ctx: &PageContext) {
    let modals = modal_populator::wire(ctx);
    log::debug!(target: "page", "{} edit modals bound", modals);

    password_reset::wire(ctx);
    user_edit::wire(ctx);
    position_reorder::wire(ctx);
    user_autocomplete::wire(ctx);
    course_select::wire(ctx);
    applications::wire(ctx);

    election::wire();
    profile::wire();
    candidate_form::wire();
    department_delete::wire();

    log::info!(target: "page", "widgets wired on {}", crate::dom::pathname());
}
