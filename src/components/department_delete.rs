//! Department Deletion
//!
//! The "reassign courses" choice reveals the target department select,
//! and the form refuses to submit without a complete choice.

use crate::dom;

const REASSIGN: &str = "reassign_courses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoiceError {
    NoAction,
    NoTarget,
}

impl DeleteChoiceError {
    pub fn message(self) -> &'static str {
        match self {
            DeleteChoiceError::NoAction => "Please select an action before proceeding.",
            DeleteChoiceError::NoTarget => "Please select a department to reassign courses to.",
        }
    }
}

/// `action` is the checked radio's value; `target` the reassignment department id.
pub fn check_choice(action: Option<&str>, target: &str) -> Result<(), DeleteChoiceError> {
    match action {
        None => Err(DeleteChoiceError::NoAction),
        Some(REASSIGN) if target.is_empty() => Err(DeleteChoiceError::NoTarget),
        Some(_) => Ok(()),
    }
}

fn checked_action() -> Option<String> {
    dom::query("input[name=\"action\"]:checked").map(|el| dom::field_value(&el))
}

fn wire_reassign_toggle() {
    let Some(select) = dom::by_id("departmentSelect") else { return };
    if dom::by_id("reassignCourses").is_none() {
        return;
    }
    for radio in dom::query_all("input[name=\"action\"]") {
        let select = select.clone();
        dom::listen(&radio, "change", move |_ev: web_sys::Event| {
            let reassign = dom::by_id("reassignCourses").map(|r| dom::is_checked(&r)).unwrap_or(false);
            dom::set_display(&select, if reassign { "block" } else { "none" });
        });
    }
}

pub fn wire() {
    wire_reassign_toggle();

    let Some(form) = dom::by_id("deleteForm") else { return };
    dom::listen(&form, "submit", |ev: web_sys::Event| {
        let target = dom::by_id("new_department_id").map(|el| dom::field_value(&el)).unwrap_or_default();
        if let Err(e) = check_choice(checked_action().as_deref(), &target) {
            ev.prevent_default();
            dom::alert(e.message());
        }
    });
}
