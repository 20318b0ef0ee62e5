//! Modal Populator
//!
//! Fills Bootstrap modals from the `data-*` attributes of the button that
//! opened them. Each modal is described by a binding table; a binding
//! whose target element is missing is skipped.

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::{self, Endpoints};
use crate::context::PageContext;
use crate::dom;

/// Where a field's value comes from
#[derive(Clone, Copy)]
pub enum Source {
    /// Trigger attribute, empty when absent
    Attr(&'static str),
    /// Endpoint template expanded with a trigger attribute, under the
    /// target's `data-base-url` or the page origin
    Path {
        attr: &'static str,
        endpoint: fn(&Endpoints) -> &str,
    },
    /// Always cleared
    Blank,
}

/// How a value is written into the modal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sink {
    /// Form control value
    Value,
    /// Text content
    Text,
    /// Checkbox, checked when the value is "1"
    Checked,
    /// Form `action`
    Action,
    /// Shown (inline-block) when `(value == "1") == flag`, hidden otherwise
    ShownWhen(bool),
}

#[derive(Clone, Copy)]
pub struct Binding {
    pub source: Source,
    pub target: &'static str,
    pub sink: Sink,
}

const fn bind(source: Source, target: &'static str, sink: Sink) -> Binding {
    Binding { source, target, sink }
}

const fn attr(name: &'static str, target: &'static str, sink: Sink) -> Binding {
    bind(Source::Attr(name), target, sink)
}

pub struct ModalForm {
    pub modal_id: &'static str,
    pub bindings: &'static [Binding],
    /// Runs after all bindings are applied
    pub after: Option<fn()>,
}

fn position_associate(e: &Endpoints) -> &str {
    &e.position_associate
}

fn course_edit(e: &Endpoints) -> &str {
    &e.course_edit
}

fn department_edit(e: &Endpoints) -> &str {
    &e.department_edit
}

use Sink::*;

pub static MODALS: &[ModalForm] = &[
    ModalForm {
        modal_id: "deletePositionModal",
        bindings: &[
            attr("data-pid", "deletePositionId", Value),
            attr("data-pname", "deletePositionName", Text),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "editPositionModal",
        bindings: &[
            attr("data-edit-url", "editPositionForm", Action),
            attr("data-name", "editPosName", Value),
            attr("data-type", "editPosType", Value),
            attr("data-active", "editPosActive", Checked),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "associatePositionModal",
        bindings: &[
            attr("data-position-name", "assocPositionName", Text),
            attr("data-position-type", "assocPositionType", Text),
            attr("data-election-title", "assocElectionTitle", Text),
            bind(
                Source::Path { attr: "data-position-id", endpoint: position_associate },
                "associatePositionForm",
                Action,
            ),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "deleteElectionModal",
        bindings: &[
            attr("data-eid", "deleteElectionId", Value),
            attr("data-title", "deleteElectionTitle", Text),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "editElectionModal",
        bindings: &[
            attr("data-edit-url", "editElectionForm", Action),
            attr("data-id", "editElectionId", Value),
            attr("data-id", "pauseElectionId", Value),
            attr("data-id", "resumeElectionId", Value),
            attr("data-id", "endNowElectionId", Value),
            attr("data-start-year", "editElectionStartYear", Value),
            attr("data-end-year", "editElectionEndYear", Value),
            attr("data-start", "editElectionStart", Value),
            attr("data-end", "editElectionEnd", Value),
            attr("data-active", "editElectionActive", Checked),
            attr("data-active", "pauseForm", ShownWhen(true)),
            attr("data-active", "resumeForm", ShownWhen(false)),
        ],
        after: Some(super::election::refresh_edit_title),
    },
    ModalForm {
        modal_id: "editCourseModal",
        bindings: &[
            attr("data-course-id", "editCourseId", Value),
            bind(
                Source::Path { attr: "data-course-id", endpoint: course_edit },
                "editCourseForm",
                Action,
            ),
            attr("data-name", "editCourseName", Value),
            attr("data-code", "editCourseCode", Value),
            attr("data-department", "editCourseDept", Value),
            attr("data-description", "editCourseDesc", Value),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "deleteCourseModal",
        bindings: &[
            attr("data-course-id", "deleteCourseId", Value),
            attr("data-name", "deleteCourseName", Text),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "editDepartmentModal",
        bindings: &[
            attr("data-dept-id", "editDepartmentId", Value),
            bind(
                Source::Path { attr: "data-dept-id", endpoint: department_edit },
                "editDepartmentForm",
                Action,
            ),
            attr("data-name", "editDepartmentName", Value),
            attr("data-code", "editDepartmentCode", Value),
            attr("data-description", "editDepartmentDesc", Value),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "deleteDepartmentModal",
        bindings: &[
            attr("data-dept-id", "deleteDepartmentId", Value),
            attr("data-name", "deleteDepartmentName", Text),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "deleteCandidateModal",
        bindings: &[
            attr("data-candidate-id", "deleteCandidateId", Value),
            attr("data-candidate-name", "deleteCandidateName", Text),
            bind(Source::Blank, "deleteReason", Value),
        ],
        after: None,
    },
    ModalForm {
        modal_id: "editCandidateModal",
        bindings: &[
            attr("data-candidate-name", "editCandidateName", Value),
            attr("data-party-id", "editParty", Value),
            attr("data-is-active", "editIsActive", Checked),
            attr("data-edit-url", "quickEditForm", Action),
        ],
        after: None,
    },
];

/// Value a binding writes, given a trigger attribute lookup
pub fn resolve<F>(source: &Source, lookup: F, base: &str, endpoints: &Endpoints) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match source {
        Source::Attr(name) => lookup(name).unwrap_or_default(),
        Source::Path { attr, endpoint } => {
            let id = lookup(attr).unwrap_or_default();
            format!("{}{}", base.trim_end_matches('/'), config::expand(endpoint(endpoints), &id))
        }
        Source::Blank => String::new(),
    }
}

fn is_flag_set(value: &str) -> bool {
    value == "1"
}

fn apply(target: &Element, sink: Sink, value: &str) {
    match sink {
        Sink::Value => dom::set_field_value(target, value),
        Sink::Text => dom::set_text(target, value),
        Sink::Checked => dom::set_checked(target, is_flag_set(value)),
        Sink::Action => {
            if let Some(form) = target.dyn_ref::<web_sys::HtmlFormElement>() {
                form.set_action(value);
            }
        }
        Sink::ShownWhen(flag) => {
            let shown = is_flag_set(value) == flag;
            dom::set_display(target, if shown { "inline-block" } else { "none" });
        }
    }
}

/// Copy the trigger's attributes into the modal
pub fn populate(modal: &ModalForm, trigger: &Element, ctx: &PageContext) {
    let origin = dom::origin();
    for binding in modal.bindings {
        let Some(target) = dom::by_id(binding.target) else {
            log::debug!(target: "modal", "#{} has no #{}", modal.modal_id, binding.target);
            continue;
        };
        let base = target
            .get_attribute("data-base-url")
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| origin.clone());
        let value = resolve(&binding.source, |name| trigger.get_attribute(name), &base, &ctx.config().endpoints);
        apply(&target, binding.sink, &value);
    }
    if let Some(after) = modal.after {
        after();
    }
}

/// Bind every modal present on the page. Returns how many were found.
pub fn wire(ctx: &PageContext) -> usize {
    let mut wired = 0;
    for form in MODALS {
        let Some(modal) = dom::by_id(form.modal_id) else {
            continue;
        };
        let ctx = ctx.clone();
        dom::listen(&modal, "show.bs.modal", move |ev: web_sys::Event| {
            match dom::related_target(&ev) {
                Some(trigger) => populate(form, &trigger, &ctx),
                None => log::debug!(target: "modal", "#{} opened without a trigger", form.modal_id),
            }
        });
        wired += 1;
    }
    wired
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(attrs: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| attrs.get(name).map(|v| v.to_string())
    }

    fn find(id: &str) -> &'static ModalForm {
        MODALS.iter().find(|m| m.modal_id == id).unwrap()
    }

    #[test]
    fn test_attr_bindings_copy_values_or_blank() {
        let endpoints = Endpoints::default();
        let attrs: HashMap<_, _> = [("data-name", "Treasurer"), ("data-type", "executive")].into_iter().collect();

        for modal in MODALS {
            for binding in modal.bindings {
                if let Source::Attr(name) = binding.source {
                    let value = resolve(&binding.source, lookup(&attrs), "https://vote.example.edu", &endpoints);
                    let expected = attrs.get(name).copied().unwrap_or("");
                    assert_eq!(value, expected, "{} -> #{}", name, binding.target);
                }
            }
        }
    }

    #[test]
    fn test_path_source_uses_base() {
        let endpoints = Endpoints::default();
        let attrs: HashMap<_, _> = [("data-course-id", "14")].into_iter().collect();
        let action = find("editCourseModal")
            .bindings
            .iter()
            .find(|b| b.sink == Sink::Action)
            .unwrap();

        let url = resolve(&action.source, lookup(&attrs), "https://vote.example.edu/", &endpoints);
        assert_eq!(url, "https://vote.example.edu/admin-ui/courses/14/edit/");
    }

    #[test]
    fn test_path_source_with_missing_attr() {
        let endpoints = Endpoints::default();
        let attrs = HashMap::new();
        let source = Source::Path { attr: "data-position-id", endpoint: position_associate };
        assert_eq!(
            resolve(&source, lookup(&attrs), "http://localhost:8000", &endpoints),
            "http://localhost:8000/admin-ui/positions//associate/"
        );
    }

    #[test]
    fn test_blank_source() {
        let attrs: HashMap<_, _> = [("data-reason", "duplicate")].into_iter().collect();
        assert_eq!(resolve(&Source::Blank, lookup(&attrs), "", &Endpoints::default()), "");
    }

    #[test]
    fn test_election_pause_resume_are_exclusive() {
        let shown: Vec<_> = find("editElectionModal")
            .bindings
            .iter()
            .filter_map(|b| match b.sink {
                Sink::ShownWhen(flag) => Some((b.target, flag)),
                _ => None,
            })
            .collect();
        assert_eq!(shown, vec![("pauseForm", true), ("resumeForm", false)]);
    }

    #[test]
    fn test_modal_ids_unique() {
        let mut ids: Vec<_> = MODALS.iter().map(|m| m.modal_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MODALS.len());
    }
}
