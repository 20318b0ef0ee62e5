//! Edit User Modal
//!
//! Looks the user up over AJAX, fills the edit form, and saves it back
//! as form data. A successful save resynchronizes the page.

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::PageContext;
use crate::dom::{self, BootstrapModal};
use crate::models::UserDetails;

const MODAL_ID: &str = "editUserModal";
const FORM_ID: &str = "editUserForm";
const TITLE_ID: &str = "editUserModalLabel";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    Value(String),
    Checked(bool),
}

/// Form field name -> what to write, in form order
pub fn form_plan(details: &UserDetails) -> Vec<(&'static str, FieldWrite)> {
    let text = |v: &Option<String>| FieldWrite::Value(v.clone().unwrap_or_default());
    let user = &details.user;
    let profile = &details.profile;
    vec![
        ("user_id", FieldWrite::Value(user.id.to_string())),
        ("first_name", text(&user.first_name)),
        ("last_name", text(&user.last_name)),
        ("email", text(&user.email)),
        ("student_id", text(&profile.student_id)),
        ("year_level", text(&profile.year_level)),
        ("course", text(&profile.course_id)),
        ("is_active", FieldWrite::Checked(user.is_active)),
        ("is_staff", FieldWrite::Checked(user.is_staff)),
        ("is_superuser", FieldWrite::Checked(user.is_superuser)),
        ("is_verified", FieldWrite::Checked(profile.is_verified)),
    ]
}

pub fn modal_title(details: &UserDetails) -> String {
    format!("Edit User - {}", details.user.username)
}

fn fill_form(form: &web_sys::Element, details: &UserDetails) {
    for (name, write) in form_plan(details) {
        let Some(field) = dom::query_in(form, &format!("[name=\"{}\"]", name)) else {
            log::debug!(target: "user_edit", "form has no field {}", name);
            continue;
        };
        match write {
            FieldWrite::Value(v) => dom::set_field_value(&field, &v),
            FieldWrite::Checked(c) => dom::set_checked(&field, c),
        }
    }
}

fn open_edit_modal(user_id: String) {
    let (Some(modal), Some(form), Some(title)) = (dom::by_id(MODAL_ID), dom::by_id(FORM_ID), dom::by_id(TITLE_ID)) else {
        log::error!(target: "user_edit", "edit user modal elements not found");
        return;
    };
    let pathname = dom::pathname();
    spawn_local(async move {
        match commands::get_user_data(&pathname, &user_id).await {
            Ok(details) => {
                fill_form(&form, &details);
                dom::set_text(&title, &modal_title(&details));
                BootstrapModal::new(&modal).show();
            }
            Err(e) => {
                log::error!(target: "user_edit", "loading user {} failed: {}", user_id, e);
                dom::alert(&e.alert_text("Error loading user data"));
            }
        }
    });
}

pub fn close_edit_modal() {
    if let Some(modal) = dom::by_id(MODAL_ID) {
        if let Some(instance) = BootstrapModal::get_instance(&modal) {
            instance.hide();
        }
    }
}

fn save(ctx: PageContext, form: web_sys::HtmlFormElement) {
    let action = form.action();
    spawn_local(async move {
        match commands::save_user_edit(&action, &form).await {
            Ok(()) => {
                close_edit_modal();
                ctx.resync();
            }
            Err(e) => {
                log::error!(target: "user_edit", "saving user failed: {}", e);
                dom::alert(&e.alert_text("Error saving user"));
            }
        }
    });
}

pub fn wire(ctx: &PageContext) {
    for button in dom::query_all(".edit-user-btn") {
        let this = button.clone();
        dom::listen(&button, "click", move |_ev: web_sys::MouseEvent| {
            open_edit_modal(dom::attr(&this, "data-user-id"));
        });
    }

    let Some(form) = dom::by_id_as::<web_sys::HtmlFormElement>(FORM_ID) else {
        return;
    };
    let ctx = ctx.clone();
    let this = form.clone();
    dom::listen(&form, "submit", move |ev: web_sys::Event| {
        ev.prevent_default();
        save(ctx.clone(), this.clone());
    });

    if let Some(doc) = dom::document() {
        dom::listen(&doc, "keydown", |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Escape" {
                close_edit_modal();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileRecord, UserRecord};

    fn details() -> UserDetails {
        UserDetails {
            user: UserRecord {
                id: 12,
                username: "jdelacruz".into(),
                first_name: Some("Juan".into()),
                last_name: None,
                email: Some("juan@school.edu".into()),
                is_active: true,
                is_staff: false,
                is_superuser: false,
            },
            profile: ProfileRecord {
                student_id: Some("2023-48211".into()),
                year_level: Some("2".into()),
                course_id: None,
                is_verified: true,
            },
        }
    }

    #[test]
    fn test_form_plan() {
        let plan = form_plan(&details());
        let get = |name: &str| plan.iter().find(|(n, _)| *n == name).map(|(_, w)| w.clone()).unwrap();

        assert_eq!(get("user_id"), FieldWrite::Value("12".into()));
        assert_eq!(get("first_name"), FieldWrite::Value("Juan".into()));
        assert_eq!(get("last_name"), FieldWrite::Value(String::new()));
        assert_eq!(get("course"), FieldWrite::Value(String::new()));
        assert_eq!(get("is_active"), FieldWrite::Checked(true));
        assert_eq!(get("is_staff"), FieldWrite::Checked(false));
        assert_eq!(get("is_verified"), FieldWrite::Checked(true));
        assert_eq!(plan.len(), 11);
    }

    #[test]
    fn test_modal_title() {
        assert_eq!(modal_title(&details()), "Edit User - jdelacruz");
    }
}
