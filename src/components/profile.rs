//! Profile Page
//!
//! Password section toggle, username edit mode and student ID generation.

use chrono::Datelike;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use super::banner::{self, BannerKind};
use crate::dom;

const TOGGLE_PW_ID: &str = "togglePw";
const PW_SECTION_ID: &str = "pwSection";
const USERNAME_INPUT: &str = "input[name=\"username\"]";
const USERNAME_TOGGLE: &str = "[data-username-toggle]";
const GENERATE_ID_BTN: &str = "generateStudentId";
const STUDENT_ID_INPUT: &str = "student_id";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username must be at least 3 characters long.")]
    TooShort,
    #[error("Username can only contain letters, numbers, dots, underscores, and hyphens.")]
    InvalidChars,
}

/// Trimmed username if acceptable
pub fn validate_username(raw: &str) -> Result<String, UsernameError> {
    let name = raw.trim();
    if name.chars().count() < 3 {
        return Err(UsernameError::TooShort);
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        return Err(UsernameError::InvalidChars);
    }
    Ok(name.to_string())
}

/// `2025-48213`
pub fn format_student_id(year: i32, serial: u32) -> String {
    format!("{}-{}", year, serial)
}

/// Uniform in 10000..=99999
fn random_serial() -> u32 {
    10_000 + (js_sys::Math::random() * 90_000.0).floor() as u32
}

fn wire_password_toggle() {
    let (Some(btn), Some(section)) = (dom::by_id(TOGGLE_PW_ID), dom::by_id(PW_SECTION_ID)) else {
        return;
    };
    let this = btn.clone();
    dom::listen(&btn, "click", move |_ev: web_sys::MouseEvent| {
        let is_open = dom::style(&section, "display") != "none";
        dom::set_display(&section, if is_open { "none" } else { "block" });
        dom::set_text(&this, if is_open { "Change Password" } else { "Hide Password Change" });
        log::debug!(target: "profile", "password section {}", if is_open { "closed" } else { "open" });
    });
}

fn set_toggle_look(button: &web_sys::Element, editing: bool) {
    if editing {
        button.set_inner_html("<i class=\"fas fa-save\"></i> Save");
    } else {
        button.set_inner_html("<i class=\"fas fa-edit\"></i> Change");
    }
    dom::toggle_class(button, "btn-success", editing);
    dom::toggle_class(button, "btn-outline-info", !editing);
}

fn toggle_username(input: &HtmlInputElement, button: &web_sys::Element) {
    if input.disabled() {
        input.set_disabled(false);
        let _ = input.focus();
        set_toggle_look(button, true);
        return;
    }

    let name = match validate_username(&input.value()) {
        Ok(name) => name,
        Err(e) => {
            dom::alert(&e.to_string());
            return;
        }
    };
    let prompt = format!(
        "Are you sure you want to change your username to \"{}\"? This will affect your login.",
        name
    );
    if !dom::confirm(&prompt) {
        log::debug!(target: "profile", "username change cancelled");
        return;
    }

    input.set_disabled(true);
    set_toggle_look(button, false);
    if let Some(host) = input.parent_element().and_then(|p| p.parent_element()) {
        banner::show_in(
            &host,
            banner::Placement::Last,
            BannerKind::Success,
            "Username will be updated when you save your profile.",
            3000,
        );
    }
}

fn wire_username_toggle() {
    let input = dom::query(USERNAME_INPUT).and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let (Some(input), Some(button)) = (input, dom::query(USERNAME_TOGGLE)) else {
        return;
    };
    let this = button.clone();
    dom::listen(&button, "click", move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        toggle_username(&input, &this);
    });
}

fn wire_student_id() {
    let Some(btn) = dom::by_id(GENERATE_ID_BTN) else {
        return;
    };
    dom::listen(&btn, "click", |_ev: web_sys::MouseEvent| {
        let Some(input) = dom::by_id(STUDENT_ID_INPUT) else {
            log::error!(target: "profile", "#{} not found", STUDENT_ID_INPUT);
            return;
        };
        let id = format_student_id(chrono::Local::now().year(), random_serial());
        dom::set_field_value(&input, &id);
        log::debug!(target: "profile", "generated student id {}", id);
    });
}

pub fn wire() {
    wire_password_toggle();
    wire_username_toggle();
    wire_student_id();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  j.dela-cruz_2 "), Ok("j.dela-cruz_2".to_string()));
        assert_eq!(validate_username("ab"), Err(UsernameError::TooShort));
        assert_eq!(validate_username("   ab   "), Err(UsernameError::TooShort));
        assert_eq!(validate_username("juan cruz"), Err(UsernameError::InvalidChars));
        assert_eq!(validate_username("josé"), Err(UsernameError::InvalidChars));
    }

    #[test]
    fn test_username_error_text() {
        assert_eq!(UsernameError::TooShort.to_string(), "Username must be at least 3 characters long.");
    }

    #[test]
    fn test_format_student_id() {
        assert_eq!(format_student_id(2025, 48213), "2025-48213");
    }
}
