//! Candidate Application Form
//!
//! Photo preview and drop zone, "use profile picture" and party toggles,
//! and required-field checks before submit.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom;

const MANIFESTO: &str = "textarea[name=\"manifesto\"]";
const REQUIRED_FIELDS: [&str; 3] = ["select[name=\"position\"]", "select[name=\"election\"]", MANIFESTO];
const PHOTO_MISSING: &str = "Please upload a photo or select to use your profile picture.";
const PARTY_LOCKED_PLACEHOLDER: &str = "Custom party name disabled (using selected party)";
const PARTY_FREE_PLACEHOLDER: &str = "Custom Party Name (if not selecting from list)";

/// Outcome of the pre-submit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCheck {
    /// (selector, valid) for every required field present on the form
    pub fields: Vec<(&'static str, bool)>,
    pub photo_missing: bool,
}

impl ApplicationCheck {
    pub fn is_valid(&self) -> bool {
        !self.photo_missing && self.fields.iter().all(|(_, ok)| *ok)
    }
}

/// `value_of` yields a field's value, `None` when the field is absent.
/// `use_profile` is `None` when the form has no such checkbox.
pub fn check_application<F>(value_of: F, use_profile: Option<bool>, has_photo: bool) -> ApplicationCheck
where
    F: Fn(&str) -> Option<String>,
{
    let fields = REQUIRED_FIELDS
        .iter()
        .filter_map(|sel| value_of(sel).map(|v| (*sel, !v.trim().is_empty())))
        .collect();
    ApplicationCheck {
        fields,
        photo_missing: use_profile == Some(false) && !has_photo,
    }
}

/// Parts of the form the handlers need; absent parts disable their feature
struct Parts {
    form: web_sys::HtmlFormElement,
    photo: Option<HtmlInputElement>,
    preview: Option<Element>,
    upload_area: Option<Element>,
    use_profile: Option<HtmlInputElement>,
}

fn has_files(input: &HtmlInputElement) -> bool {
    input.files().map(|f| f.length() > 0).unwrap_or(false)
}

fn show_preview(preview: &Element, file: &web_sys::File) {
    let Ok(reader) = web_sys::FileReader::new() else { return };
    let target = preview.clone();
    let reader_ref = reader.clone();
    let on_load = Closure::once_into_js(move |_ev: web_sys::Event| {
        let Some(src) = reader_ref.result().ok().and_then(|r| r.as_string()) else { return };
        let Some(doc) = dom::document() else { return };
        let Ok(img) = doc.create_element("img") else { return };
        let _ = img.set_attribute("src", &src);
        let _ = img.set_attribute("alt", "Photo preview");
        img.set_class_name("preview-image");
        target.set_inner_html("");
        let _ = target.append_child(&img);
    });
    reader.set_onload(Some(on_load.unchecked_ref()));
    if let Err(e) = reader.read_as_data_url(file) {
        log::warn!(target: "candidate_form", "cannot read photo: {:?}", e);
    }
}

fn wire_photo(parts: &Parts) {
    let (Some(photo), Some(preview)) = (&parts.photo, &parts.preview) else { return };
    let input = photo.clone();
    let preview = preview.clone();
    dom::listen(photo, "change", move |_ev: web_sys::Event| {
        match input.files().and_then(|files| files.get(0)) {
            Some(file) => show_preview(&preview, &file),
            None => preview.set_inner_html(""),
        }
    });
}

fn wire_drop_zone(parts: &Parts) {
    let (Some(area), Some(photo)) = (&parts.upload_area, &parts.photo) else { return };

    let zone = area.clone();
    dom::listen(area, "dragover", move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        dom::toggle_class(&zone, "dragover", true);
    });
    let zone = area.clone();
    dom::listen(area, "dragleave", move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        dom::toggle_class(&zone, "dragover", false);
    });
    let zone = area.clone();
    let input = photo.clone();
    dom::listen(area, "drop", move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        dom::toggle_class(&zone, "dragover", false);
        let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) else { return };
        if files.length() == 0 {
            return;
        }
        input.set_files(Some(&files));
        if let Ok(change) = web_sys::Event::new("change") {
            let _ = input.dispatch_event(&change);
        }
    });
    let input = photo.clone();
    dom::listen(area, "click", move |_ev: web_sys::MouseEvent| input.click());
}

fn wire_use_profile(parts: &Parts) {
    let (Some(toggle), Some(area), Some(photo)) = (&parts.use_profile, &parts.upload_area, &parts.photo) else {
        return;
    };
    let checkbox = toggle.clone();
    let area = area.clone();
    let photo = photo.clone();
    dom::listen(toggle, "change", move |_ev: web_sys::Event| {
        let checked = checkbox.checked();
        dom::set_style(&area, "opacity", if checked { "0.5" } else { "1" });
        dom::set_style(&area, "pointer-events", if checked { "none" } else { "auto" });
        photo.set_required(!checked);
    });
}

fn wire_party(form: &web_sys::HtmlFormElement) {
    let select = dom::query_in(form, "select[name=\"party\"]").and_then(|el| el.dyn_into::<web_sys::HtmlSelectElement>().ok());
    let name = dom::query_in(form, "[name=\"party_name\"]").and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let (Some(select), Some(name)) = (select, name) else { return };
    let this = select.clone();
    dom::listen(&select, "change", move |_ev: web_sys::Event| {
        if this.value().is_empty() {
            name.set_disabled(false);
            name.set_placeholder(PARTY_FREE_PLACEHOLDER);
        } else {
            name.set_disabled(true);
            name.set_value("");
            name.set_placeholder(PARTY_LOCKED_PLACEHOLDER);
        }
    });
}

fn wire_validation(parts: Rc<Parts>) {
    let form = parts.form.clone();
    dom::listen(&form, "submit", move |ev: web_sys::Event| {
        let form: &Element = &parts.form;
        let check = check_application(
            |sel| dom::query_in(form, sel).map(|el| dom::field_value(&el)),
            parts.use_profile.as_ref().filter(|_| parts.photo.is_some()).map(|c| c.checked()),
            parts.photo.as_ref().map(has_files).unwrap_or(false),
        );
        for (sel, ok) in &check.fields {
            if let Some(field) = dom::query_in(form, sel) {
                dom::toggle_class(&field, "is-invalid", !ok);
            }
        }
        if check.photo_missing {
            dom::alert(PHOTO_MISSING);
        }
        if !check.is_valid() {
            log::debug!(target: "candidate_form", "blocked submit: {:?}", check);
            ev.prevent_default();
        }
    });
}

pub fn wire() {
    let Some(form) = dom::query(MANIFESTO)
        .and_then(|m| m.closest("form").ok().flatten())
        .and_then(|f| f.dyn_into::<web_sys::HtmlFormElement>().ok())
    else {
        return;
    };

    let parts = Parts {
        photo: dom::query_in(&form, "input[type=\"file\"][name]").and_then(|el| el.dyn_into().ok()),
        preview: dom::by_id("photo-preview"),
        upload_area: dom::query(".file-upload-area"),
        use_profile: dom::query_in(&form, "input[type=\"checkbox\"][name=\"use_profile_picture\"]")
            .and_then(|el| el.dyn_into().ok()),
        form,
    };

    wire_photo(&parts);
    wire_drop_zone(&parts);
    wire_use_profile(&parts);
    wire_party(&parts.form);
    wire_validation(Rc::new(parts));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn form(values: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&'static str, &'static str> = values.iter().copied().collect();
        move |sel| map.get(sel).map(|v| v.to_string())
    }

    #[test]
    fn test_complete_application() {
        let check = check_application(
            form(&[
                ("select[name=\"position\"]", "3"),
                ("select[name=\"election\"]", "1"),
                ("textarea[name=\"manifesto\"]", "Transparent student council budgets."),
            ]),
            Some(true),
            false,
        );
        assert!(check.is_valid());
    }

    #[test]
    fn test_blank_manifesto_is_invalid() {
        let check = check_application(
            form(&[
                ("select[name=\"position\"]", "3"),
                ("select[name=\"election\"]", "1"),
                ("textarea[name=\"manifesto\"]", "   \n "),
            ]),
            None,
            false,
        );
        assert!(!check.is_valid());
        assert_eq!(check.fields.iter().filter(|(_, ok)| !ok).count(), 1);
        assert!(!check.photo_missing);
    }

    #[test]
    fn test_missing_fields_are_not_checked() {
        let check = check_application(form(&[("textarea[name=\"manifesto\"]", "Hi")]), None, false);
        assert_eq!(check.fields, vec![("textarea[name=\"manifesto\"]", true)]);
        assert!(check.is_valid());
    }

    #[test]
    fn test_photo_required_without_profile_picture() {
        let fields = [("textarea[name=\"manifesto\"]", "Hi")];
        assert!(check_application(form(&fields), Some(false), false).photo_missing);
        assert!(!check_application(form(&fields), Some(false), true).photo_missing);
        assert!(!check_application(form(&fields), Some(true), false).photo_missing);
    }
}
