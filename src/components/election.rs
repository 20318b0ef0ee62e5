//! Election Pages
//!
//! School-year inputs on the election forms, card reveal on scroll and
//! candidate highlighting on the ballot.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

/// Start/end year inputs and the element showing the derived title
struct YearForm {
    start: &'static str,
    end: &'static str,
    title: &'static str,
}

const EDIT_FORM: YearForm = YearForm {
    start: "editElectionStartYear",
    end: "editElectionEndYear",
    title: "computedElectionTitle",
};

const CREATE_FORM: YearForm = YearForm {
    start: "createElectionStartYear",
    end: "createElectionEndYear",
    title: "computedCreateTitle",
};

const CARD_SELECTOR: &str = ".election-card, .position-results-card, .winner-card";

/// Leading integer of an input, `None` for blank, non-numeric, zero or
/// out of `i64` range
pub fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n).filter(|n| *n != 0)
}

/// `SY 2024-2025`, or empty unless both years are set
pub fn school_year_title(start: &str, end: &str) -> String {
    match (parse_year(start), parse_year(end)) {
        (Some(sy), Some(ey)) => format!("SY {}-{}", sy, ey),
        _ => String::new(),
    }
}

/// End year suggested for a start year, none on overflow
pub fn following_year(start: &str) -> Option<i64> {
    parse_year(start).and_then(|sy| sy.checked_add(1))
}

fn input_value(id: &str) -> String {
    dom::by_id(id).map(|el| dom::field_value(&el)).unwrap_or_default()
}

fn refresh_title(form: &YearForm) {
    if let Some(out) = dom::by_id(form.title) {
        dom::set_text(&out, &school_year_title(&input_value(form.start), &input_value(form.end)));
    }
}

/// Recompute the edit modal's title (after the modal is filled)
pub fn refresh_edit_title() {
    refresh_title(&EDIT_FORM);
}

fn wire_year_form(form: &'static YearForm) -> bool {
    let mut any = false;
    for id in [form.start, form.end] {
        let Some(el) = dom::by_id(id) else { continue };
        let is_start = id == form.start;
        dom::listen(&el, "input", move |_ev: web_sys::Event| {
            if is_start {
                if let (Some(next), Some(end)) = (following_year(&input_value(form.start)), dom::by_id(form.end)) {
                    dom::set_field_value(&end, &next.to_string());
                }
            }
            refresh_title(form);
        });
        any = true;
    }
    any
}

fn reveal_cards() -> Result<usize, JsValue> {
    let cards = dom::query_all(CARD_SELECTOR);
    if cards.is_empty() {
        return Ok(0);
    }

    let on_intersect = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else { continue };
                if entry.is_intersecting() {
                    let card = entry.target();
                    dom::set_style(&card, "opacity", "1");
                    dom::set_style(&card, "transform", "translateY(0)");
                }
            }
        },
    );
    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(0.1));
    let observer = web_sys::IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    on_intersect.forget();

    for card in &cards {
        dom::set_style(card, "opacity", "0");
        dom::set_style(card, "transform", "translateY(20px)");
        dom::set_style(card, "transition", "opacity 0.6s ease, transform 0.6s ease");
        observer.observe(card);
    }
    Ok(cards.len())
}

/// `position_12` -> `12`
pub fn position_key(radio_name: &str) -> String {
    radio_name.replacen("position_", "", 1)
}

fn wire_candidate_highlight() -> usize {
    let radios = dom::query_all(".radio-input");
    for radio in &radios {
        let this = radio.clone();
        dom::listen(radio, "change", move |_ev: web_sys::Event| {
            let key = position_key(&dom::attr(&this, "name"));
            for card in dom::query_all(&format!("[data-position-id=\"{}\"]", key)) {
                dom::toggle_class(&card, "selected", false);
            }
            if dom::is_checked(&this) {
                if let Ok(Some(card)) = this.closest(".candidate-card") {
                    dom::toggle_class(&card, "selected", true);
                }
            }
        });
    }
    radios.len()
}

pub fn wire() {
    if wire_year_form(&EDIT_FORM) | wire_year_form(&CREATE_FORM) {
        log::debug!(target: "election", "school-year inputs bound");
    }
    match reveal_cards() {
        Ok(0) => {}
        Ok(n) => log::debug!(target: "election", "observing {} cards", n),
        Err(e) => log::warn!(target: "election", "card reveal unavailable: {:?}", e),
    }
    wire_candidate_highlight();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_like_parse_int() {
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year("  2024 "), Some(2024));
        assert_eq!(parse_year("2024abc"), Some(2024));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("0"), None);
        assert_eq!(parse_year("abc"), None);
    }

    #[test]
    fn test_school_year_title() {
        assert_eq!(school_year_title("2024", "2025"), "SY 2024-2025");
        assert_eq!(school_year_title("2024", ""), "");
        assert_eq!(school_year_title("", "2025"), "");
    }

    #[test]
    fn test_following_year() {
        assert_eq!(following_year("2030"), Some(2031));
        assert_eq!(following_year(""), None);
    }

    #[test]
    fn test_large_years_do_not_overflow() {
        assert_eq!(parse_year("99999999999"), Some(99_999_999_999));
        assert_eq!(following_year("2147483647"), Some(2_147_483_648));
        assert_eq!(following_year(&i64::MAX.to_string()), None);
        assert_eq!(school_year_title("99999999999", "100000000000"), "SY 99999999999-100000000000");
    }

    #[test]
    fn test_position_key() {
        assert_eq!(position_key("position_12"), "12");
        assert_eq!(position_key("other"), "other");
    }
}
