//! CSRF Token Lookup
//!
//! Django puts the token in a hidden `csrfmiddlewaretoken` field on pages
//! with a form, and always in the `csrftoken` cookie.

use wasm_bindgen::JsCast;

pub const HEADER: &str = "X-CSRFToken";
const FIELD_SELECTOR: &str = "[name=csrfmiddlewaretoken]";
const COOKIE_NAME: &str = "csrftoken";

/// Token from the hidden field, else the cookie, else empty
pub fn token() -> String {
    let field = crate::dom::query(FIELD_SELECTOR).map(|el| crate::dom::field_value(&el));
    let cookie = || {
        crate::dom::document()
            .and_then(|doc| doc.dyn_into::<web_sys::HtmlDocument>().ok())
            .and_then(|doc| doc.cookie().ok())
            .and_then(|jar| cookie_value(&jar, COOKIE_NAME))
    };
    choose(field, cookie)
}

/// A present field wins even when empty; the cookie is only a fallback.
fn choose(field: Option<String>, cookie: impl FnOnce() -> Option<String>) -> String {
    match field {
        Some(value) => value,
        None => cookie().unwrap_or_default(),
    }
}

/// Value of `name` in a `document.cookie` style string
pub fn cookie_value(jar: &str, name: &str) -> Option<String> {
    jar.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let jar = "sessionid=abc; csrftoken=T0k3n; theme=dark";
        assert_eq!(cookie_value(jar, "csrftoken").as_deref(), Some("T0k3n"));
        assert_eq!(cookie_value(jar, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(jar, "missing"), None);
    }

    #[test]
    fn test_cookie_value_ignores_prefixed_names() {
        let jar = "xcsrftoken=bad; csrftoken_old=bad2";
        assert_eq!(cookie_value(jar, "csrftoken"), None);
        assert_eq!(cookie_value("csrftoken=first", "csrftoken").as_deref(), Some("first"));
    }

    #[test]
    fn test_field_beats_cookie() {
        assert_eq!(choose(Some("from-field".into()), || Some("from-cookie".into())), "from-field");
        assert_eq!(choose(None, || Some("from-cookie".into())), "from-cookie");
        assert_eq!(choose(None, || None), "");
    }
}
