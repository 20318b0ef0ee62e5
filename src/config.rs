//! Page Configuration
//!
//! Read once at startup from an optional
//! `<script type="application/json" id="ebotar-config">` block.
//! Every field has a default, so pages without the block behave
//! like the stock admin templates.

use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "ebotar-config";

/// Placeholder replaced by an object id in endpoint templates
const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `log` level name for the console logger
    pub log_level: String,
    pub endpoints: Endpoints,
    pub autocomplete_debounce_ms: u32,
    pub autocomplete_min_chars: usize,
    /// Refresh period for pages listing pending applications
    pub auto_refresh_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            endpoints: Endpoints::default(),
            autocomplete_debounce_ms: 200,
            autocomplete_min_chars: 2,
            auto_refresh_secs: 30,
        }
    }
}

/// Server paths. `{id}` is substituted where present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub reset_password: String,
    pub positions_reorder: String,
    pub position_associate: String,
    pub course_edit: String,
    pub department_edit: String,
    pub user_autocomplete: String,
    pub courses_by_department: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            reset_password: "/admin-ui/users/{id}/reset-password/".to_string(),
            positions_reorder: "/admin-ui/positions/reorder/".to_string(),
            position_associate: "/admin-ui/positions/{id}/associate/".to_string(),
            course_edit: "/admin-ui/courses/{id}/edit/".to_string(),
            department_edit: "/admin-ui/departments/{id}/edit/".to_string(),
            user_autocomplete: "/admin-ui/users/autocomplete/".to_string(),
            courses_by_department: "/api/courses/{id}/".to_string(),
        }
    }
}

/// Substitute `id` into a path template
pub fn expand(template: &str, id: &str) -> String {
    template.replace(ID_PLACEHOLDER, id)
}

impl Config {
    /// Parse the config block. `None` (no block on the page) gives defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, serde_json::Error> {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => serde_json::from_str(text),
            _ => Ok(Self::default()),
        }
    }

    /// Load from the current document. Malformed JSON is reported and ignored.
    pub fn load() -> (Self, Option<String>) {
        let raw = crate::dom::by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content());
        match Self::from_json(raw.as_deref()) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(format!("ignoring #{}: {}", CONFIG_ELEMENT_ID, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_block_gives_defaults() {
        assert_eq!(Config::from_json(None).unwrap(), Config::default());
        assert_eq!(Config::from_json(Some("  \n ")).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let raw = r#"{"log_level": "debug", "endpoints": {"user_autocomplete": "/staff/users/search/"}}"#;
        let config = Config::from_json(Some(raw)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.endpoints.user_autocomplete, "/staff/users/search/");
        // Untouched fields keep their defaults
        assert_eq!(config.endpoints.positions_reorder, "/admin-ui/positions/reorder/");
        assert_eq!(config.autocomplete_debounce_ms, 200);
        assert_eq!(config.autocomplete_min_chars, 2);
    }

    #[test]
    fn test_malformed_block_is_an_error() {
        assert!(Config::from_json(Some("{log_level:")).is_err());
    }

    #[test]
    fn test_expand() {
        let endpoints = Endpoints::default();
        assert_eq!(expand(&endpoints.reset_password, "42"), "/admin-ui/users/42/reset-password/");
        assert_eq!(expand(&endpoints.courses_by_department, "7"), "/api/courses/7/");
        assert_eq!(expand(&endpoints.positions_reorder, "7"), "/admin-ui/positions/reorder/");
    }
}
