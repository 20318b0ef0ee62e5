//! Frontend Models
//!
//! Payloads exchanged with the admin endpoints.

use serde::{Deserialize, Serialize};

/// Password reset result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResetPasswordResult {
    pub username: String,
    pub new_password: String,
}

/// `?get_user_data=` lookup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserDetails {
    pub user: UserRecord,
    pub profile: ProfileRecord,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub year_level: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub course_id: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Course in a department's course list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

/// One autocomplete hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserHit {
    pub text: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserHit {
    /// Text placed in the search field when the hit is chosen
    pub fn fill_text(&self) -> &str {
        [self.display_name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(self.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AutocompleteResults {
    #[serde(default)]
    pub results: Vec<UserHit>,
}

/// Body of the positions reorder POST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

/// Ids and numeric fields arrive as numbers or strings depending on the view
fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

fn loose_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("unexpected value: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_text_preference() {
        let hit = |display: Option<&str>, user: Option<&str>| UserHit {
            text: "Alice Reyes (alice)".into(),
            display_name: display.map(String::from),
            username: user.map(String::from),
        };
        assert_eq!(hit(Some("Alice Reyes"), Some("alice")).fill_text(), "Alice Reyes");
        assert_eq!(hit(None, Some("alice")).fill_text(), "alice");
        assert_eq!(hit(Some(""), None).fill_text(), "Alice Reyes (alice)");
    }

    #[test]
    fn test_course_ids_accept_numbers() {
        let list: CourseList = serde_json::from_str(
            r#"{"courses": [{"id": 3, "name": "Computer Science", "code": "BSCS"}, {"id": "4", "name": "IT", "code": "BSIT"}]}"#,
        )
        .unwrap();
        assert_eq!(list.courses[0].id, "3");
        assert_eq!(list.courses[1].id, "4");
    }

    #[test]
    fn test_user_details_with_nulls() {
        let details: UserDetails = serde_json::from_str(
            r#"{
                "user": {"id": 9, "username": "bong", "first_name": null, "email": "b@x.edu",
                         "is_active": true, "is_staff": false, "is_superuser": false},
                "profile": {"student_id": "2024-10001", "year_level": 3, "course_id": null, "is_verified": true}
            }"#,
        )
        .unwrap();
        assert_eq!(details.user.first_name, None);
        assert_eq!(details.profile.year_level.as_deref(), Some("3"));
        assert_eq!(details.profile.course_id, None);
        assert!(details.profile.is_verified);
    }

    #[test]
    fn test_reorder_request_shape() {
        let body = serde_json::to_string(&ReorderRequest { order: vec!["3".into(), "1".into(), "2".into()] }).unwrap();
        assert_eq!(body, r#"{"order":["3","1","2"]}"#);
    }
}
