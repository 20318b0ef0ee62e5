//! Course Commands

use super::http::{self, FetchRequest};
use crate::config;
use crate::error::ApiError;
use crate::models::{Course, CourseList};

pub async fn courses_by_department(template: &str, department_id: &str) -> Result<Vec<Course>, ApiError> {
    let url = config::expand(template, department_id);
    let resp = http::send(FetchRequest { expect_json: false, ..FetchRequest::get(&url) }).await?;
    http::ensure_ok(&resp)?;
    let list: CourseList = http::parse_envelope(&http::body_text(&resp).await?)?;
    Ok(list.courses)
}
