//! Position Commands

use super::http::{self, Body, FetchRequest};
use crate::error::ApiError;
use crate::models::ReorderRequest;

fn reorder_request(url: &str, order: Vec<String>) -> Result<FetchRequest<'_>, ApiError> {
    let body = serde_json::to_string(&ReorderRequest { order })?;
    Ok(FetchRequest::post(url, Body::Json(body)))
}

/// POST the full top-to-bottom order of position ids
pub async fn reorder_positions(url: &str, order: Vec<String>) -> Result<(), ApiError> {
    let resp = http::send(reorder_request(url, order)?).await?;
    http::read_envelope::<serde::de::IgnoredAny>(&resp, url).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_is_a_csrf_json_post() {
        let req = reorder_request("/admin-ui/positions/reorder/", vec!["3".into(), "1".into()]).unwrap();
        assert_eq!(req.method, "POST");
        assert!(matches!(&req.body, Body::Json(text) if text == r#"{"order":["3","1"]}"#));
        let headers = req.headers("T0k3n");
        assert!(headers.contains(&("X-CSRFToken", "T0k3n".to_string())));
        assert!(headers.contains(&("Content-Type", "application/json".to_string())));
    }
}
