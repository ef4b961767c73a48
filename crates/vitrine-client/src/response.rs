//! Uniform response decoding shared by both clients.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Decode a response into its JSON payload.
///
/// `204 No Content` and a success with an empty body both yield `Ok(None)`. Non-success
/// statuses become [`ClientError::Api`] carrying the backend's reason.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<Option<T>> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.bytes().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        });
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let body = resp.bytes().await.map_err(|e| ClientError::Decode(e.to_string()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pick the human-readable reason out of an error body.
///
/// Accepts `{"detail": "..."}`, the list form `{"detail": [{"msg": "..."}]}`
/// used for field validation, and `message`/`error` string fields. Anything else
/// falls back to `HTTP status N`.
pub(crate) fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| reason(&v))
        .unwrap_or_else(|| format!("HTTP status {}", status.as_u16()))
}

fn reason(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(match field {
                        Some(f) => format!("{f}: {msg}"),
                        None => msg.to_owned(),
                    })
                })
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(status: u16, body: &str) -> String {
        rejection_message(StatusCode::from_u16(status).unwrap(), body.as_bytes())
    }

    #[test]
    fn string_detail_is_verbatim() {
        assert_eq!(msg(404, r#"{"detail":"Service not found"}"#), "Service not found");
    }

    #[test]
    fn validation_detail_list_is_flattened() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#;
        assert_eq!(msg(422, body), "email: value is not a valid email address");
    }

    #[test]
    fn message_and_error_fields_are_accepted() {
        assert_eq!(msg(500, r#"{"message":"boom"}"#), "boom");
        assert_eq!(msg(500, r#"{"error":"bad"}"#), "bad");
    }

    #[test]
    fn falls_back_to_status() {
        assert_eq!(msg(502, "<html>bad gateway</html>"), "HTTP status 502");
        assert_eq!(msg(500, ""), "HTTP status 500");
        assert_eq!(msg(400, r#"{"detail":""}"#), "HTTP status 400");
    }
}
