//! HTTP-triggered function envelope.
//!
//! The hosting platform hands each invocation a JSON event carrying the HTTP
//! method and the raw body, and expects back `{statusCode, headers, body,
//! isBase64Encoded}` with `body` as a JSON string.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ChatError, MESSAGES_REQUIRED};
use crate::types::ChatReply;

const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
const MAX_AGE: &str = "Access-Control-Max-Age";
const CONTENT_TYPE: &str = "Content-Type";

// ─────────────────────────────────────────────
// Inbound event
// ─────────────────────────────────────────────

/// An inbound invocation. Platform fields other than these are ignored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default = "default_http_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

fn default_http_method() -> String {
    "GET".to_string()
}

impl FunctionEvent {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        FunctionEvent {
            http_method: http_method.into(),
            body,
            is_base64_encoded: false,
        }
    }

    /// A `POST` event with a plain-text JSON body.
    pub fn post(body: impl Into<String>) -> Self {
        Self::new("POST", Some(body.into()))
    }

    /// Body as text, base64-decoded when the platform flagged it as encoded.
    ///
    /// An encoded body that fails to decode is treated like an unparseable one.
    pub fn decoded_body(&self) -> Result<Option<String>, ChatError> {
        let Some(body) = self.body.as_deref() else {
            return Ok(None);
        };
        if !self.is_base64_encoded {
            return Ok(Some(body.to_string()));
        }

        STANDARD
            .decode(body.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .map(Some)
            .ok_or_else(|| ChatError::Validation(MESSAGES_REQUIRED.to_string()))
    }
}

// ─────────────────────────────────────────────
// Outbound response
// ─────────────────────────────────────────────

/// The response envelope returned to the platform.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl FunctionResponse {
    /// `200` with an empty body and the CORS preflight headers.
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            (ALLOW_ORIGIN.to_string(), "*".to_string()),
            (ALLOW_METHODS.to_string(), "POST, OPTIONS".to_string()),
            (ALLOW_HEADERS.to_string(), "Content-Type".to_string()),
            (MAX_AGE.to_string(), "86400".to_string()),
        ]);
        FunctionResponse {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// A JSON response with the standard CORS + content-type headers.
    pub fn json(status_code: u16, body: &Value) -> Self {
        let headers = BTreeMap::from([
            (ALLOW_ORIGIN.to_string(), "*".to_string()),
            (CONTENT_TYPE.to_string(), "application/json".to_string()),
        ]);
        FunctionResponse {
            status_code,
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::json(405, &json!({ "error": "Method not allowed" }))
    }

    pub fn ok(reply: &ChatReply) -> Self {
        Self::json(
            200,
            &json!({
                "message": reply.message,
                "model": reply.model,
                "usage": reply.usage,
            }),
        )
    }

    pub fn error(err: &ChatError) -> Self {
        Self::json(err.status_code(), &err.to_body())
    }

    /// Parse `body` back into JSON. `None` for the empty preflight body.
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_event_defaults() {
        let event: FunctionEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.http_method, "GET");
        assert!(event.body.is_none());
        assert!(!event.is_base64_encoded);
    }

    #[test]
    fn test_event_ignores_platform_fields() {
        let event: FunctionEvent = serde_json::from_str(
            r#"{
                "httpMethod": "POST",
                "headers": {"Content-Type": "application/json"},
                "queryStringParameters": {},
                "requestContext": {"requestId": "abc"},
                "body": "{\"messages\":[]}",
                "isBase64Encoded": false
            }"#,
        )
        .unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body.as_deref(), Some(r#"{"messages":[]}"#));
    }

    #[test]
    fn test_decoded_body_plain() {
        let event = FunctionEvent::post("{}");
        assert_eq!(event.decoded_body().unwrap().as_deref(), Some("{}"));
        assert_eq!(FunctionEvent::new("POST", None).decoded_body().unwrap(), None);
    }

    #[test]
    fn test_decoded_body_base64() {
        let mut event = FunctionEvent::post(STANDARD.encode(r#"{"messages":[]}"#));
        event.is_base64_encoded = true;
        assert_eq!(
            event.decoded_body().unwrap().as_deref(),
            Some(r#"{"messages":[]}"#)
        );
    }

    #[test]
    fn test_decoded_body_bad_base64() {
        let mut event = FunctionEvent::post("!!not base64!!");
        event.is_base64_encoded = true;
        let err = event.decoded_body().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_preflight_headers() {
        let resp = FunctionResponse::preflight();
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "");
        assert_eq!(resp.headers.len(), 4);
        assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
        assert_eq!(resp.headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(resp.headers["Access-Control-Max-Age"], "86400");
        assert!(!resp.headers.contains_key("Content-Type"));
        assert!(resp.body_json().is_none());
    }

    #[test]
    fn test_method_not_allowed() {
        let resp = FunctionResponse::method_not_allowed();
        assert_eq!(resp.status_code, 405);
        assert_eq!(resp.headers["Content-Type"], "application/json");
        assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.body_json().unwrap(), json!({"error": "Method not allowed"}));
    }

    #[test]
    fn test_ok_response() {
        let reply = ChatReply {
            message: "privet".into(),
            model: "yandexgpt-lite".into(),
            usage: Map::new(),
        };
        let resp = FunctionResponse::ok(&reply);
        assert_eq!(resp.status_code, 200);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({"message": "privet", "model": "yandexgpt-lite", "usage": {}})
        );
    }

    #[test]
    fn test_serialized_envelope_is_camel_case() {
        let raw = serde_json::to_value(FunctionResponse::method_not_allowed()).unwrap();
        assert_eq!(raw["statusCode"], 405);
        assert_eq!(raw["isBase64Encoded"], false);
        assert!(raw["body"].is_string());
    }
}
