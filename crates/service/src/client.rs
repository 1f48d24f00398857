//! HTTP client for the spa marketplace REST backend.
//!
//! Every admin operation goes through [`ApiClient::execute`]: attach the
//! provider's bearer token, send, turn non-2xx into [`ServiceError::Api`] and
//! hand back the raw JSON. The backend is not consistent about envelopes, so
//! list and item responses are normalized here before typed decoding.

use std::sync::Arc;
use std::time::{Duration, Instant};

use configs::BackendConfig;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::observability::{BACKEND_NETWORK_ERRORS_TOTAL, BACKEND_REQUESTS_TOTAL, BACKEND_REQUEST_DURATION};

/// Envelope keys seen wrapping lists, tried in order.
const LIST_KEYS: [&str; 5] = ["$values", "data", "items", "result", "results"];
/// Keys carrying a human-readable reason in error bodies.
const DETAIL_KEYS: [&str; 4] = ["message", "title", "error", "detail"];
const MAX_TEXT_DETAIL: usize = 300;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(cfg: &BackendConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(concat!("spa-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self::with_http(http, &cfg.base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: Arc::from(base_url.trim_end_matches('/')) }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and return the decoded JSON body (`Null` for empty bodies).
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ServiceError> {
        let mut req = self.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(t) = token {
            req = req.bearer_auth(t);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let started = Instant::now();
        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                BACKEND_NETWORK_ERRORS_TOTAL.inc();
                warn!(%method, path, err = %e, "backend_unreachable");
                return Err(ServiceError::Network(e.to_string()));
            }
        };
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ServiceError::Network(e.to_string()))?;
        let elapsed = started.elapsed();

        BACKEND_REQUESTS_TOTAL.with_label_values(&[method.as_str(), status.as_str()]).inc();
        BACKEND_REQUEST_DURATION.with_label_values(&[method.as_str()]).observe(elapsed.as_secs_f64());
        debug!(%method, path, status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "backend_call");

        if !status.is_success() {
            let detail = extract_detail(&text);
            warn!(%method, path, status = status.as_u16(), detail = detail.as_deref().unwrap_or(""), "backend_error");
            return Err(ServiceError::Api { status: status.as_u16(), detail });
        }
        Ok(parse_body(&text))
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<Vec<T>, ServiceError> {
        self.get_list_with_query(path, token, &[]).await
    }

    pub async fn get_list_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ServiceError> {
        let raw = self.execute(Method::GET, path, token, query, None).await?;
        decode_list(raw)
    }

    pub async fn get_item<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, ServiceError> {
        let raw = self.execute(Method::GET, path, token, &[], None).await?;
        decode(normalize_item(raw))
    }

    /// POST/PUT a JSON body; the response body is returned normalized but untyped.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Value, ServiceError> {
        let body = serde_json::to_value(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let raw = self.execute(method, path, token, &[], Some(body)).await?;
        Ok(normalize_item(raw))
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, token: Option<&str>, body: &B) -> Result<Value, ServiceError> {
        self.send(Method::POST, path, token, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, token: Option<&str>, body: &B) -> Result<Value, ServiceError> {
        self.send(Method::PUT, path, token, body).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ServiceError> {
        self.execute(Method::DELETE, path, token, &[], None).await?;
        Ok(())
    }
}

fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    // some endpoints answer 200 with a bare sentence
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

/// Pull a reason out of an error body: a JSON `message`/`title`/`error`/`detail`
/// string, or short plain text.
pub fn extract_detail(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => DETAIL_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(s)) => Some(s),
        Ok(_) => None,
        Err(_) if trimmed.len() <= MAX_TEXT_DETAIL && !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

/// Accepts a bare array, `null`, or an array nested under one of the envelope
/// keys (recursively, so `{"data":{"$values":[...]}}` works too).
pub fn normalize_list(v: Value) -> Result<Vec<Value>, ServiceError> {
    match v {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => {
            for key in LIST_KEYS {
                if let Some(inner) = map.remove(key) {
                    return normalize_list(inner);
                }
            }
            Err(ServiceError::Decode("expected a list response".into()))
        }
        other => Err(ServiceError::Decode(format!("expected a list response, got {other}"))),
    }
}

/// Unwraps `{"data": {...}}` envelopes; anything else is returned unchanged.
pub fn normalize_item(v: Value) -> Value {
    match v {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn decode<T: DeserializeOwned>(v: Value) -> Result<T, ServiceError> {
    serde_json::from_value(v).map_err(|e| ServiceError::Decode(e.to_string()))
}

pub fn decode_list<T: DeserializeOwned>(v: Value) -> Result<Vec<T>, ServiceError> {
    normalize_list(v)?.into_iter().map(decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_shapes_normalize() {
        let expected = vec![json!({"a": 1})];
        assert_eq!(normalize_list(json!([{"a": 1}])).unwrap(), expected);
        assert_eq!(normalize_list(json!({"data": [{"a": 1}]})).unwrap(), expected);
        assert_eq!(normalize_list(json!({"$id": "1", "$values": [{"a": 1}]})).unwrap(), expected);
        assert_eq!(normalize_list(json!({"items": [{"a": 1}], "total": 1})).unwrap(), expected);
        assert_eq!(normalize_list(json!({"data": {"$values": [{"a": 1}]}})).unwrap(), expected);
        assert!(normalize_list(json!(null)).unwrap().is_empty());
        assert!(normalize_list(json!({"data": null})).unwrap().is_empty());
    }

    #[test]
    fn non_list_is_decode_error() {
        assert!(matches!(normalize_list(json!({"id": 1})), Err(ServiceError::Decode(_))));
        assert!(matches!(normalize_list(json!(3)), Err(ServiceError::Decode(_))));
    }

    #[test]
    fn item_envelope_unwrapped() {
        assert_eq!(normalize_item(json!({"data": {"id": 1}, "success": true})), json!({"id": 1}));
        assert_eq!(normalize_item(json!({"id": 1})), json!({"id": 1}));
        assert_eq!(normalize_item(json!({"data": [1]})), json!({"data": [1]}));
    }

    #[test]
    fn detail_extraction() {
        assert_eq!(extract_detail(r#"{"message":"Email exists"}"#).as_deref(), Some("Email exists"));
        assert_eq!(
            extract_detail(r#"{"title":"One or more validation errors occurred.","errors":{}}"#).as_deref(),
            Some("One or more validation errors occurred.")
        );
        assert_eq!(extract_detail("Invalid OTP").as_deref(), Some("Invalid OTP"));
        assert_eq!(extract_detail("<html>oops</html>"), None);
        assert_eq!(extract_detail(""), None);
    }

    #[test]
    fn empty_and_text_bodies() {
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("Deleted"), json!("Deleted"));
    }
}
