//! HTTP request and response types exchanged with a `Transport`.
//!
//! # Design
//! `ApiClient` describes each call as a plain-data `HttpRequest` and hands it
//! to a transport, which returns a plain-data `HttpResponse`. Keeping the
//! request as data makes URL composition and header injection checkable
//! without a network, and lets tests swap in a stub transport.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (base URL already joined with the path). Query
/// parameters are kept apart from `url` so the transport encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Any status code is a valid response; callers inspect `status` themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the first header matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Decode the body as untyped JSON, for assertions and schema checks.
    pub fn json_value(&self) -> Result<serde_json::Value> {
        self.json()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(response(200, "").is_success());
        assert!(response(204, "").is_success());
        assert!(!response(301, "").is_success());
        assert!(!response(404, "").is_success());
        assert!(!response(500, "").is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, "{}");
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("authorization"), None);
    }

    #[test]
    fn json_decodes_body() {
        let resp = response(404, r#"{"error":"User not found"}"#);
        let value = resp.json_value().unwrap();
        assert_eq!(value, serde_json::json!({"error": "User not found"}));
    }

    #[test]
    fn json_reports_bad_body() {
        let resp = response(200, "not json");
        let err = resp.json_value().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
