//! Thin blocking client for the API under test.
//!
//! # Design
//! `ApiClient` holds an immutable `ClientConfig` (base URL, default headers,
//! error policies) and a `Transport`. Each operation builds an `HttpRequest`,
//! hands it to the transport and applies the operation's `ErrorPolicy` to a
//! transport failure. Status codes are never interpreted here.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::policy::{ErrorPolicies, ErrorPolicy, Operation};
use crate::transport::{Transport, UreqTransport};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
const JSON: &str = "application/json";

/// Immutable client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    default_headers: BTreeMap<String, String>,
    policies: ErrorPolicies,
}

impl ClientConfig {
    /// Default headers are `Content-Type: application/json`, plus
    /// `Authorization: Bearer <token>` when a token is given.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert(CONTENT_TYPE.to_string(), JSON.to_string());
        if let Some(token) = auth_token {
            default_headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }
        Self {
            base_url: base_url.to_string(),
            default_headers,
            policies: ErrorPolicies::default(),
        }
    }

    pub fn with_policies(mut self, policies: ErrorPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn policies(&self) -> &ErrorPolicies {
        &self.policies
    }

    /// Join `base_url` and `path` with exactly one `/` between them.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Blocking client issuing GET/POST/PUT/DELETE against one base URL.
///
/// Every HTTP response, whatever its status, comes back as
/// `Ok(Some(response))`. `Ok(None)` means the transport failed and the
/// operation's policy is `SuppressAndLog`; `Err` means it failed under
/// `Propagate`, the request body could not be serialized, or a response
/// body broke off mid-read.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client over the default `ureq` transport. Does no I/O.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Self {
        Self::with_transport(ClientConfig::new(base_url, auth_token), UreqTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        debug!(base_url = %config.base_url, "api client configured");
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        self.config.default_headers()
    }

    /// GET `path`, with optional query parameters.
    pub fn fetch(
        &self,
        path: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Option<HttpResponse>> {
        let mut request = self.request(HttpMethod::Get, path, None);
        request.query = query_params
            .unwrap_or_default()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.send(Operation::Fetch, request)
    }

    /// POST `path` with `body` encoded as JSON.
    pub fn create<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<HttpResponse>> {
        let request = self.request(HttpMethod::Post, path, encode(body)?);
        self.send(Operation::Create, request)
    }

    /// PUT `path` with `body` encoded as JSON.
    pub fn replace<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<HttpResponse>> {
        let request = self.request(HttpMethod::Put, path, encode(body)?);
        self.send(Operation::Replace, request)
    }

    /// DELETE `path`.
    pub fn remove(&self, path: &str) -> Result<Option<HttpResponse>> {
        let request = self.request(HttpMethod::Delete, path, None);
        self.send(Operation::Remove, request)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: self.config.url_for(path),
            headers: self
                .config
                .default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            query: Vec::new(),
            body,
        }
    }

    fn send(&self, op: Operation, request: HttpRequest) -> Result<Option<HttpResponse>> {
        debug!(method = %request.method, url = %request.url, "sending request");
        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(status = response.status, url = %request.url, "received response");
                Ok(Some(response))
            }
            Err(err) if err.is_transport() => match self.config.policies.policy(op) {
                ErrorPolicy::Propagate => Err(err),
                ErrorPolicy::SuppressAndLog => {
                    warn!(operation = op.name(), error = %err, "request failed, no response");
                    Ok(None)
                }
            },
            // A server answered; policies only cover the no-response case.
            Err(err) => Err(err),
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Option<String>> {
    body.map(|b| serde_json::to_string(b).map_err(|e| ApiError::Serialization(e.to_string())))
        .transpose()
}
