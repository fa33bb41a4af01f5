//! Blocking transport that executes `HttpRequest`s.
//!
//! # Design
//! `Transport` is the seam between the client and the network. The default
//! implementation wraps a `ureq` agent configured so that 4xx/5xx responses
//! come back as data; only failures to obtain a response at all become
//! `ApiError::Transport`. Bodies are decoded lossily, so a response whose
//! body is not UTF-8 is still a response.

use ureq::{Agent, RequestBuilder};

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Largest response body read into memory.
pub const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Executes one HTTP request and blocks until a response or failure.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let transport_err = |e: ureq::Error| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => prepare(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(url), request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request).send_empty(),
        };
        let mut response = result.map_err(transport_err)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(|e| ApiError::Body {
                url: url.to_string(),
                status,
                message: e.to_string(),
            })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}
