//! Blocking HTTP client and suite plumbing for API automation tests.
//!
//! # Overview
//! `ApiClient` issues GET/POST/PUT/DELETE requests against one base URL with
//! a fixed set of default headers (JSON content type, optional bearer
//! token). Responses come back as plain data whatever their status, so tests
//! assert on status codes and bodies directly.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   a `Transport` executes them. `UreqTransport` is the default, tests can
//!   substitute their own.
//! - What each operation does on a transport failure is an explicit
//!   `ErrorPolicy`, not a difference hidden in the operation bodies.
//! - `SuiteConfig` holds the per-run options (environment, browser, URL,
//!   sanity selection); `logging::init` sets up tracing once per process.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod policy;
pub mod transport;

pub use client::{ApiClient, ClientConfig};
pub use config::{skip_requested, Selection, SuiteConfig};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use policy::{ErrorPolicies, ErrorPolicy, Operation};
pub use transport::{Transport, UreqTransport};
