//! Suite configuration for API test runs.
//!
//! Replaces loose per-run option lookups with one typed structure. Every
//! field has a command-line flag and, where useful, an environment variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `APITEST_ENV` | dev | Environment the tests run against |
//! | `APITEST_BROWSER` | firefox | Browser for UI suites |
//! | `APITEST_URL` | http://localhost | Base URL of the API under test |
//! | `APITEST_AUTH_TOKEN` | (none) | Bearer token sent with every request |
//! | `APITEST_LOG` | info | Default log level |
//! | `SKIP_TEST` | (unset) | When set, tests calling [`skip_requested`] bail out |

use clap::Parser;

use crate::client::{ApiClient, ClientConfig};
use crate::logging;
use crate::transport::UreqTransport;

/// Name of the variable that asks every test to skip itself.
pub const SKIP_TEST_VAR: &str = "SKIP_TEST";

pub const DEFAULT_ENV: &str = "dev";
pub const DEFAULT_BROWSER: &str = "firefox";
pub const DEFAULT_URL: &str = "http://localhost";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Options for one run of the API suite.
#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(name = "apitest")]
#[command(about = "API automation test suite options")]
pub struct SuiteConfig {
    /// Environment to run the tests against.
    #[arg(long, env = "APITEST_ENV", default_value = DEFAULT_ENV)]
    pub env: String,

    /// Browser to run the tests on.
    #[arg(long, env = "APITEST_BROWSER", default_value = DEFAULT_BROWSER)]
    pub browser: String,

    /// Web/API URL to run the tests against.
    #[arg(long, env = "APITEST_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Bearer token added to every request.
    #[arg(long, env = "APITEST_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Run only sanity tests.
    #[arg(long)]
    pub sanity: bool,

    /// Skip sanity tests.
    #[arg(long)]
    pub skip_sanity: bool,

    /// Log level (error, warn, info, debug, trace). RUST_LOG overrides it.
    #[arg(long, env = "APITEST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

/// Which tests a run includes, by their sanity marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    SanityOnly,
    SkipSanity,
}

impl Selection {
    pub fn includes(self, is_sanity: bool) -> bool {
        match self {
            Selection::All => true,
            Selection::SanityOnly => is_sanity,
            Selection::SkipSanity => !is_sanity,
        }
    }
}

impl SuiteConfig {
    /// Defaults overridden by environment variables only.
    pub fn from_env() -> Self {
        Self::parse_from(["apitest"])
    }

    /// `--sanity` takes precedence when both flags are given.
    pub fn selection(&self) -> Selection {
        if self.sanity {
            Selection::SanityOnly
        } else if self.skip_sanity {
            Selection::SkipSanity
        } else {
            Selection::All
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.url, self.auth_token.as_deref())
    }

    /// Client over the default transport for this run's URL and token.
    pub fn client(&self) -> ApiClient {
        ApiClient::with_transport(self.client_config(), UreqTransport::new())
    }

    /// Set up process-wide logging at `log_level`; no-op after the first call.
    pub fn init_logging(&self) -> bool {
        logging::init(&self.log_level)
    }

    pub fn banner(&self) -> String {
        format!(
            "Running tests in {} environment on {} browser, for {}",
            self.env, self.browser, self.url
        )
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            browser: DEFAULT_BROWSER.to_string(),
            url: DEFAULT_URL.to_string(),
            auth_token: None,
            sanity: false,
            skip_sanity: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// True when `SKIP_TEST` is present in the environment.
pub fn skip_requested() -> bool {
    std::env::var_os(SKIP_TEST_VAR).is_some()
}
