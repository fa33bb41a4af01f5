//! Shared setup for tests that talk to the live mock server.

#![allow(dead_code)]

use apitest_core::ApiClient;

/// Start the mock server on a random port and return its base URL.
///
/// The server runs on a current-thread tokio runtime in a background thread
/// and lives until the test process exits.
pub fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Client against a fresh mock server, no token.
pub fn api_client() -> ApiClient {
    apitest_core::logging::init("debug");
    ApiClient::new(&spawn_server(), None)
}

/// A base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";
