//! Responses whose bodies are not UTF-8 text, served from a bare socket.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;

use apitest_core::ApiClient;
use serde_json::json;

const BINARY_BODY: [u8; 4] = [0xff, 0xfe, 0x00, 0x80];

/// Answer every connection with a 200 carrying `BINARY_BODY`.
fn spawn_binary_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            // Drain the request so closing the socket does not reset it.
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut body = vec![0; content_length];
            let _ = reader.read_exact(&mut body);

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                BINARY_BODY.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&BINARY_BODY);
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn expected_text() -> String {
    String::from_utf8_lossy(&BINARY_BODY).into_owned()
}

#[test]
fn fetch_returns_non_utf8_response() {
    let client = ApiClient::new(&spawn_binary_server(), None);
    let resp = client
        .fetch("/bin", None)
        .unwrap()
        .expect("server answered, so a response is expected");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, expected_text());
    assert!(resp.json_value().is_err());
}

#[test]
fn create_returns_non_utf8_response() {
    let client = ApiClient::new(&spawn_binary_server(), None);
    let resp = client
        .create("/bin", Some(&json!({"name": "x"})))
        .unwrap()
        .expect("server answered, so a response is expected");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type"), Some("application/octet-stream"));
    assert_eq!(resp.body, expected_text());
}
