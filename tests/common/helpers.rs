#![allow(dead_code)]

use sfxdl::{DownloaderBuilder, ManifestSource};
use std::fs;
use std::io::{BufRead, BufReader};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_MANIFEST_PATH: &str = "/server/soundlist";
pub const TEST_USER_AGENT: &str = "sfxdl-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// Asserts that no in-flight file was left in `dir`
pub fn assert_no_partial_files(dir: &Path) {
    if !dir.exists() {
        return;
    }
    let leftovers: Vec<_> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".sfxdl-"))
        .collect();
    assert!(leftovers.is_empty(), "Leftover partial files: {:?}", leftovers);
}

/// Source pointing at the mock server with the default manifest path
pub fn source_for(server: &MockServer) -> ManifestSource {
    ManifestSource::new(&server.uri())
        .expect("Failed to create source")
        .with_path(TEST_MANIFEST_PATH)
}

/// Serve `body` as the manifest
pub async fn mount_manifest(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(TEST_MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve `content` at `file_path`, expecting exactly one request
pub async fn mount_file(server: &MockServer, file_path: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer `status` at `file_path`
pub async fn mount_status(server: &MockServer, file_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Creates a downloader builder with hidden progress bars writing into `dir`
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .user_agent(TEST_USER_AGENT)
}

/// Serve raw HTTP on a local port, one thread per connection.
///
/// `handler` receives the request path and writes the whole response itself,
/// which allows truncated bodies and slow answers. Returns the base URL.
pub fn spawn_raw_server<F>(handler: F) -> String
where
    F: Fn(&str, &mut TcpStream) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind raw server");
    let addr = listener.local_addr().expect("Failed to read raw server address");
    let handler = Arc::new(handler);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let handler = handler.clone();
            thread::spawn(move || {
                let path = read_request_path(&stream);
                handler(&path, &mut stream);
            });
        }
    });

    format!("http://{}", addr)
}

/// Head of a `200 OK` response that closes the connection after the body
pub fn raw_response_head(content_length: usize) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        content_length
    )
}

fn read_request_path(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream"));
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return String::new();
    }
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
        }
    }
    request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string()
}
