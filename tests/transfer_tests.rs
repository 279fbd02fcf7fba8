//! Tests for streaming a single item to disk.

use sfxdl::download::{request_item, resolve_destination, stream_to_file, TransferObserver};
use sfxdl::{create_http_client, DownloadDescriptor, HttpClientConfig, ItemError};
use std::fs;
use std::io::Write;
use std::sync::Mutex;
use reqwest::Url;
use wiremock::MockServer;

mod common;
use common::helpers::*;

/// Records every progress increment it receives.
#[derive(Default)]
struct RecordingObserver {
    increments: Mutex<Vec<u64>>,
}

impl RecordingObserver {
    fn increments(&self) -> Vec<u64> {
        self.increments.lock().unwrap().clone()
    }
}

impl TransferObserver for RecordingObserver {
    fn on_chunk(&self, bytes: u64) {
        self.increments.lock().unwrap().push(bytes);
    }
}

fn descriptor_for(server: &MockServer, file_path: &str) -> DownloadDescriptor {
    let url = Url::parse(&format!("{}{}", server.uri(), file_path)).unwrap();
    DownloadDescriptor::new(file_path.trim_start_matches('/'), file_path, url, 0)
}

#[tokio::test]
async fn test_stream_to_file_reports_bounded_chunks() {
    let server = MockServer::start().await;
    let content = create_test_content(10_000);
    mount_file(&server, "/sfx/boom.wav", &content).await;

    let temp_dir = create_temp_dir();
    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/sfx/boom.wav");

    let destination = resolve_destination(temp_dir.path(), &descriptor)
        .await
        .unwrap();
    let response = request_item(&client, &descriptor).await.unwrap();
    let observer = RecordingObserver::default();
    let written = stream_to_file(response, &destination, 1024, &observer)
        .await
        .unwrap();

    assert_eq!(written, 10_000);
    assert_eq!(destination, temp_dir.path().join("boom.wav"));
    assert_file_content(&destination, &content);
    assert_no_partial_files(temp_dir.path());

    let increments = observer.increments();
    assert!(increments.iter().all(|&n| n > 0 && n <= 1024));
    assert_eq!(increments.iter().sum::<u64>(), 10_000);
}

#[tokio::test]
async fn test_stream_to_file_replaces_existing_file() {
    let server = MockServer::start().await;
    let content = create_test_content(100);
    mount_file(&server, "/short.wav", &content).await;

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("short.wav");
    fs::write(&destination, create_test_content(5000)).unwrap();

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/short.wav");
    let response = request_item(&client, &descriptor).await.unwrap();
    let written = stream_to_file(response, &destination, 7, &RecordingObserver::default())
        .await
        .unwrap();

    assert_eq!(written, 100);
    assert_file_content(&destination, &content);
}

#[tokio::test]
async fn test_stream_to_file_empty_body() {
    let server = MockServer::start().await;
    mount_file(&server, "/silence.wav", &[]).await;

    let temp_dir = create_temp_dir();
    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/silence.wav");
    let destination = temp_dir.path().join("silence.wav");

    let response = request_item(&client, &descriptor).await.unwrap();
    let observer = RecordingObserver::default();
    let written = stream_to_file(response, &destination, 1024, &observer)
        .await
        .unwrap();

    assert_eq!(written, 0);
    assert_file_exists(&destination);
    assert_eq!(observer.increments().iter().sum::<u64>(), 0);
}

#[tokio::test]
async fn test_stream_to_file_write_failure() {
    let server = MockServer::start().await;
    mount_file(&server, "/blocked.wav", &create_test_content(64)).await;

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("blocked.wav");
    fs::create_dir(&destination).unwrap();
    fs::write(destination.join("inside"), b"x").unwrap();

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/blocked.wav");

    let response = request_item(&client, &descriptor).await.unwrap();
    let err = stream_to_file(response, &destination, 1024, &RecordingObserver::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::WriteFailed { .. }));
    assert!(destination.is_dir());
    assert_no_partial_files(temp_dir.path());
}

#[tokio::test]
async fn test_stream_to_file_keeps_neighbouring_part_file() {
    let server = MockServer::start().await;
    let content = create_test_content(32);
    mount_file(&server, "/boom.wav", &content).await;

    let temp_dir = create_temp_dir();
    let neighbour = temp_dir.path().join("boom.wav.part");
    fs::write(&neighbour, b"another item").unwrap();

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/boom.wav");
    let destination = temp_dir.path().join("boom.wav");

    let response = request_item(&client, &descriptor).await.unwrap();
    stream_to_file(response, &destination, 1024, &RecordingObserver::default())
        .await
        .unwrap();

    assert_file_content(&destination, &content);
    assert_file_content(&neighbour, b"another item");
}

#[tokio::test]
async fn test_stream_to_file_body_cut_short() {
    let base = spawn_raw_server(|_, stream| {
        let _ = stream.write_all(raw_response_head(100).as_bytes());
        let _ = stream.write_all(&[7u8; 10]);
        let _ = stream.flush();
    });

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("cut.wav");
    fs::write(&destination, b"previous run").unwrap();

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let url = Url::parse(&format!("{}/cut.wav", base)).unwrap();
    let descriptor = DownloadDescriptor::new("cut.wav", "cut.wav", url, 0);

    let response = request_item(&client, &descriptor).await.unwrap();
    let observer = RecordingObserver::default();
    let err = stream_to_file(response, &destination, 1024, &observer)
        .await
        .unwrap_err();

    assert!(matches!(err, ItemError::TransferFailed(_)));
    assert_file_content(&destination, b"previous run");
    assert_no_partial_files(temp_dir.path());
    assert!(observer.increments().iter().sum::<u64>() <= 10);
}

#[tokio::test]
async fn test_request_item_error_status() {
    let server = MockServer::start().await;
    mount_status(&server, "/missing.wav", 404).await;

    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let descriptor = descriptor_for(&server, "/missing.wav");

    let err = request_item(&client, &descriptor).await.unwrap_err();
    assert!(matches!(err, ItemError::TransferFailed(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_resolve_destination_under_a_file() {
    let temp_dir = create_temp_dir();
    let root = temp_dir.path().join("not_a_dir");
    fs::write(&root, b"file").unwrap();

    let url = Url::parse("http://domain.com/a.wav").unwrap();
    let descriptor = DownloadDescriptor::new("a.wav", "a.wav", url, 0);

    let err = resolve_destination(&root, &descriptor).await.unwrap_err();
    assert!(matches!(err, ItemError::PathCreationFailed { .. }));
}
