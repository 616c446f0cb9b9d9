use std::time::Duration;
use serde_json::json;
use tryon_core::{JobClient, JobHandle, JobRequest, JobStatus, PollConfig, RemoteConfig, RemoteJobClient, TryOnError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, poll: PollConfig) -> RemoteJobClient {
    let remote = RemoteConfig::new(
        format!("{}/api/", server.uri()),
        "secret-token",
        "session=abc",
        "https://tryon.example",
    );
    RemoteJobClient::new(remote, &poll).unwrap()
}

fn request() -> JobRequest {
    JobRequest::new("cGVyc29u".into(), "Z2FybWVudA==".into(), 42)
}

#[tokio::test]
async fn test_submit_sends_credentials_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Submit"))
        .and(header("token", "secret-token"))
        .and(header("cookie", "session=abc"))
        .and(header("referer", "https://tryon.example"))
        .and(body_json(json!({
            "clothImage": "Z2FybWVudA==",
            "humanImage": "cGVyc29u",
            "seed": 42
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "success", "result": "task-123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client_for(&server, PollConfig::default()).submit(&request()).await.unwrap();
    assert_eq!(handle, JobHandle::new("task-123"));
}

#[tokio::test]
async fn test_submit_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Submit"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server, PollConfig::default()).submit(&request()).await.unwrap_err();
    assert!(matches!(err, TryOnError::Submission(ref msg) if msg.contains("503")), "{err}");
}

#[tokio::test]
async fn test_submit_rejected_by_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "fail", "result": ""}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, PollConfig::default()).submit(&request()).await.unwrap_err();
    assert!(matches!(err, TryOnError::Submission(_)));
}

#[tokio::test]
async fn test_submit_without_job_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"status": "success"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, PollConfig::default()).submit(&request()).await.unwrap_err();
    assert!(matches!(err, TryOnError::Submission(_)));
}

#[tokio::test]
async fn test_query_statuses() {
    let server = MockServer::start().await;
    let cases = [
        ("t-pending", json!({"result": {"status": "running"}})),
        ("t-done", json!({"result": {"status": "success", "result": "aW1hZ2U="}})),
        ("t-failed", json!({"result": {"status": "error", "result": "bad garment"}})),
    ];
    for (task, body) in &cases {
        Mock::given(method("GET"))
            .and(path("/api/Query"))
            .and(query_param("taskId", *task))
            .and(header("token", "secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;
    }

    let client = client_for(&server, PollConfig::default());
    assert_eq!(client.query_status(&JobHandle::new("t-pending")).await.unwrap(), JobStatus::Pending);
    assert_eq!(
        client.query_status(&JobHandle::new("t-done")).await.unwrap(),
        JobStatus::Success("aW1hZ2U=".into())
    );
    assert_eq!(
        client.query_status(&JobHandle::new("t-failed")).await.unwrap(),
        JobStatus::Error("bad garment".into())
    );
}

#[tokio::test]
async fn test_query_malformed_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, PollConfig::default())
        .query_status(&JobHandle::new("t-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, TryOnError::Transport(_)));
}

#[tokio::test]
async fn test_query_http_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Query"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server, PollConfig::default())
        .query_status(&JobHandle::new("t-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, TryOnError::Transport(ref msg) if msg.contains("404")), "{err}");
}

#[tokio::test]
async fn test_query_timeout_is_pending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": {"status": "success", "result": "aW1hZ2U="}}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let poll = PollConfig {
        query_timeout: Duration::from_millis(200),
        ..PollConfig::default()
    };
    let status = client_for(&server, poll)
        .query_status(&JobHandle::new("t-slow"))
        .await
        .unwrap();
    assert_eq!(status, JobStatus::Pending);
}
