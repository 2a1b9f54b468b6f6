//! End-to-end tests: the real router served on an ephemeral port, a
//! snapshot file in a temp dir, and a mocked text-generation endpoint.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::Duration;

use httpmock::{Method::POST, MockServer};
use reqwest::StatusCode;
use serde_json::{Value, json};

use student_gateway::api;
use student_gateway::app_state::AppState;
use student_gateway::domain::StudentStore;
use student_gateway::persistence::SnapshotFile;
use student_gateway::service::StudentService;
use student_gateway::summarizer::HttpSummarizer;

struct TestServer {
    base: String,
    http: reqwest::Client,
    store: Arc<StudentStore>,
}

impl TestServer {
    async fn start(store: StudentStore, summarizer_url: &str) -> Self {
        let Ok(summarizer) =
            HttpSummarizer::new(summarizer_url, "llama3", "/response", Duration::from_secs(5))
        else {
            panic!("summarizer should build");
        };
        let store = Arc::new(store);
        let service = StudentService::new(
            Arc::clone(&store),
            Arc::new(summarizer),
            Duration::from_secs(5),
        );
        let app = api::build_app(
            AppState {
                student_service: Arc::new(service),
            },
            Duration::from_secs(10),
        );

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            http: reqwest::Client::new(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn create(&self, body: Value) -> (StatusCode, Value) {
        let Ok(response) = self
            .http
            .post(self.url("/students"))
            .json(&body)
            .send()
            .await
        else {
            panic!("request failed");
        };
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn send(&self, method: reqwest::Method, path: &str) -> (StatusCode, Value) {
        let Ok(response) = self.http.request(method, self.url(path)).send().await else {
            panic!("request failed");
        };
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }
}

fn temp_dir() -> tempfile::TempDir {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("temp dir");
    };
    dir
}

async fn open_store(snapshot: &SnapshotFile) -> StudentStore {
    let Ok(store) = StudentStore::open(snapshot.clone()).await else {
        panic!("open failed");
    };
    store
}

async fn assert_in_sync(server: &TestServer, snapshot: &SnapshotFile) {
    let reopened = open_store(snapshot).await;
    assert_eq!(reopened.list().await, server.store.list().await);
}

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
    let server = TestServer::start(StudentStore::in_memory(), "http://127.0.0.1:9").await;

    let (status, ana) = server
        .create(json!({"name": "Ana", "age": 21, "email": "ana@x.io"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ana, json!({"id": 1, "name": "Ana", "age": 21, "email": "ana@x.io"}));

    let (_, bo) = server
        .create(json!({"name": "Bo", "age": 30, "email": "bo@x.io"}))
        .await;
    assert_eq!(bo["id"], 2);

    let (status, _) = server.send(reqwest::Method::DELETE, "/students/1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, cy) = server
        .create(json!({"name": "Cy", "age": 19, "email": "cy@x.io"}))
        .await;
    assert_eq!(cy["id"], 3);
}

#[tokio::test]
async fn snapshot_matches_memory_after_each_request() {
    let dir = temp_dir();
    let snapshot = SnapshotFile::new(dir.path().join("data").join("students.json"));
    let server = TestServer::start(open_store(&snapshot).await, "http://127.0.0.1:9").await;

    server.create(json!({"name": "Ana", "age": 21})).await;
    assert_in_sync(&server, &snapshot).await;

    server.create(json!({"name": "Bo", "age": 30})).await;
    assert_in_sync(&server, &snapshot).await;

    let Ok(response) = server
        .http
        .put(server.url("/students/1"))
        .json(&json!({"name": "Anabel", "age": 22, "email": "a@x.io"}))
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert_in_sync(&server, &snapshot).await;

    server.send(reqwest::Method::DELETE, "/students/2").await;
    assert_in_sync(&server, &snapshot).await;

    let Ok(Some(on_disk)) = snapshot.read().await else {
        panic!("snapshot should exist");
    };
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk.first().map(|s| s.name.as_str()), Some("Anabel"));
}

#[tokio::test]
async fn restart_resumes_from_snapshot() {
    let dir = temp_dir();
    let snapshot = SnapshotFile::new(dir.path().join("students.json"));
    {
        let server = TestServer::start(open_store(&snapshot).await, "http://127.0.0.1:9").await;
        server.create(json!({"name": "Ana"})).await;
        server.create(json!({"name": "Bo"})).await;
    }

    let server = TestServer::start(open_store(&snapshot).await, "http://127.0.0.1:9").await;
    let (status, list) = server.send(reqwest::Method::GET, "/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(2));

    let (_, cy) = server.create(json!({"name": "Cy"})).await;
    assert_eq!(cy["id"], 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_receive_distinct_ids() {
    let dir = temp_dir();
    let snapshot = SnapshotFile::new(dir.path().join("students.json"));
    let server = Arc::new(
        TestServer::start(open_store(&snapshot).await, "http://127.0.0.1:9").await,
    );

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let server = Arc::clone(&server);
            tokio::spawn(async move { server.create(json!({"name": format!("S{i}")})).await })
        })
        .collect();

    let mut ids = Vec::with_capacity(100);
    for handle in handles {
        let Ok((status, body)) = handle.await else {
            panic!("task failed");
        };
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_u64().unwrap_or_default());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=100).collect::<Vec<u64>>());

    let Ok(Some(on_disk)) = snapshot.read().await else {
        panic!("snapshot should exist");
    };
    assert_eq!(on_disk.len(), 100);
}

#[tokio::test]
async fn summary_relays_generated_text() {
    let mock_server = MockServer::start_async().await;
    let mock = mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("a student named Ana, aged 21, email: ana@x.io.");
            then.status(200)
                .json_body(json!({"response": "Ana is 21.", "done": true}));
        })
        .await;

    let server = TestServer::start(
        StudentStore::in_memory(),
        &mock_server.url("/api/generate"),
    )
    .await;
    server
        .create(json!({"name": "Ana", "age": 21, "email": "ana@x.io"}))
        .await;

    let (status, body) = server.send(reqwest::Method::GET, "/students/1/summary").await;
    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "summary": "Ana is 21."}));
}

#[tokio::test]
async fn summary_failure_is_bad_gateway() {
    let mock_server = MockServer::start_async().await;
    mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(500).body("boom");
        })
        .await;

    let server = TestServer::start(
        StudentStore::in_memory(),
        &mock_server.url("/api/generate"),
    )
    .await;
    server.create(json!({"name": "Ana"})).await;

    let (status, body) = server.send(reqwest::Method::GET, "/students/1/summary").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], 3002);

    let (status, _) = server.send(reqwest::Method::GET, "/students/9/summary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_store_size() {
    let server = TestServer::start(StudentStore::in_memory(), "http://127.0.0.1:9").await;
    server.create(json!({"name": "Ana"})).await;

    let (status, body) = server.send(reqwest::Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["students"], 1);
    assert_eq!(body["persistence"], false);
}
