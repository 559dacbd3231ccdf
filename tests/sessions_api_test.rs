use std::sync::{Arc, Once};

use assessment_backend::{
    build_router,
    config::{init_config_with, Config},
    database::memory::MemoryStore,
    storage::memory::MemoryBlobStore,
    utils::crypto::hash_password,
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "correct horse battery staple";
const ORIGIN: &str = "http://assess.test";

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        let admin_password_hash = hash_password(ADMIN_PASSWORD).expect("hash");
        let _ = init_config_with(Config {
            server_address: "127.0.0.1:0".into(),
            database_url: String::new(),
            jwt_secret: "test_secret_key".into(),
            admin_password_hash,
            admin_token_ttl_hours: 1,
            public_origin: ORIGIN.into(),
            uploads_dir: "uploads".into(),
            public_rps: 10_000,
            admin_rps: 10_000,
            max_upload_mb: 5,
            log_json: false,
        });
    });
}

fn app() -> (Router, Arc<MemoryBlobStore>) {
    init();
    let blobs = Arc::new(MemoryBlobStore::new());
    let state = AppState::new(Arc::new(MemoryStore::new()), blobs.clone());
    (build_router(state), blobs)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: JsonValue) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

/// Returns `(session_id, token)`.
async fn create_session(app: &Router, admin: &str) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/admin/sessions",
            Some(admin),
            json!({ "candidate_name": "Alice Martin", "candidate_email": "alice@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 32);
    assert_eq!(body["url"], format!("{}/test/{}", ORIGIN, token));
    (body["session"]["id"].as_str().unwrap().to_string(), token)
}

fn video_request(session_id: &str, question_number: &str, duration: &str) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let mut body = Vec::new();
    let mut text_field = |name: &str, value: &str| {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    };
    text_field("session_id", session_id);
    text_field("question_number", question_number);
    text_field("duration", duration);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"q{question_number}.webm\"\r\nContent-Type: video/webm\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"\x1a\x45\xdf\xa3fake-webm-frames");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn questions_hide_expected_answers() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/questions", None)).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 36);
    assert!(questions.iter().all(|q| q.get("expected_answer").is_none()));
}

#[tokio::test]
async fn admin_routes_require_a_valid_bearer() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/admin/sessions", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, _) = send(&app, get("/api/admin/sessions", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = admin_token(&app).await;
    let (status, body) = send(&app, get("/api/admin/sessions", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessions"], json!([]));
}

#[tokio::test]
async fn text_answers_are_upserted_per_question() {
    let (app, _) = app();
    let admin = admin_token(&app).await;
    let (session_id, token) = create_session(&app, &admin).await;

    for text in ["first draft", "final answer"] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/responses",
                None,
                json!({ "session_id": session_id, "question_number": 1, "text_response": text }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["success"], true);
    }

    let (status, body) = send(&app, get(&format!("/api/public/sessions/{token}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let responses = body["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["question_number"], 1);
    assert_eq!(responses[0]["text_response"], "final answer");
    assert!(body["session"]["started_at"].is_string());
    assert!(body["session"]["completed_at"].is_null());
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/responses",
            None,
            json!({ "text_response": "orphan" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) =
        send(&app, json_request("POST", "/api/complete", None, json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/public/sessions/unknown-token", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn video_upload_stores_blob_and_records_response() {
    let (app, blobs) = app();
    let admin = admin_token(&app).await;
    let (session_id, token) = create_session(&app, &admin).await;

    let (status, body) = send(&app, video_request(&session_id, "3", "42")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(
        body["video_url"],
        format!("memory://{}/3.webm", session_id)
    );

    let stored = blobs
        .get(&format!("{}/3.webm", session_id))
        .await
        .expect("blob stored");
    assert_eq!(stored.content_type, "video/webm");

    let (_, body) = send(&app, get(&format!("/api/public/sessions/{token}"), None)).await;
    let responses = body["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["question_number"], 3);
    assert_eq!(responses[0]["duration_seconds"], 42);

    let (status, _) = send(&app, video_request(&session_id, "abc", "1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completing_closes_the_session() {
    let (app, _) = app();
    let admin = admin_token(&app).await;
    let (session_id, token) = create_session(&app, &admin).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/complete",
            None,
            json!({ "session_id": session_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&format!("/api/public/sessions/{token}"), None)).await;
    assert_eq!(body["session"]["current_question"], 36);
    assert!(body["session"]["completed_at"].is_string());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/responses",
            None,
            json!({ "session_id": session_id, "question_number": 2, "text_response": "late" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, get("/api/admin/dashboard", Some(&admin))).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["completed"], 1);
}

#[tokio::test]
async fn review_groups_answers_by_block() {
    let (app, _) = app();
    let admin = admin_token(&app).await;
    let (session_id, _) = create_session(&app, &admin).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/responses",
            None,
            json!({ "session_id": session_id, "question_number": 6, "text_response": "Claude" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        get(&format!("/api/admin/sessions/{session_id}/review"), Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total_points"], 121);
    assert_eq!(body["status"], "in_progress");
    let blocks = body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[0]["answered"], 0);
    assert_eq!(blocks[1]["answered"], 1);

    let (_, body) = send(&app, get("/api/admin/sessions", Some(&admin))).await;
    assert_eq!(body["sessions"][0]["responses_count"], 1);
}

#[tokio::test]
async fn deleting_a_session_removes_answers_and_videos() {
    let (app, blobs) = app();
    let admin = admin_token(&app).await;
    let (session_id, token) = create_session(&app, &admin).await;

    let (status, _) = send(&app, video_request(&session_id, "1", "10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blobs.len().await, 1);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/admin/sessions/{session_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert!(blobs.is_empty().await);
    let (status, _) = send(&app, get(&format!("/api/public/sessions/{token}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        get(
            &format!("/api/admin/responses?session_id={session_id}"),
            Some(&admin),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responses"], json!([]));

    let (status, _) = send(
        &app,
        get(&format!("/api/admin/sessions/{session_id}"), Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_still_get_the_error_envelope() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/responses",
            None,
            json!({ "session_id": "not-a-uuid", "question_number": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/complete")
        .body(Body::from(r#"{"session_id":null}"#))
        .unwrap();
    let (status, body) = send(&app, no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/upload", None, json!({ "video": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let broken_json = Request::builder()
        .method("POST")
        .uri("/api/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"password\":"))
        .unwrap();
    let (status, body) = send(&app, broken_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn admin_responses_require_a_session_id() {
    let (app, _) = app();
    let admin = admin_token(&app).await;

    let (status, body) = send(&app, get("/api/admin/responses", Some(&admin))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "session_id is required");

    let (status, body) = send(
        &app,
        get("/api/admin/responses?session_id=nope", Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/sessions",
            Some(&admin),
            json!({ "candidate_name": "No Email" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}
