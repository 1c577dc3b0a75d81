mod common;

use axum::http::StatusCode;

use common::TestApp;

#[tokio::test]
async fn test_public_endpoint_needs_no_token() {
    let app = TestApp::new();
    let res = app.get("/api/endpoint/for-everyone", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Hello World!");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let res = app.get("/api/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert!(body.get("database_latency_ms").is_none());
}

#[tokio::test]
async fn test_protected_endpoints_require_bearer() {
    let app = TestApp::new();
    for path in [
        "/api/endpoint/for-user",
        "/api/endpoint/for-admin",
        "/api/endpoint/for-super-admin",
        "/api/auth/me",
    ] {
        let res = app.get(path, None).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{path}");

        let res = app.get(path, Some("not-a-token")).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn test_roles_gate_exactly() {
    let app = TestApp::new();
    let (user, _) = app.signed_in("ursula", "ROLE_USER").await;
    let (admin, _) = app.signed_in("adam", "ROLE_ADMIN").await;
    let (root, _) = app.signed_in("sam", "super_admin").await;

    let cases = [
        (&user, "/api/endpoint/for-user", StatusCode::OK),
        (&user, "/api/endpoint/for-admin", StatusCode::FORBIDDEN),
        (&admin, "/api/endpoint/for-admin", StatusCode::OK),
        (&admin, "/api/endpoint/for-user", StatusCode::FORBIDDEN),
        (&root, "/api/endpoint/for-super-admin", StatusCode::OK),
        (&root, "/api/endpoint/for-admin", StatusCode::FORBIDDEN),
    ];

    for (token, path, expected) in cases {
        let res = app.get(path, Some(token)).await;
        assert_eq!(res.status, expected, "{path}");
    }

    let res = app.get("/api/endpoint/for-admin", Some(&admin)).await;
    assert_eq!(res.body, "Hello Admin!");

    let me = app.get("/api/auth/me", Some(&root)).await.json();
    assert_eq!(me["role"], "ROLE_SUPER_ADMIN");
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_token() {
    let app = TestApp::new();
    let (_, refresh) = app.signed_in("alice", "ROLE_USER").await;
    let res = app.get("/api/endpoint/for-user", Some(&refresh)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
