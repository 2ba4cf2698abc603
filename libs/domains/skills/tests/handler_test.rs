//! Handler tests for the skills domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_skills::*;
use domain_users::{Authenticator, InMemoryUserRepository, RegisterUser, UserService, with_identity};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

struct TestApp {
    router: Router,
    users: UserService<InMemoryUserRepository>,
    auth: Authenticator<InMemoryUserRepository>,
}

impl TestApp {
    fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let jwt = JwtAuth::new(&JwtConfig::new("skills-test-secret-with-32-characters!"));
        let auth = Authenticator::new(user_repository.clone(), jwt);

        let service = SkillService::new(Arc::new(InMemorySkillRepository::new()));
        let router = Router::new().nest("/skills", handlers::router(service));

        Self {
            router: with_identity(router, auth.clone()),
            users: UserService::new(user_repository),
            auth,
        }
    }

    async fn token(&self, role: &str) -> String {
        let user = self
            .users
            .register(RegisterUser {
                email: format!("{role}@example.com"),
                name: role.to_string(),
                password: "password123".to_string(),
                role: role.to_string(),
                avatar: None,
                department: None,
                experience: None,
            })
            .await
            .unwrap();
        self.auth.issue_token(&user).unwrap().access_token
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn rust_skill() -> Value {
    json!({"name": "Rust", "category": "Programming", "description": "Systems language"})
}

#[tokio::test]
async fn test_create_skill_handler_returns_201() {
    let app = TestApp::new();
    let manager = app.token("manager").await;

    let (status, body) = app
        .send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Rust");
    assert_eq!(body["category"], "Programming");
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn test_create_skill_requires_manager_or_super_user() {
    let app = TestApp::new();
    let trainer = app.token("trainer").await;
    let admin = app.token("super-user").await;

    let (status, _) = app
        .send(request("POST", "/skills", None, Some(rust_skill())))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(request("POST", "/skills", Some(&trainer), Some(rust_skill())))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["type"], "forbidden");

    let (status, _) = app
        .send(request("POST", "/skills", Some(&admin), Some(rust_skill())))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_duplicate_name_returns_400() {
    let app = TestApp::new();
    let manager = app.token("manager").await;
    app.send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;

    let (status, body) = app
        .send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "duplicate");
}

#[tokio::test]
async fn test_reads_are_public() {
    let app = TestApp::new();
    let manager = app.token("manager").await;
    let (_, created) = app
        .send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;
    app.send(request(
        "POST",
        "/skills",
        Some(&manager),
        Some(json!({"name": "Docker", "category": "DevOps"})),
    ))
    .await;

    let (status, body) = app.send(request("GET", "/skills", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(request("GET", &format!("/skills/{}", created["id"].as_str().unwrap()), None, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rust");

    let (status, body) = app
        .send(request("GET", "/skills/category/DevOps", None, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Docker");

    let (_, body) = app
        .send(request("GET", "/skills/category/Cooking", None, None))
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_and_delete_skill() {
    let app = TestApp::new();
    let manager = app.token("manager").await;
    let (_, created) = app
        .send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;
    let uri = format!("/skills/{}", created["id"].as_str().unwrap());

    let (status, body) = app
        .send(request("PUT", &uri, Some(&manager), Some(json!({"category": "Systems"}))))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "Systems");
    assert_eq!(body["description"], "Systems language");

    let (status, _) = app
        .send(request("PUT", &uri, Some(&manager), Some(json!({"level": 3}))))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.send(request("DELETE", &uri, Some(&manager), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Skill not found");
}

#[tokio::test]
async fn test_get_skill_malformed_id() {
    let app = TestApp::new();

    let (status, _) = app.send(request("GET", "/skills/abc", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_with_out_of_range_pagination() {
    let app = TestApp::new();
    let manager = app.token("manager").await;
    app.send(request("POST", "/skills", Some(&manager), Some(rust_skill())))
        .await;

    let (status, body) = app
        .send(request("GET", "/skills?limit=18446744073709551615", None, None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(request("GET", "/skills?skip=18446744073709551615", None, None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "bad_request");
}
