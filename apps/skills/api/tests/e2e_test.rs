//! End-to-end scenarios over the composed application with in-memory stores.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::JwtConfig;
use core_config::{Environment, app_info, server::ServerConfig};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use skills_api::{AppState, Config, Stores, build_app, seed};
use tower::ServiceExt; // For oneshot()

fn config() -> Config {
    Config {
        app: app_info!(),
        environment: Environment::Development,
        server: ServerConfig::default(),
        jwt: JwtConfig::new("e2e-test-secret-with-at-least-32-chars"),
        database: None,
        frontend_url: "http://localhost:8080".to_string(),
        seed_demo_data: true,
    }
}

async fn seeded_app() -> Router {
    let config = config();
    let state = AppState::new(Stores::in_memory(), &config).unwrap();
    seed::seed_demo_data(&state).await.unwrap();
    build_app(&state, &config).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
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

async fn login(app: &Router, email: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({"email": email, "password": seed::DEMO_PASSWORD})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {email}: {body}");
    (body["access_token"].as_str().unwrap().to_string(), body["user"].clone())
}

#[tokio::test]
async fn test_health_and_banner() {
    let app = seeded_app().await;

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, request("GET", "/", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee Skills Tracking API");

    let (status, body) = send(&app, request("GET", "/api/v1/nothing-here", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_seeded_catalog_is_public() {
    let app = seeded_app().await;

    let (status, body) = send(&app, request("GET", "/api/v1/skills", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(
        &app,
        request("GET", "/api/v1/skills/category/Programming", None, None),
    )
    .await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"JavaScript"));
    assert!(names.contains(&"Python"));
}

#[tokio::test]
async fn test_assessment_flow() {
    let app = seeded_app().await;
    let (trainer_token, trainer) = login(&app, "sarah.trainer@company.com").await;
    let (manager_token, _) = login(&app, "mike.manager@company.com").await;
    let (employee_token, employee) = login(&app, "john.employee@company.com").await;

    let (_, skills) = send(&app, request("GET", "/api/v1/skills", None, None)).await;
    let skill = skills
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Docker")
        .unwrap()
        .clone();

    for value in [3.0, 5.0] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/v1/scores",
                Some(&trainer_token),
                Some(json!({
                    "employee_id": employee["id"],
                    "skill_id": skill["id"],
                    "trainer_id": trainer["id"],
                    "score": value,
                    "feedback": "Keep going"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let average_uri = format!(
        "/api/v1/scores/employee/{}/average",
        employee["id"].as_str().unwrap()
    );
    let (status, body) = send(&app, request("GET", &average_uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_score"], 4.0);

    let (status, _) = send(&app, request("GET", &average_uri, Some(&employee_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let with_scores = format!(
        "/api/v1/employees/{}/with-scores",
        employee["id"].as_str().unwrap()
    );
    let (status, body) = send(&app, request("GET", &with_scores, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John Smith");
    assert_eq!(body["scores"].as_array().unwrap().len(), 2);

    let (_, scores) = send(
        &app,
        request("GET", "/api/v1/scores", Some(&manager_token), None),
    )
    .await;
    let details_uri = format!("/api/v1/scores/{}/details", scores[0]["id"].as_str().unwrap());
    let (status, body) = send(&app, request("GET", &details_uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skill_name"], "Docker");
    assert_eq!(body["trainer_name"], "Sarah Johnson");
    assert_eq!(body["employee_name"], "John Smith");
}

#[tokio::test]
async fn test_directories_by_role() {
    let app = seeded_app().await;
    let (manager_token, _) = login(&app, "mike.manager@company.com").await;
    let (admin_token, _) = login(&app, "admin@company.com").await;
    let (employee_token, employee) = login(&app, "john.employee@company.com").await;

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/employees", Some(&manager_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], "john.employee@company.com");

    let (status, _) = send(
        &app,
        request("GET", "/api/v1/managers", Some(&manager_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/managers", Some(&admin_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/employees/me/profile", Some(&employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], employee["id"]);

    let (status, _) = send(&app, request("GET", "/api/v1/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "new.hire@company.com",
                "name": "New Hire",
                "password": "password123",
                "role": "employee"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password_hash").is_none());

    let (token, user) = login(&app, "new.hire@company.com").await;
    assert_eq!(user["role"], "employee");

    let (status, body) = send(&app, request("GET", "/api/v1/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new.hire@company.com");
}

#[tokio::test]
async fn test_seeding_twice_keeps_one_copy() {
    let config = config();
    let state = AppState::new(Stores::in_memory(), &config).unwrap();
    seed::seed_demo_data(&state).await.unwrap();
    seed::seed_demo_data(&state).await.unwrap();

    let app = build_app(&state, &config).unwrap();
    let (_, body) = send(&app, request("GET", "/api/v1/skills", None, None)).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_seeded_learning_path() {
    let config = config();
    let state = AppState::new(Stores::in_memory(), &config).unwrap();
    seed::seed_demo_data(&state).await.unwrap();

    let employee = state
        .users
        .directory(domain_users::Directory::Employees)
        .list(axum_helpers::Pagination::default())
        .await
        .unwrap()
        .remove(0);

    let paths = state.learning.list_paths_for_employee(employee.id).await.unwrap();
    assert_eq!(paths.len(), 1);
    let view = state.learning.path_with_steps(paths[0].id).await.unwrap();
    assert_eq!(view.steps.len(), 2);
    assert_eq!(view.progress, 0.0);

    let inbox = state
        .inbox
        .list_for_user(employee.id, axum_helpers::Pagination::default())
        .await.unwrap();
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn test_employee_reads_own_notifications() {
    let app = seeded_app().await;
    let (trainer_token, trainer) = login(&app, "sarah.trainer@company.com").await;
    let (employee_token, employee) = login(&app, "john.employee@company.com").await;
    let (manager_token, _) = login(&app, "mike.manager@company.com").await;

    let (_, skills) = send(&app, request("GET", "/api/v1/skills", None, None)).await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/scores",
            Some(&trainer_token),
            Some(json!({
                "employee_id": employee["id"],
                "skill_id": skills[0]["id"],
                "trainer_id": trainer["id"],
                "score": 4.0
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/notifications/unread-count", Some(&employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unread"], 2);

    let (status, list) = send(
        &app,
        request("GET", "/api/v1/notifications", Some(&employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|n| n["user_id"] == employee["id"]));
    let assessment = list.iter().find(|n| n["type"] == "assessment").unwrap();

    let read_uri = format!("/api/v1/notifications/{}/read", assessment["id"].as_str().unwrap());
    let (status, _) = send(&app, request("PUT", &read_uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, request("PUT", &read_uri, Some(&employee_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);

    let (_, body) = send(
        &app,
        request("GET", "/api/v1/notifications/unread-count", Some(&employee_token), None),
    )
    .await;
    assert_eq!(body["unread"], 1);

    let (_, body) = send(
        &app,
        request("GET", "/api/v1/notifications", Some(&manager_token), None),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let delete_uri = format!("/api/v1/notifications/{}", assessment["id"].as_str().unwrap());
    let (status, _) = send(&app, request("DELETE", &delete_uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request("DELETE", &delete_uri, Some(&employee_token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("GET", "/api/v1/notifications", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seeded_learning_path_over_http() {
    let app = seeded_app().await;
    let (employee_token, _) = login(&app, "john.employee@company.com").await;
    let (trainer_token, _) = login(&app, "sarah.trainer@company.com").await;

    let (status, paths) = send(
        &app,
        request("GET", "/api/v1/learning-paths/me", Some(&employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paths[0]["title"], "Frontend foundations");

    let path_uri = format!("/api/v1/learning-paths/{}", paths[0]["id"].as_str().unwrap());
    let (status, view) = send(&app, request("GET", &path_uri, Some(&employee_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["steps"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, request("GET", &path_uri, Some(&trainer_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
