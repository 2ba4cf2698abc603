//! Handler tests for the scores domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_scores::*;
use domain_skills::{CreateSkill, InMemorySkillRepository, SkillService};
use domain_users::{
    Authenticator, Directory, InMemoryUserRepository, RegisterUser, User, UserService,
    directory_router, with_identity,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

struct TestApp {
    router: Router,
    users: UserService<InMemoryUserRepository>,
    skills: SkillService<InMemorySkillRepository>,
    auth: Authenticator<InMemoryUserRepository>,
}

impl TestApp {
    fn new() -> Self {
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let jwt = JwtAuth::new(&JwtConfig::new("scores-test-secret-with-32-characters!"));
        let auth = Authenticator::new(user_repository.clone(), jwt);

        let users = UserService::new(user_repository);
        let skills = SkillService::new(Arc::new(InMemorySkillRepository::new()));
        let service = ScoreService::new(
            Arc::new(InMemoryScoreRepository::new()),
            users.clone(),
            skills.clone(),
        );

        let employees = directory_router(Arc::new(users.clone()), Directory::Employees)
            .merge(employee_scores_router(service.clone()));
        let router = Router::new()
            .nest("/scores", handlers::router(service))
            .nest("/employees", employees);

        Self {
            router: with_identity(router, auth.clone()),
            users,
            skills,
            auth,
        }
    }

    async fn member(&self, name: &str, role: &str) -> (User, String) {
        let user = self
            .users
            .register(RegisterUser {
                email: format!("{}@example.com", name.to_lowercase()),
                name: name.to_string(),
                password: "password123".to_string(),
                role: role.to_string(),
                avatar: None,
                department: None,
                experience: None,
            })
            .await
            .unwrap();
        let token = self.auth.issue_token(&user).unwrap().access_token;
        (user, token)
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

fn score_body(employee: &User, skill_id: &str, trainer: &User, score: f64) -> Value {
    json!({
        "employee_id": employee.id,
        "skill_id": skill_id,
        "trainer_id": trainer.id,
        "score": score,
        "feedback": "Good progress"
    })
}

#[tokio::test]
async fn test_trainer_records_score() {
    let app = TestApp::new();
    let (employee, _) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let skill_id = uuid::Uuid::now_v7().to_string();

    let (status, body) = app
        .send(request(
            "POST",
            "/scores",
            Some(&trainer_token),
            Some(score_body(&employee, &skill_id, &trainer, 4.5)),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 4.5);
    assert_eq!(body["employee_id"], employee.id.to_string());
    assert!(body["date"].is_string());
}

#[tokio::test]
async fn test_score_gates() {
    let app = TestApp::new();
    let (employee, employee_token) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let (_, manager_token) = app.member("Max", "manager").await;
    let skill_id = uuid::Uuid::now_v7().to_string();
    let body = score_body(&employee, &skill_id, &trainer, 3.0);

    let (status, _) = app
        .send(request("POST", "/scores", Some(&manager_token), Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(request("POST", "/scores", Some(&employee_token), Some(body.clone())))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(request("GET", "/scores", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(request("GET", "/scores", Some(&trainer_token), None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.send(request("POST", "/scores", Some(&trainer_token), Some(body)))
        .await;
    let (status, body) = app
        .send(request("GET", "/scores", Some(&manager_token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_employee_average() {
    let app = TestApp::new();
    let (employee, _) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let (_, admin_token) = app.member("Root", "super-user").await;
    let skill_id = uuid::Uuid::now_v7().to_string();
    let uri = format!("/scores/employee/{}/average", employee.id);

    let (status, body) = app.send(request("GET", &uri, Some(&admin_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No scores found for employee");

    for value in [2.0, 4.0] {
        app.send(request(
            "POST",
            "/scores",
            Some(&trainer_token),
            Some(score_body(&employee, &skill_id, &trainer, value)),
        ))
        .await;
    }

    let (status, body) = app.send(request("GET", &uri, Some(&admin_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_score"], 3.0);
    assert_eq!(body["employee_id"], employee.id.to_string());

    let (_, body) = app
        .send(request(
            "GET",
            &format!("/scores/employee/{}", employee.id),
            Some(&admin_token),
            None,
        ))
        .await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_score_details() {
    let app = TestApp::new();
    let (employee, _) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let (_, manager_token) = app.member("Max", "manager").await;
    let skill = app
        .skills
        .create(CreateSkill {
            name: "Rust".to_string(),
            category: "Programming".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let (_, created) = app
        .send(request(
            "POST",
            "/scores",
            Some(&trainer_token),
            Some(score_body(&employee, &skill.id.to_string(), &trainer, 5.0)),
        ))
        .await;
    let uri = format!("/scores/{}/details", created["id"].as_str().unwrap());

    let (status, body) = app.send(request("GET", &uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skill_name"], "Rust");
    assert_eq!(body["trainer_name"], "Sam");
    assert_eq!(body["employee_name"], "Ada");
    assert_eq!(body["score"], 5.0);

    app.skills.delete(skill.id).await.unwrap();
    let (status, body) = app.send(request("GET", &uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["skill_name"].is_null());
}

#[tokio::test]
async fn test_update_and_delete_score() {
    let app = TestApp::new();
    let (employee, _) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let (_, manager_token) = app.member("Max", "manager").await;
    let skill_id = uuid::Uuid::now_v7().to_string();

    let (_, created) = app
        .send(request(
            "POST",
            "/scores",
            Some(&trainer_token),
            Some(score_body(&employee, &skill_id, &trainer, 2.0)),
        ))
        .await;
    let uri = format!("/scores/{}", created["id"].as_str().unwrap());

    let (status, body) = app
        .send(request("PUT", &uri, Some(&trainer_token), Some(json!({"score": 3.0}))))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 3.0);
    assert_eq!(body["feedback"], "Good progress");

    let (status, _) = app
        .send(request("PUT", &uri, Some(&manager_token), Some(json!({"score": 1.0}))))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(request("DELETE", &uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(request("GET", &uri, Some(&manager_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Score not found");
}

#[tokio::test]
async fn test_employee_with_scores() {
    let app = TestApp::new();
    let (employee, _) = app.member("Ada", "employee").await;
    let (trainer, trainer_token) = app.member("Sam", "trainer").await;
    let (_, manager_token) = app.member("Max", "manager").await;
    let skill_id = uuid::Uuid::now_v7().to_string();

    app.send(request(
        "POST",
        "/scores",
        Some(&trainer_token),
        Some(score_body(&employee, &skill_id, &trainer, 4.0)),
    ))
    .await;

    let (status, body) = app
        .send(request(
            "GET",
            &format!("/employees/{}/with-scores", employee.id),
            Some(&manager_token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["scores"].as_array().unwrap().len(), 1);
    assert!(body.get("password_hash").is_none());

    let (status, body) = app
        .send(request(
            "GET",
            &format!("/employees/{}/with-scores", trainer.id),
            Some(&manager_token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Employee not found");
}
