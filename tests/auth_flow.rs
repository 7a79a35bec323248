mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;
use helpdesk_api::{
    db::Store,
    models::principal::{PrincipalKind, Role},
};

#[tokio::test]
async fn register_then_login_as_customer() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Ann",
                "lastName": "Lee",
                "email": "ann@test.tst",
                "password": "secret1",
                "role": "user",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["firstName"], "Ann");
    assert_eq!(body["role"], "user");
    assert!(body.get("passwordHash").is_none());
    let id = body["id"].as_i64().unwrap();

    let stored = app
        .store
        .find_principal_by_email(PrincipalKind::Customer, "ann@test.tst")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, id);
    assert_ne!(stored.password_hash, "secret1");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@test.tst", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome back Ann");

    let claims = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.subject, id);
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.name, "Ann Lee");
}

#[tokio::test]
async fn login_with_unknown_email_is_404() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@test.tst", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User was not found, please register");
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let app = TestApp::new();
    app.register("Ann", "ann@test.tst", "secret1", "user").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@test.tst", "password": "not-it" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].as_str().unwrap().contains("Invalid credentials"));
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn login_without_password_is_400() {
    let app = TestApp::new();
    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@test.tst" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_registration_lands_in_employee_store() {
    let app = TestApp::new();
    let id = app.register("Lucy", "lucy@test.tst", "adminpass", "admin").await;

    let token = app.login("lucy@test.tst", "adminpass", Some("admin")).await;
    let claims = app.tokens.verify(&token).unwrap();
    assert_eq!(claims.subject, id);
    assert_eq!(claims.role, Role::Admin);

    let (status, _) = app.send(Method::GET, "/api/tickets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn customer_cannot_claim_admin_role_at_login() {
    let app = TestApp::new();
    app.register("Ann", "ann@test.tst", "secret1", "user").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@test.tst", "password": "secret1", "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn registration_validates_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "A",
                "lastName": "Lee",
                "email": "ann@test.tst",
                "password": "secret1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("First name"));

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Ann",
                "lastName": "Lee",
                "email": "not-an-email",
                "password": "secret1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_registration_is_409() {
    let app = TestApp::new();
    app.register("Ann", "ann@test.tst", "secret1", "user").await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Ann",
                "lastName": "Other",
                "email": "ann@test.tst",
                "password": "secret2",
                "role": "user",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unparseable_bodies_are_400_with_a_message() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": null,
                "lastName": "Lee",
                "email": "ann@test.tst",
                "password": "secret1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("firstName"));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": 5, "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}
