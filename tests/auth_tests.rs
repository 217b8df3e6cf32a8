mod common;

use axum::http::StatusCode;
use common::{PASSWORD, body_text, location, session_cookie, spawn_app};

#[tokio::test]
async fn test_login_welcomes_user() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;

    let response = app
        .post_form(
            "/login",
            None,
            &[("email", "Alice@Example.com"), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/program/");
    let cookie = session_cookie(&response).unwrap();

    let body = body_text(app.get("/program/", Some(&cookie)).await).await;
    assert!(body.contains("Welcome, alice@example.com!"));
    assert!(body.contains("Log out"));

    // Flashes are shown once.
    let body = body_text(app.get("/program/", Some(&cookie)).await).await;
    assert!(!body.contains("Welcome"));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;

    let response = app
        .post_form(
            "/login",
            None,
            &[("email", "alice@example.com"), ("password", "nope")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(response).await;
    assert!(body.contains("Invalid credentials."));
    assert!(body.contains("alice@example.com"));

    let response = app
        .post_form(
            "/login",
            None,
            &[("email", "nobody@example.com"), ("password", PASSWORD)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_login_form_is_invalid() {
    let app = spawn_app().await;

    let response = app
        .post_form("/login", None, &[("email", ""), ("password", "")])
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app.get("/program/new", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_form("/logout", Some(&cookie), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/program/");

    let response = app.get("/program/new", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
