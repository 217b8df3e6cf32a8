mod common;

use axum::http::StatusCode;
use common::{body_text, csrf_token, location, program_fields, spawn_app};
use wildseries::models::episode::EpisodeInput;

#[tokio::test]
async fn test_create_program_derives_slug_owner_and_notifies() {
    let app = spawn_app().await;
    let alice = app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app
        .post_form(
            "/program/new",
            Some(&cookie),
            &program_fields("Breaking Code", "A chemist learns Rust."),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/program/");

    let program = app
        .state
        .store
        .get_program_by_slug("breaking-code")
        .await
        .unwrap()
        .expect("program should be stored under its slug");
    assert_eq!(program.title, "Breaking Code");
    assert_eq!(program.owner_id, Some(alice.id));
    assert_eq!(program.year, Some(2008));

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, app.config.mailer.notification_recipient);
    assert!(sent[0].html.contains("Breaking Code"));

    // The success flash shows up on the next page.
    let body = body_text(app.get("/program/", Some(&cookie)).await).await;
    assert!(body.contains("has been created"));
    assert!(body.contains("/program/breaking-code"));
}

#[tokio::test]
async fn test_invalid_program_is_not_persisted() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app
        .post_form("/program/new", Some(&cookie), &program_fields("", ""))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("This value should not be blank."));

    assert_eq!(app.state.store.count_programs().await.unwrap(), 0);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_duplicate_slug_is_a_title_error() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let first = app
        .post_form("/program/new", Some(&cookie), &program_fields("Dark", "One."))
        .await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = app
        .post_form("/program/new", Some(&cookie), &program_fields("DARK!", "Two."))
        .await;
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(second).await.contains("already exists"));

    assert_eq!(app.state.store.count_programs().await.unwrap(), 1);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_anonymous_create_redirects_to_login() {
    let app = spawn_app().await;

    let response = app.get("/program/new", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app
        .post_form("/program/new", None, &program_fields("Dark", "One."))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(app.state.store.count_programs().await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_owner_cannot_edit() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    app.create_user("bob@example.com").await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;

    app.post_form(
        "/program/new",
        Some(&alice),
        &program_fields("Breaking Code", "First synopsis."),
    )
    .await;

    let response = app.get("/program/breaking-code/edit", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_form(
            "/program/breaking-code/edit",
            Some(&bob),
            &program_fields("Hijacked", "Changed by someone else."),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let program = app
        .state
        .store
        .get_program_by_slug("breaking-code")
        .await
        .unwrap()
        .expect("program should be unchanged");
    assert_eq!(program.title, "Breaking Code");
    assert_eq!(program.synopsis, "First synopsis.");
}

#[tokio::test]
async fn test_owner_edit_regenerates_slug() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    app.post_form(
        "/program/new",
        Some(&cookie),
        &program_fields("Breaking Code", "Synopsis."),
    )
    .await;

    let response = app.get("/program/breaking-code/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_form(
            "/program/breaking-code/edit",
            Some(&cookie),
            &program_fields("Breaking Code: Reloaded", "Synopsis."),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let store = &app.state.store;
    assert!(store.get_program_by_slug("breaking-code").await.unwrap().is_none());
    assert!(
        store
            .get_program_by_slug("breaking-code-reloaded")
            .await
            .unwrap()
            .is_some()
    );
    // Edits do not notify.
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_search_filters_case_insensitively() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    for title in ["The Walking Dead", "Walker", "Dark"] {
        app.post_form("/program/new", Some(&cookie), &program_fields(title, "Synopsis."))
            .await;
    }

    let body = body_text(app.get("/program/?search=WALK", None).await).await;
    assert!(body.contains("/program/the-walking-dead"));
    assert!(body.contains("/program/walker"));
    assert!(!body.contains("/program/dark"));

    let body = body_text(app.get("/program/?search=%20%20", None).await).await;
    assert!(body.contains("/program/the-walking-dead"));
    assert!(body.contains("/program/dark"));

    let body = body_text(app.get("/program?search=nothing", None).await).await;
    assert!(body.contains("No program found."));
}

#[tokio::test]
async fn test_delete_requires_valid_token_and_cascades() {
    let app = spawn_app().await;
    let alice = app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    app.post_form(
        "/program/new",
        Some(&cookie),
        &program_fields("Breaking Code", "Synopsis."),
    )
    .await;

    let store = &app.state.store;
    let program = store
        .get_program_by_slug("breaking-code")
        .await
        .unwrap()
        .unwrap();
    let season = store
        .insert_season(program.id, 1, Some(2008), "First season")
        .await
        .unwrap();
    let episode = store
        .insert_episode(
            &EpisodeInput {
                program_id: program.id,
                season_id: Some(season.id),
                number: 1,
                title: "Pilot".to_string(),
                synopsis: "It begins.".to_string(),
            },
            "pilot",
        )
        .await
        .unwrap();
    store
        .insert_comment(episode.id, alice.id, "Great start")
        .await
        .unwrap();
    store.add_favorite(alice.id, program.id).await.unwrap();

    // Forged token: nothing happens, but the user still lands on the list.
    let response = app
        .post_form(
            &format!("/program/{}/delete", program.id),
            Some(&cookie),
            &[("_token", "forged")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/program/");
    assert!(store.get_program(program.id).await.unwrap().is_some());

    // The show page embeds the real token for the owner.
    let page = body_text(app.get("/program/breaking-code", Some(&cookie)).await).await;
    let token = csrf_token(&page);

    let response = app
        .send_form(
            "DELETE",
            &format!("/program/{}", program.id),
            Some(&cookie),
            &[("_token", token.as_str())],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert!(store.get_program(program.id).await.unwrap().is_none());
    assert!(store.get_season(season.id).await.unwrap().is_none());
    assert!(store.get_episode(episode.id).await.unwrap().is_none());
    assert_eq!(store.count_comments(episode.id).await.unwrap(), 0);
    assert!(store.list_favorites(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_program_is_not_found() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app.get("/program/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post_form("/program/999/delete", Some(&cookie), &[("_token", "x")])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send_form("DELETE", "/program/not-a-number", Some(&cookie), &[("_token", "x")])
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_toggle() {
    let app = spawn_app().await;
    let alice = app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    app.post_form("/program/new", Some(&cookie), &program_fields("Dark", "Synopsis."))
        .await;

    let response = app
        .post_form("/program/dark/favorite", Some(&cookie), &[])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/program/dark");
    assert_eq!(app.state.store.list_favorites(alice.id).await.unwrap().len(), 1);

    let body = body_text(app.get("/program/dark", Some(&cookie)).await).await;
    assert!(body.contains("1 in watchlists"));
    assert!(body.contains("Remove from watchlist"));

    app.post_form("/program/dark/favorite", Some(&cookie), &[])
        .await;
    assert!(app.state.store.list_favorites(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mail_failure_is_a_server_error_after_persisting() {
    let app = common::spawn_app_with_mailer(wildseries::services::MemoryMailer::failing()).await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app
        .post_form("/program/new", Some(&cookie), &program_fields("Dark", "Synopsis."))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        app.state
            .store
            .get_program_by_slug("dark")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_search_folds_accented_letters() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    for title in ["Élite", "Les Revenants", "Dark"] {
        app.post_form("/program/new", Some(&cookie), &program_fields(title, "Synopsis."))
            .await;
    }

    // "élite", percent-encoded.
    let body = body_text(app.get("/program/?search=%C3%A9lite", None).await).await;
    assert!(body.contains("/program/elite"));
    assert!(!body.contains("/program/dark"));

    // "ÉLITE"
    let body = body_text(app.get("/program/?search=%C3%89LITE", None).await).await;
    assert!(body.contains("/program/elite"));

    let body = body_text(app.get("/program/?search=revenants", None).await).await;
    assert!(body.contains("/program/les-revenants"));
    assert!(!body.contains("/program/elite"));
}

#[tokio::test]
async fn test_title_reserved_by_routes_is_rejected() {
    let app = spawn_app().await;
    app.create_user("alice@example.com").await;
    let cookie = app.login("alice@example.com").await;

    let response = app
        .post_form("/program/new", Some(&cookie), &program_fields("New", "Synopsis."))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("is reserved"));
    assert_eq!(app.state.store.count_programs().await.unwrap(), 0);
    assert!(app.mailer.sent().is_empty());

    // Renaming an existing program to a reserved title is refused too.
    app.post_form("/program/new", Some(&cookie), &program_fields("Dark", "Synopsis."))
        .await;
    let response = app
        .post_form(
            "/program/dark/edit",
            Some(&cookie),
            &program_fields("new!", "Synopsis."),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.state.store.get_program_by_slug("dark").await.unwrap().is_some());
}
