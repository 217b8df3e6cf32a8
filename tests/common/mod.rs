#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use wildseries::config::Config;
use wildseries::models::user::User;
use wildseries::services::MemoryMailer;
use wildseries::web::{self, AppState};

pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub mailer: MemoryMailer,
    pub config: Config,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.general.database_path = format!("sqlite://{}?mode=rwc", db_path.display());
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;
    // Cheap hashes keep the suite fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.security.argon2_parallelism = 1;
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_mailer(MemoryMailer::new()).await
}

pub async fn spawn_app_with_mailer(mailer: MemoryMailer) -> TestApp {
    let db_path = std::env::temp_dir().join(format!("wildseries-test-{}.db", Uuid::new_v4()));
    let config = test_config(&db_path);

    let state = web::create_app_state_with_mailer(config.clone(), Arc::new(mailer.clone()), None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: web::router(state.clone()),
        state,
        mailer,
        config,
        db_path,
    }
}

impl TestApp {
    pub async fn create_user(&self, email: &str) -> User {
        self.state
            .store
            .create_user(email, PASSWORD, &self.config.security)
            .await
            .expect("Failed to create user")
    }

    /// Logs `email` in and returns the session cookie to send back.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post_form("/login", None, &[("email", email), ("password", PASSWORD)])
            .await;
        assert_eq!(response.status(), 303, "login should redirect");
        session_cookie(&response).expect("login should set a session cookie")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(
        &self,
        uri: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        self.send_form("POST", uri, cookie, fields).await
    }

    pub async fn send_form(
        &self,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(ToString::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Value of the first `_token` hidden field in a page.
pub fn csrf_token(html: &str) -> String {
    let marker = "name=\"_token\" value=\"";
    let start = html.find(marker).expect("page has no _token field") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

pub fn program_fields<'a>(title: &'a str, synopsis: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("synopsis", synopsis),
        ("poster", ""),
        ("country", "USA"),
        ("year", "2008"),
    ]
}
