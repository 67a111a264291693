//! Shared test infrastructure.
//!
//! - `setup_store()` - in-memory store with two institutes and their rosters
//! - `test_app!(env)` - actix service over the in-memory store and blob store
//! - `login!(app, id, password)` - log in and return `(session cookie, csrf token)`
#![allow(dead_code, unused_macros)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, TimeZone, Utc};

use arena::auth::password;
use arena::config::AppConfig;
use arena::models::{Institute, Student};
use arena::storage::MemoryBlobStore;
use arena::store::{MemoryStore, Store};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const U1: &str = "U1";
pub const U1_PASS: &str = "u1-password";
pub const U2: &str = "U2";
pub const U2_PASS: &str = "u2-password";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
}

// ============================================================================
// STORE SETUP
// ============================================================================

pub struct TestEnv {
    pub memory: MemoryStore,
    pub store: Store,
    pub blobs: MemoryBlobStore,
    pub config: AppConfig,
}

fn student(id: &str, first: &str, last: &str, institute_id: &str) -> Student {
    Student {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        institute_id: institute_id.to_string(),
    }
}

/// In-memory store with institutes U1 and U2, three U1 students and one U2 student.
pub async fn setup_store() -> TestEnv {
    let memory = MemoryStore::new();
    let store = Store::Memory(memory.clone());

    for (id, name, pass) in [(U1, "Riverside Academy", U1_PASS), (U2, "Hilltop Club", U2_PASS)] {
        let institute = Institute {
            id: id.to_string(),
            name: name.to_string(),
            password_hash: password::hash_password(pass).expect("hash"),
        };
        store.upsert_institute(&institute).await.expect("seed institute");
    }

    memory.insert_student(student("s1", "Ana", "Diaz", U1)).await;
    memory.insert_student(student("s2", "Ben", "Ode", U1)).await;
    memory.insert_student(student("s3", "Cara", "Lim", U2)).await;
    memory.insert_student(student("s4", "Abe", "Zane", U1)).await;

    TestEnv {
        memory,
        store,
        blobs: MemoryBlobStore::new("/uploads"),
        config: AppConfig::default(),
    }
}

// ============================================================================
// HTTP HELPERS
// ============================================================================

/// The session cookie set by a response, if the session changed.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn csrf_token(body: &[u8]) -> String {
    let html = std::str::from_utf8(body).expect("utf8 body");
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .expect("csrf token in page")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

macro_rules! test_app {
    ($env:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new($env.store.clone()))
                .app_data(actix_web::web::Data::new(arena::storage::BlobStore::Memory($env.blobs.clone())))
                .app_data(actix_web::web::Data::new($env.config.clone()))
                .app_data(actix_web::web::Data::new(arena::auth::rate_limit::LoginThrottle::default()))
                .configure(arena::handlers::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $id:expr, $password:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get().uri("/login").to_request(),
        )
        .await;
        let cookie = common::session_cookie(&resp).expect("session cookie on login page");
        let body = actix_web::test::read_body(resp).await;
        let token = common::csrf_token(&body);

        let resp = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::post()
                .uri("/login")
                .cookie(cookie.clone())
                .set_form([("institute_id", $id), ("password", $password), ("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER, "login should redirect");
        assert_eq!(common::location(&resp), "/events/new/basic");
        let cookie = common::session_cookie(&resp).unwrap_or(cookie);
        (cookie, token)
    }};
}
