//! Server construction and middleware wiring.

mod config;

pub use config::AppConfig;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api, pages};

/// Assemble the application: session middleware, HTML pages, and the
/// `/api` scope. Sessions wrap everything because both surfaces read them.
pub fn build_app(
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(state)
        .wrap(session)
        .service(web::scope("/api").configure(api::configure))
        .service(pages::home)
        .service(pages::about)
        .service(pages::register_page)
        .service(pages::register)
        .service(pages::login_page)
        .service(pages::login)
        .service(pages::logout)
        .service(pages::contact_page)
        .service(pages::contact)
        .service(pages::cart_page)
        .service(pages::cart_add)
        .service(pages::cart_remove);

    #[cfg(debug_assertions)]
    let app = app.route(
        "/api/openapi.json",
        web::get().to(|| async { web::Json(ApiDoc::openapi()) }),
    );

    app
}

/// Bind the HTTP server on the configured port.
///
/// The returned [`Server`] must be awaited to drive the listener.
pub fn create_server(config: &AppConfig, state: web::Data<HttpState>) -> std::io::Result<Server> {
    let key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure))
        .bind(("0.0.0.0", config.port))?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{header, StatusCode};
    use actix_web::{cookie::Cookie, test};
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;
    use crate::outbound::{FileStore, StorageAdapter};

    fn file_backed_state(dir: &std::path::Path) -> web::Data<HttpState> {
        let adapter = Arc::new(StorageAdapter::new(None, FileStore::new(dir)));
        web::Data::new(HttpState::new(adapter))
    }

    async fn body_string(res: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(res).await;
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn home_page_lists_seeded_courses_from_file_storage() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_string(res).await;
        assert!(body.contains("Margherita Pizza"));
        assert!(body.contains("Pasta Alfredo"));
        assert!(body.contains("Garlic Bread"));
        assert!(body.contains("File Storage"));
    }

    #[actix_web::test]
    async fn register_with_mismatched_passwords_creates_no_user() {
        let dir = tempdir().expect("temp dir");
        let state = file_backed_state(dir.path());
        let app = test::init_service(build_app(state.clone(), Key::generate(), false)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([
                    ("name", "Ada"),
                    ("email", "ada@example.com"),
                    ("password", "one"),
                    ("confirmPassword", "two"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_string(res).await;
        assert!(body.contains("Passwords do not match"));

        let stored = state
            .users
            .user_by_email("ada@example.com")
            .await
            .expect("lookup");
        assert!(stored.is_none());
    }

    #[actix_web::test]
    async fn register_login_and_cart_flow_works_end_to_end() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let register = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_form([
                    ("name", "Ada"),
                    ("email", "ada@example.com"),
                    ("password", "correct horse"),
                    ("confirmPassword", "correct horse"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(register.status(), StatusCode::FOUND);
        assert_eq!(
            register
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/?login=success")
        );
        let cookie = session_cookie(&register);

        // Add the first seeded course, then read the cart back.
        let add = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/cart/add/1")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(add.status(), StatusCode::FOUND);

        let cart = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/cart")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(cart.status(), StatusCode::OK);
        let body = body_string(cart).await;
        assert!(body.contains("Margherita Pizza"));
    }

    #[actix_web::test]
    async fn anonymous_cart_page_redirects_to_login() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/cart").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login?error=Please%20login%20first")
        );
    }

    #[actix_web::test]
    async fn anonymous_cart_api_answers_401_json() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/cart").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(
            value.get("error").and_then(Value::as_str),
            Some("Please login first")
        );
    }

    #[actix_web::test]
    async fn course_api_round_trip_and_errors() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        // Create; the three seeds occupy ids 1..=3.
        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/courses")
                .set_json(serde_json::json!({
                    "name": "Tiramisu",
                    "price": 89,
                    "image": "/images/tiramisu.jpg"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let course: Value = test::read_body_json(created).await;
        assert_eq!(course.get("id").and_then(Value::as_i64), Some(4));

        let fetched = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/courses/4").to_request(),
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);

        let invalid = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/courses")
                .set_json(serde_json::json!({ "name": "", "price": 10 }))
                .to_request(),
        )
        .await;
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/courses/99").to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let value: Value = test::read_body_json(missing).await;
        assert_eq!(
            value.get("error").and_then(Value::as_str),
            Some("Course not found")
        );

        let deleted = test::call_service(
            &app,
            test::TestRequest::delete().uri("/api/courses/4").to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);
        let value: Value = test::read_body_json(deleted).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Course deleted successfully")
        );
    }

    #[actix_web::test]
    async fn listing_users_is_unimplemented() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/users").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[actix_web::test]
    async fn storage_status_reports_file_backend() {
        let dir = tempdir().expect("temp dir");
        let app = test::init_service(build_app(
            file_backed_state(dir.path()),
            Key::generate(),
            false,
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/storage").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(
            value.get("selected").and_then(Value::as_str),
            Some("File Storage")
        );
        assert_eq!(value.get("relational").and_then(Value::as_bool), Some(false));

        let reprobe = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/storage/reprobe")
                .to_request(),
        )
        .await;
        assert_eq!(reprobe.status(), StatusCode::OK);
        let value: Value = test::read_body_json(reprobe).await;
        assert_eq!(value.get("relational").and_then(Value::as_bool), Some(false));
    }
}
