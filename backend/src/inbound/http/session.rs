//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal with a typed signed-in user
//! rather than raw cookie keys.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{DomainError, UserProfile};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USER_NAME_KEY: &str = "user_name";

/// Message shown to anonymous visitors hitting an auth-guarded route.
pub const LOGIN_REQUIRED: &str = "Please login first";

/// The signed-in user as recorded in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user in the session cookie.
    pub fn persist_user(&self, user: &UserProfile) -> Result<(), DomainError> {
        self.0
            .insert(USER_ID_KEY, user.id)
            .and_then(|()| self.0.insert(USER_NAME_KEY, user.name.clone()))
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user, if any. A cookie with an unreadable id is
    /// treated as anonymous rather than failing the request.
    pub fn current_user(&self) -> Result<Option<SessionUser>, DomainError> {
        let id = match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                return Ok(None);
            }
        };
        let Some(id) = id else { return Ok(None) };
        let name = self
            .0
            .get::<String>(USER_NAME_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))?
            .unwrap_or_default();
        Ok(Some(SessionUser { id, name }))
    }

    /// Require a signed-in user or answer `401 Unauthorized`.
    pub fn require_user(&self) -> Result<SessionUser, DomainError> {
        self.current_user()?
            .ok_or_else(|| DomainError::unauthorized(LOGIN_REQUIRED))
    }

    /// Drop the session and its cookie entirely.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    fn fixture_profile() -> UserProfile {
        UserProfile {
            id: 7,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: chrono::Utc::now(),
        }
    }

    #[actix_web::test]
    async fn round_trips_the_signed_in_user() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&fixture_profile())?;
                        Ok::<_, DomainError>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let user = session.require_user()?;
                        Ok::<_, DomainError>(
                            HttpResponse::Ok().body(format!("{}:{}", user.id, user.name)),
                        )
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "7:Ada");
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_user()?;
                Ok::<_, DomainError>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn cleared_session_no_longer_authenticates() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&fixture_profile())?;
                        Ok::<_, DomainError>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/logout",
                    web::get().to(|session: SessionContext| async move {
                        session.clear();
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_user()?;
                        Ok::<_, DomainError>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let logout_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        // Purging rewrites the cookie with an empty value.
        let cleared = logout_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
