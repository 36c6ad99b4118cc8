use async_trait::async_trait;
use axum::extract::{Extension, FromRequest, RequestParts, TypedHeader};
use axum::headers::Cookie;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::api::SessionAPI;
use crate::auth::{AuthStatus, User};
use crate::error::{unauthenticated_error, unexpected_error};
use crate::server::DynAPI;

/// The logged-in user behind a request. Every page extracts this, so requests without a live
/// session are answered with 401 before reaching a handler.
pub struct CurrentUser(pub User);

#[async_trait]
impl<B: Send> FromRequest<B> for CurrentUser {
    type Rejection = Response;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Extension(api) = Extension::<DynAPI>::from_request(req)
            .await
            .map_err(|_| unexpected_error().into_response())?;

        let token = session_token(req, api.cookie_name()).await;

        match api
            .session_status(token)
            .await
            .map_err(IntoResponse::into_response)?
        {
            AuthStatus::Authenticated(user) => Ok(CurrentUser(user)),
            // a stale cookie is cleared so the browser stops sending it
            AuthStatus::Rejected => {
                let cookie = session_cookie(api.cookie_name(), "", 0);
                Err(([(header::SET_COOKIE, cookie)], unauthenticated_error()).into_response())
            }
            AuthStatus::Anonymous => Err(unauthenticated_error().into_response()),
        }
    }
}

/// Reads the session token from the named cookie, if present and well formed.
async fn session_token<B: Send>(req: &mut RequestParts<B>, cookie_name: &str) -> Option<Uuid> {
    let cookies = TypedHeader::<Cookie>::from_request(req).await.ok()?;

    parse_token(cookies.get(cookie_name))
}

/// Garbage in the session cookie reads as a token that matches no session, not as no cookie.
pub(crate) fn parse_token(value: Option<&str>) -> Option<Uuid> {
    value.map(|raw| Uuid::parse_str(raw.trim()).unwrap_or_else(|_| Uuid::nil()))
}

pub(crate) fn session_cookie(name: &str, value: &str, max_age: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age
    )
}

#[test]
fn parse_token_test() {
    let token = Uuid::new_v4();

    assert_eq!(parse_token(Some(&token.to_string())), Some(token));
    assert_eq!(parse_token(Some("not-a-token")), Some(Uuid::nil()));
    assert_eq!(parse_token(None), None);
}

#[test]
fn session_cookie_test() {
    assert_eq!(
        session_cookie("ridebook_auth", "abc", 60),
        "ridebook_auth=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
    );
    assert_eq!(
        session_cookie("ridebook_auth", "", 0),
        "ridebook_auth=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    );
}
