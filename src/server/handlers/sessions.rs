use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json, TypedHeader};
use axum::headers::Cookie;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::SessionAPI;
use crate::error::{invalid_input_error, Error};
use crate::server::extract::{parse_token, session_cookie};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    message: String,
    name: String,
    username: String,
}

pub async fn login(
    Extension(api): Extension<DynAPI>,
    params: Result<Json<LoginParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = params.map_err(|err| {
        tracing::warn!("rejected login body: {}", err);
        invalid_input_error()
    })?;

    let session = api.login(&params.username, &params.password).await?;

    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    let cookie = session_cookie(api.cookie_name(), &session.token.to_string(), max_age);

    let body = LoginResponse {
        message: format!("Welcome, {}!", session.user.display_name),
        name: session.user.display_name,
        username: session.user.username,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

pub async fn logout(
    Extension(api): Extension<DynAPI>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Result<impl IntoResponse, Error> {
    let token = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| parse_token(cookies.get(api.cookie_name())));

    if let Some(token) = token {
        api.logout(token).await?;
    }

    let cookie = session_cookie(api.cookie_name(), "", 0);

    Ok(([(header::SET_COOKIE, cookie)], Json(())))
}
