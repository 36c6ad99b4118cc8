use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{AdminAPI, Dashboard};
use crate::error::Error;
use crate::server::{CurrentUser, DynAPI};

#[derive(Serialize, Deserialize)]
pub struct CompleteResponse {
    updated: usize,
    message: String,
}

pub async fn dashboard(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Dashboard>, Error> {
    let dashboard = api.dashboard(user).await?;

    Ok(dashboard.into())
}

pub async fn complete(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CompleteResponse>, Error> {
    let updated = api.complete_assigned(user).await?;

    Ok(CompleteResponse {
        updated,
        message: "Updated statuses to completed.".into(),
    }
    .into())
}
