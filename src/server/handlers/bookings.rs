use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{BookingAPI, Confirmation, Tracking};
use crate::entities::{BookingRecord, BookingRequest};
use crate::error::{invalid_input_error, Error};
use crate::fare::{MAX_PASSENGERS, MIN_PASSENGERS};
use crate::server::{CurrentUser, DynAPI};

#[derive(Serialize, Deserialize)]
pub struct PassengerField {
    min: u32,
    max: u32,
    default: u32,
}

/// Initial values for the booking form.
#[derive(Serialize, Deserialize)]
pub struct BookingForm {
    name: String,
    passengers: PassengerField,
}

#[derive(Serialize, Deserialize)]
pub struct TrackPage {
    tracking: Option<Tracking>,
    message: Option<String>,
}

pub async fn form(CurrentUser(user): CurrentUser) -> Json<BookingForm> {
    Json(BookingForm {
        name: user.display_name,
        passengers: PassengerField {
            min: MIN_PASSENGERS,
            max: MAX_PASSENGERS,
            default: MIN_PASSENGERS,
        },
    })
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    request: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Confirmation>, Error> {
    let Json(request) = request.map_err(|err| {
        tracing::warn!("rejected booking body from {}: {}", user.username, err);
        invalid_input_error()
    })?;

    let confirmation = api.create_booking(user, request).await?;

    Ok(confirmation.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<BookingRecord>>, Error> {
    let bookings = api.find_bookings(user).await?;

    Ok(bookings.into())
}

pub async fn track(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<TrackPage>, Error> {
    let tracking = api.track_ride(user).await?;

    let message = match tracking {
        Some(_) => None,
        None => Some("No bookings found.".into()),
    };

    Ok(TrackPage { tracking, message }.into())
}
