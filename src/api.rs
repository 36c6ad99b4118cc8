use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthStatus, Session, User};
use crate::entities::{BookingRecord, BookingRequest, RouteMap};
use crate::error::Error;

/// Result of a successful booking.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
    pub booking: BookingRecord,
    pub map: RouteMap,
}

/// The rider's most recent booking, as shown on the tracking page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tracking {
    pub booking_id: i64,
    pub driver_name: String,
    pub vehicle: String,
    pub origin: String,
    pub destination: String,
    pub map: RouteMap,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_bookings: usize,
    pub total_revenue: u64,
    pub bookings: Vec<BookingRecord>,
}

#[async_trait]
pub trait SessionAPI {
    async fn login(&self, username: &str, password: &str) -> Result<Session, Error>;
    async fn logout(&self, token: Uuid) -> Result<(), Error>;
    async fn session_status(&self, token: Option<Uuid>) -> Result<AuthStatus, Error>;
    fn cookie_name(&self) -> &str;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self, user: User, request: BookingRequest)
        -> Result<Confirmation, Error>;
    async fn find_bookings(&self, user: User) -> Result<Vec<BookingRecord>, Error>;
    async fn track_ride(&self, user: User) -> Result<Option<Tracking>, Error>;
}

#[async_trait]
pub trait AdminAPI {
    async fn dashboard(&self, user: User) -> Result<Dashboard, Error>;
    async fn complete_assigned(&self, user: User) -> Result<usize, Error>;
}

pub trait API: SessionAPI + BookingAPI + AdminAPI {}
