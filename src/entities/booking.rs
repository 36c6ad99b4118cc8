use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::entities::Driver;
use crate::error::{validation_error, Error};

/// Column order of the backing file. Must match the field order of [`BookingRecord`].
pub const HEADER: [&str; 11] = [
    "booking_id",
    "name",
    "phone",
    "origin",
    "destination",
    "passengers",
    "fare",
    "driver_name",
    "vehicle",
    "status",
    "booking_time",
];

pub const BOOKING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: i64,
    pub name: String,
    pub phone: String,
    pub origin: String,
    pub destination: String,
    pub passengers: u32,
    pub fare: u32,
    pub driver_name: String,
    pub vehicle: String,
    pub status: Status,
    #[serde(with = "booking_time")]
    pub booking_time: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Assigned,
    Completed,
}

/// Rider-supplied fields of a booking, as entered on the booking form. Absent text fields
/// read as empty so they fail [`BookingRequest::validate`] rather than deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub passengers: u32,
}

impl BookingRequest {
    /// Rejects the request if any free-text field is blank.
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [&self.name, &self.phone, &self.origin, &self.destination];

        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(validation_error());
        }

        Ok(())
    }
}

impl BookingRecord {
    /// Builds a freshly assigned record. The id is the creation time in whole seconds, so two
    /// bookings made within the same second share an id. The stored time keeps whole seconds
    /// only.
    pub fn new(
        request: BookingRequest,
        fare: u32,
        driver: &Driver,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            booking_id: created_at.timestamp(),
            name: request.name,
            phone: request.phone,
            origin: request.origin,
            destination: request.destination,
            passengers: request.passengers,
            fare,
            driver_name: driver.name.clone(),
            vehicle: driver.vehicle.clone(),
            status: Status::Assigned,
            booking_time: created_at.naive_local().trunc_subsecs(0),
        }
    }

    /// Marks an assigned booking completed. Completed bookings stay completed.
    pub fn complete(&mut self) -> bool {
        match self.status {
            Status::Assigned => {
                self.status = Status::Completed;
                true
            }
            Status::Completed => false,
        }
    }
}

mod booking_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BOOKING_TIME_FORMAT;

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(BOOKING_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, BOOKING_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
