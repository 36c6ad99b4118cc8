use super::Engine;

use async_trait::async_trait;
use chrono::Local;

use crate::{
    api::{BookingAPI, Confirmation, Tracking},
    auth::{Platform, User},
    entities::{BookingRecord, BookingRequest, RouteMap},
    error::Error,
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(
        &self,
        user: User,
        request: BookingRequest,
    ) -> Result<Confirmation, Error> {
        self.authorize(user.clone(), "book", Platform)?;

        request.validate()?;

        let store = self.store.lock().await;

        let (fare, driver) = {
            let mut rng = self.rng.lock().await;
            let fare = self.fare_rule.compute_fare(&mut **rng, request.passengers)?;
            let driver = self.fare_rule.assign_driver(&mut **rng)?;
            (fare, driver)
        };

        let booking = BookingRecord::new(request, fare, &driver, Local::now());
        store.append(&booking)?;

        tracing::info!(
            "booked ride {} for {} with driver {} at fare {}",
            booking.booking_id,
            booking.name,
            driver.name,
            fare
        );

        Ok(Confirmation {
            message: format!(
                "Ride booked! Driver {} assigned. Fare: ₹{}",
                driver.name, fare
            ),
            booking,
            map: RouteMap::demo(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn find_bookings(&self, user: User) -> Result<Vec<BookingRecord>, Error> {
        self.authorize(user.clone(), "track", Platform)?;

        let bookings = self.store.lock().await.load_all()?;

        Ok(bookings
            .into_iter()
            .filter(|booking| booking.name == user.display_name)
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn track_ride(&self, user: User) -> Result<Option<Tracking>, Error> {
        let last = self.find_bookings(user).await?.pop();

        Ok(last.map(|booking| Tracking {
            booking_id: booking.booking_id,
            driver_name: booking.driver_name,
            vehicle: booking.vehicle,
            origin: booking.origin,
            destination: booking.destination,
            map: RouteMap::demo(),
        }))
    }
}
