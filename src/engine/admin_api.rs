use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{AdminAPI, Dashboard},
    auth::{Platform, User},
    error::Error,
};

#[async_trait]
impl AdminAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn dashboard(&self, user: User) -> Result<Dashboard, Error> {
        self.authorize(user.clone(), "administer", Platform)
            .map_err(|err| {
                tracing::warn!("{} was refused the admin dashboard", user.username);
                err
            })?;

        let bookings = self.store.lock().await.load_all()?;
        let total_revenue = bookings.iter().map(|booking| booking.fare as u64).sum::<u64>();

        Ok(Dashboard {
            total_bookings: bookings.len(),
            total_revenue,
            bookings,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn complete_assigned(&self, user: User) -> Result<usize, Error> {
        self.authorize(user.clone(), "administer", Platform)?;

        let updated = self.store.lock().await.complete_all_assigned()?;

        tracing::info!("{} marked {} bookings completed", user.username, updated);

        Ok(updated)
    }
}
