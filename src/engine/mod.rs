mod admin_api;
mod booking_api;
mod session_api;

use oso::Oso;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::Mutex;

use crate::{
    api::API,
    auth::{authorizor, AuthConfig, Sessions},
    error::{access_denied_error, Error},
    fare::FareRule,
    store::BookingStore,
};

type RandomSource = Box<dyn RngCore + Send>;

pub struct Engine {
    store: Mutex<Box<dyn BookingStore>>,
    rng: Mutex<RandomSource>,
    fare_rule: FareRule,
    auth: AuthConfig,
    sessions: Sessions,
    authorizor: Oso,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new<S: BookingStore + 'static>(store: S, auth: AuthConfig) -> Result<Self, Error> {
        store.ensure_initialized()?;

        let sessions = Sessions::new(auth.cookie.expiry_days)?;

        Ok(Self {
            store: Mutex::new(Box::new(store)),
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            fare_rule: FareRule::default(),
            auth,
            sessions,
            authorizor: authorizor::new()?,
        })
    }

    /// Replaces the source of randomness used for fares and driver picks.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(access_denied_error())
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) mod testing {
    use super::Engine;
    use crate::auth::{hash_password, AuthConfig, ADMIN_ROLE};
    use crate::store::CsvStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    pub const ADMIN_PASSWORD: &str = "admin123";
    pub const RIDER_PASSWORD: &str = "ride-on";

    pub fn auth_config() -> AuthConfig {
        let raw = serde_json::json!({
            "credentials": {
                "usernames": {
                    "admin": {
                        "name": "Admin",
                        "password": hash_password(ADMIN_PASSWORD).unwrap(),
                        "roles": [ADMIN_ROLE]
                    },
                    "asha": {
                        "name": "Asha",
                        "password": hash_password(RIDER_PASSWORD).unwrap()
                    },
                    "vikram": {
                        "name": "Vikram",
                        "password": hash_password(RIDER_PASSWORD).unwrap()
                    }
                }
            },
            "cookie": { "name": "ridebook_test", "expiry_days": 1 }
        });

        AuthConfig::from_json(&raw.to_string()).unwrap()
    }

    pub fn engine() -> (TempDir, Engine) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let engine = Engine::new(store, auth_config())
            .unwrap()
            .with_rng(StdRng::seed_from_u64(2024));

        (dir, engine)
    }
}
