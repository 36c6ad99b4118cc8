use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthStatus, User};
use crate::error::{config_error, unexpected_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

/// In-memory table of logged-in users keyed by cookie token. Sessions do not survive a
/// restart.
#[derive(Debug)]
pub struct Sessions {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, Session>>,
}

impl Sessions {
    pub fn new(expiry_days: i64) -> Result<Self, Error> {
        let ttl = Duration::try_days(expiry_days)
            .ok_or_else(|| config_error(format!("expiry of {} days is out of range", expiry_days)))?;

        Ok(Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        })
    }

    pub fn create(&self, user: User) -> Result<Session, Error> {
        self.create_at(user, Utc::now())
    }

    pub fn status(&self, token: Option<Uuid>) -> Result<AuthStatus, Error> {
        self.status_at(token, Utc::now())
    }

    pub fn remove(&self, token: &Uuid) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|_| unexpected_error())?
            .remove(token);

        Ok(())
    }

    fn create_at(&self, user: User, now: DateTime<Utc>) -> Result<Session, Error> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::warn!("session expiry overflows for {}", user.username);
            unexpected_error()
        })?;

        let session = Session {
            token: Uuid::new_v4(),
            user,
            expires_at,
        };

        self.entries
            .write()
            .map_err(|_| unexpected_error())?
            .insert(session.token, session.clone());

        Ok(session)
    }

    fn status_at(&self, token: Option<Uuid>, now: DateTime<Utc>) -> Result<AuthStatus, Error> {
        let token = match token {
            Some(token) => token,
            None => return Ok(AuthStatus::Anonymous),
        };

        let mut entries = self.entries.write().map_err(|_| unexpected_error())?;

        let expired = match entries.get(&token) {
            Some(session) if session.expires_at > now => {
                return Ok(AuthStatus::Authenticated(session.user.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(&token);
        }

        Ok(AuthStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider() -> User {
        User::new("asha", "Asha", vec![])
    }

    #[test]
    fn created_session_resolves_to_its_user() {
        let sessions = Sessions::new(1).unwrap();
        let session = sessions.create(rider()).unwrap();

        assert_eq!(
            sessions.status(Some(session.token)).unwrap(),
            AuthStatus::Authenticated(rider())
        );
    }

    #[test]
    fn missing_token_is_anonymous() {
        let sessions = Sessions::new(1).unwrap();

        assert_eq!(sessions.status(None).unwrap(), AuthStatus::Anonymous);
    }

    #[test]
    fn unknown_token_is_rejected() {
        let sessions = Sessions::new(1).unwrap();

        assert_eq!(
            sessions.status(Some(Uuid::new_v4())).unwrap(),
            AuthStatus::Rejected
        );
    }

    #[test]
    fn expired_session_is_rejected_and_dropped() {
        let sessions = Sessions::new(1).unwrap();
        let now = Utc::now();
        let session = sessions.create_at(rider(), now).unwrap();

        let later = now + Duration::days(2);
        assert_eq!(
            sessions.status_at(Some(session.token), later).unwrap(),
            AuthStatus::Rejected
        );
        assert_eq!(
            sessions.status_at(Some(session.token), now).unwrap(),
            AuthStatus::Rejected
        );
    }

    #[test]
    fn out_of_range_expiry_is_an_error_not_a_panic() {
        assert!(Sessions::new(i64::MAX).is_err());

        let sessions = Sessions::new(100_000_000).unwrap();
        let err = sessions.create(rider()).unwrap_err();
        assert_eq!(err, unexpected_error());
        assert_eq!(sessions.status(None).unwrap(), AuthStatus::Anonymous);
    }

    #[test]
    fn removed_session_is_rejected() {
        let sessions = Sessions::new(1).unwrap();
        let session = sessions.create(rider()).unwrap();

        sessions.remove(&session.token).unwrap();
        sessions.remove(&session.token).unwrap();

        assert_eq!(
            sessions.status(Some(session.token)).unwrap(),
            AuthStatus::Rejected
        );
    }
}
