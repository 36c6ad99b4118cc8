use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::SessionAPI,
    auth::{AuthStatus, Session},
    error::Error,
};

#[async_trait]
impl SessionAPI for Engine {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<Session, Error> {
        let user = self.auth.verify(username, password).map_err(|err| {
            tracing::warn!("failed login for {}", username);
            err
        })?;

        let session = self.sessions.create(user)?;

        tracing::info!("{} logged in", session.user.username);

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn logout(&self, token: Uuid) -> Result<(), Error> {
        self.sessions.remove(&token)
    }

    #[tracing::instrument(skip(self))]
    async fn session_status(&self, token: Option<Uuid>) -> Result<AuthStatus, Error> {
        let status = self.sessions.status(token)?;

        if status == AuthStatus::Rejected {
            tracing::warn!("rejected stale or unknown session token");
        }

        Ok(status)
    }

    fn cookie_name(&self) -> &str {
        &self.auth.cookie.name
    }
}

#[cfg(test)]
mod tests {
    use crate::api::SessionAPI;
    use crate::auth::{AuthStatus, ADMIN_ROLE};
    use crate::engine::testing::{engine, ADMIN_PASSWORD, RIDER_PASSWORD};
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn login_creates_a_live_session() {
        let (_dir, engine) = engine();

        let session = assert_ok!(engine.login("admin", ADMIN_PASSWORD).await);
        assert_eq!(session.user.display_name, "Admin");
        assert!(session.user.has_role(ADMIN_ROLE.into()));

        let status = assert_ok!(engine.session_status(Some(session.token)).await);
        assert_eq!(status, AuthStatus::Authenticated(session.user));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (_dir, engine) = engine();

        let err = assert_err!(engine.login("asha", ADMIN_PASSWORD).await);
        assert!(err.is_invalid_credentials_error());
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let (_dir, engine) = engine();

        let session = assert_ok!(engine.login("asha", RIDER_PASSWORD).await);
        assert_ok!(engine.logout(session.token).await);

        let status = assert_ok!(engine.session_status(Some(session.token)).await);
        assert_eq!(status, AuthStatus::Rejected);
    }

    #[tokio::test]
    async fn no_token_is_anonymous() {
        let (_dir, engine) = engine();

        assert_eq!(
            assert_ok!(engine.session_status(None).await),
            AuthStatus::Anonymous
        );
        assert_eq!(engine.cookie_name(), "ridebook_test");
    }
}
