use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{Clock, SessionStore};

// Identity attached to a live session.
#[derive(Debug)]
pub struct CurrentUser {
    pub user_id: u64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub expires_at: u64,
}

// Resolves the user behind a session token.
pub struct CurrentUserUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> CurrentUserUseCase<C, S>
where
    C: Clock,
    S: SessionStore,
{
    pub async fn execute(&self, token: &str) -> Result<CurrentUser, AuthError> {
        // The web client sends an empty token when its cookie is missing.
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let session = self
            .store
            .get(token)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::InvalidToken)?;

        if session.expires_at <= self.clock.now_epoch_seconds() {
            // Best-effort cleanup of expired session.
            let _ = self.store.remove(token).await;
            return Err(AuthError::SessionExpired);
        }

        Ok(map_session(session))
    }
}

fn map_session(session: Session) -> CurrentUser {
    CurrentUser {
        user_id: session.user_id,
        email: session.email,
        full_name: session.full_name,
        role: session.role,
        expires_at: session.expires_at,
    }
}
