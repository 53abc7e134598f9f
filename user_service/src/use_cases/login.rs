use uuid::Uuid;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AccountStore, Clock, CredentialHasher, SessionStore};
use crate::use_cases::normalize_email;

// Input accepted by the login use case.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

// Response returned by the login use case.
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
    pub user_id: u64,
}

// Login use case with injected dependencies.
pub struct LoginUseCase<C, A, S, H> {
    pub clock: C,
    pub accounts: A,
    pub sessions: S,
    pub hasher: H,
    pub ttl_seconds: u64,
}

impl<C, A, S, H> LoginUseCase<C, A, S, H>
where
    C: Clock,
    A: AccountStore,
    S: SessionStore,
    H: CredentialHasher,
{
    pub async fn execute(&self, command: LoginCommand) -> Result<LoginResponse, AuthError> {
        let email = normalize_email(&command.email);
        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(&command.password, &account.password_hash)
            .await
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = self.clock.now_epoch_seconds().saturating_add(self.ttl_seconds);
        let session = Session {
            user_id: account.id,
            email: account.email,
            full_name: account.full_name,
            role: account.role,
            session_id: Uuid::new_v4().to_string(),
            expires_at,
        };

        self.sessions
            .insert(token.clone(), session)
            .await
            .map_err(|_| AuthError::StorageFailure)?;

        Ok(LoginResponse {
            token,
            expires_at,
            user_id: account.id,
        })
    }
}
