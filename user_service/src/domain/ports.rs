use async_trait::async_trait;

use crate::domain::entities::{AccountDraft, Session, UserAccount};

// Port for session storage used by identity use cases.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: String, session: Session) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<Session>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
}

// Port for account storage. Emails are compared exactly; callers normalize them.
#[async_trait]
pub trait AccountStore: Send + Sync {
    // Returns `None` when the email is already registered.
    async fn insert(&self, draft: AccountDraft) -> Result<Option<UserAccount>, String>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, String>;
}

// Port for one-way password hashing.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, String>;
    async fn verify(&self, password: &str, password_hash: &str) -> bool;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
