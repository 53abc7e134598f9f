use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::entities::{AccountDraft, Session, UserAccount};
use crate::domain::ports::{AccountStore, Clock, SessionStore};

// Application state holding session and account storage.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    pub accounts: Arc<Mutex<AccountTable>>,
    // Lifetime of issued session tokens (in seconds).
    pub session_ttl_seconds: u64,
}

impl AppState {
    pub fn new(session_ttl_seconds: u64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            accounts: Arc::new(Mutex::new(AccountTable::new())),
            session_ttl_seconds,
        }
    }
}

// Accounts keyed by normalized email, with a monotonically increasing id.
pub struct AccountTable {
    next_id: u64,
    by_email: HashMap<String, UserAccount>,
}

impl AccountTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            by_email: HashMap::new(),
        }
    }
}

impl Default for AccountTable {
    fn default() -> Self {
        Self::new()
    }
}

// In-memory session store adapter for the user service.
#[derive(Clone)]
pub struct InMemorySessionStore {
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: String, session: Session) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        // Expired sessions are dropped on every insert.
        let now = SystemClock.now_epoch_seconds();
        sessions.retain(|_, existing| existing.expires_at > now);
        sessions.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(token).is_some())
    }
}

// In-memory account store adapter.
#[derive(Clone)]
pub struct InMemoryAccountStore {
    pub accounts: Arc<Mutex<AccountTable>>,
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, draft: AccountDraft) -> Result<Option<UserAccount>, String> {
        let mut table = self.accounts.lock().await;
        if table.by_email.contains_key(&draft.email) {
            return Ok(None);
        }

        let account = UserAccount {
            id: table.next_id,
            email: draft.email,
            full_name: draft.full_name,
            role: draft.role,
            password_hash: draft.password_hash,
        };
        table.next_id += 1;
        table
            .by_email
            .insert(account.email.clone(), account.clone());
        Ok(Some(account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, String> {
        let table = self.accounts.lock().await;
        Ok(table.by_email.get(email).cloned())
    }
}

// System clock adapter used by identity use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
