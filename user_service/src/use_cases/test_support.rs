use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{AccountDraft, Session, UserAccount};
use crate::domain::ports::{AccountStore, Clock, CredentialHasher, SessionStore};

pub(crate) type SessionTable = Arc<Mutex<HashMap<String, Session>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

// Reversible stand-in for argon2 so tests stay fast.
pub(crate) struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, password_hash: &str) -> bool {
        password_hash == format!("plain:{password}")
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingStore {
    sessions: SessionTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_session(&self, token: impl Into<String>, session: Session) {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token.into(), session);
    }

    pub(crate) fn get_test_session(&self, token: &str) -> Option<Session> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(token).cloned()
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn insert(&self, token: String, session: Session) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.remove(token).is_some())
    }
}

#[derive(Clone)]
pub(crate) struct RecordingAccounts {
    accounts: Arc<Mutex<Vec<UserAccount>>>,
    failures: FailureFlags,
}

impl RecordingAccounts {
    pub(crate) fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn with_account(self, email: &str, password: &str) -> Self {
        {
            let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
            let id = guard.len() as u64 + 1;
            guard.push(UserAccount {
                id,
                email: email.to_string(),
                full_name: "Test Customer".to_string(),
                role: "USER".to_string(),
                password_hash: format!("plain:{password}"),
            });
        }
        self
    }

    pub(crate) fn count(&self) -> usize {
        self.accounts.lock().expect("accounts mutex poisoned").len()
    }
}

#[async_trait]
impl AccountStore for RecordingAccounts {
    async fn insert(&self, draft: AccountDraft) -> Result<Option<UserAccount>, String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
        if guard.iter().any(|account| account.email == draft.email) {
            return Ok(None);
        }
        let account = UserAccount {
            id: guard.len() as u64 + 1,
            email: draft.email,
            full_name: draft.full_name,
            role: draft.role,
            password_hash: draft.password_hash,
        };
        guard.push(account.clone());
        Ok(Some(account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.accounts.lock().expect("accounts mutex poisoned");
        Ok(guard.iter().find(|account| account.email == email).cloned())
    }
}
