// Role assigned to every self-registered account.
pub const DEFAULT_ROLE: &str = "USER";

// Authenticated session record stored in memory, keyed by token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub session_id: String,
    pub expires_at: u64,
}

// Registered account; the password is only ever held as a hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAccount {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub password_hash: String,
}

// Validated registration data awaiting an id from the account store.
#[derive(Clone, Debug)]
pub struct AccountDraft {
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub password_hash: String,
}
