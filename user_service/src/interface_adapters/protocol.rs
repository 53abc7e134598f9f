use serde::{Deserialize, Serialize};

// Request payload for account registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

// Request payload for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Data returned by a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub expires_at: u64,
}

// Query string of the identity endpoint; a missing token reads as empty.
#[derive(Debug, Deserialize)]
pub struct MeQuery {
    #[serde(default)]
    pub token: String,
}

// Public view of a user, as consumed by the web client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentityData {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

// Request payload for logout.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

// Data returned by logout.
#[derive(Debug, Serialize)]
pub struct LogoutData {
    pub revoked: bool,
}
