use common::BodyPolicy;
use common::config::{env_millis, env_parse, env_string};
use std::time::Duration;

// Runtime/server settings read from the environment.

pub fn http_port() -> u16 {
    env_parse("WEB_CLIENT_PORT", 3000)
}

pub fn api_base_url() -> String {
    env_string("API_BASE_URL", "http://127.0.0.1:3001")
}

pub fn auth_verify_timeout() -> Duration {
    env_millis("AUTH_VERIFY_TIMEOUT_MS", 1500)
}

pub fn hair_swap_url() -> String {
    env_string("HAIR_SWAP_URL", "http://127.0.0.1:8000/swap")
}

pub fn hair_swap_timeout() -> Duration {
    env_millis("HAIR_SWAP_TIMEOUT_MS", 60_000)
}

// Everything `run` needs besides the listener.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub auth_verify_timeout: Duration,
    pub hair_swap_url: String,
    pub hair_swap_timeout: Duration,
    pub body_policy: BodyPolicy,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_base_url: api_base_url(),
            auth_verify_timeout: auth_verify_timeout(),
            hair_swap_url: hair_swap_url(),
            hair_swap_timeout: hair_swap_timeout(),
            body_policy: BodyPolicy::from_env(),
        }
    }
}
