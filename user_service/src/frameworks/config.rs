use common::config::env_parse;

// Runtime settings read from the environment.

pub fn http_port() -> u16 {
    env_parse("USER_SERVICE_PORT", 3001)
}

pub fn session_ttl_seconds() -> u64 {
    env_parse("SESSION_TTL_SECONDS", 60 * 60)
}
