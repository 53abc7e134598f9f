use crate::domain::{HairSwapper, IdentityProvider};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub identity: Arc<dyn IdentityProvider>,
    pub hair_swapper: Arc<dyn HairSwapper>,
    // Upper bound for one identity lookup made by the gate.
    pub auth_verify_timeout: Duration,
}
