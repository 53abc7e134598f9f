// Use cases layer: navigation gating and the hair-swap proxy.

pub mod auth_gate;
pub mod hair_swap;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_gate::AuthGateUseCase;
pub use hair_swap::{HairSwapFailure, HairSwapForm, HairSwapUseCase};
