use std::time::Duration;
use tracing::warn;

use crate::domain::gate::{AuthDecision, GateRequest, decide, is_gated};
use crate::domain::ports::IdentityProvider;

/// Evaluates one navigation against the session behind its `token` cookie.
///
/// Paths outside the gated table are never looked up. A lookup that fails
/// or outlives `timeout` sends the visitor to the error page; no retries.
pub struct AuthGateUseCase<P> {
    pub provider: P,
    pub timeout: Duration,
}

impl<P> AuthGateUseCase<P>
where
    P: IdentityProvider,
{
    pub async fn execute(&self, request: GateRequest) -> AuthDecision {
        if !is_gated(&request.current_path) {
            return AuthDecision::Bypass;
        }

        let lookup =
            match tokio::time::timeout(self.timeout, self.provider.lookup(&request.token)).await {
                Ok(Ok(lookup)) => lookup,
                Ok(Err(err)) => {
                    warn!(error = %err, path = %request.current_path, "identity lookup failed");
                    return AuthDecision::RedirectToError;
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        path = %request.current_path,
                        "identity lookup timed out"
                    );
                    return AuthDecision::RedirectToError;
                }
            };

        decide(&lookup, &request.current_path, &request.previous_path)
    }
}
