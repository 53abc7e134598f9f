use crate::domain::entities::{AccountDraft, DEFAULT_ROLE, UserAccount};
use crate::domain::errors::{AuthError, InvalidField};
use crate::domain::ports::{AccountStore, CredentialHasher};
use crate::use_cases::normalize_email;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_FULL_NAME_LEN: usize = 64;

// Input accepted by the registration use case.
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

// Registration use case with injected dependencies.
pub struct RegisterUseCase<A, H> {
    pub accounts: A,
    pub hasher: H,
}

impl<A, H> RegisterUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    pub async fn execute(&self, command: RegisterCommand) -> Result<UserAccount, AuthError> {
        let (email, full_name) = validate(&command)?;

        // Hash only after validation so rejected requests stay cheap.
        let password_hash = self
            .hasher
            .hash(&command.password)
            .await
            .map_err(|_| AuthError::StorageFailure)?;

        self.accounts
            .insert(AccountDraft {
                email,
                full_name,
                role: DEFAULT_ROLE.to_string(),
                password_hash,
            })
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::EmailTaken)
    }
}

// Collect every violated field so the client can show them together.
fn validate(command: &RegisterCommand) -> Result<(String, String), AuthError> {
    let mut violations = Vec::new();

    let email = normalize_email(&command.email);
    if !is_plausible_email(&email) {
        violations.push(InvalidField {
            field: "email",
            message: "Email is invalid",
        });
    }

    if command.password.chars().count() < MIN_PASSWORD_LEN {
        violations.push(InvalidField {
            field: "password",
            message: "Password must be at least 8 characters",
        });
    }

    let full_name = command.full_name.trim().to_string();
    let name_len = full_name.chars().count();
    if name_len == 0 || name_len > MAX_FULL_NAME_LEN {
        violations.push(InvalidField {
            field: "fullName",
            message: "Full name must be between 1 and 64 characters",
        });
    }

    if !violations.is_empty() {
        return Err(AuthError::InvalidRegistration(violations));
    }
    Ok((email, full_name))
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
