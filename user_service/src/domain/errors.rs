// A single rejected registration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: &'static str,
    pub message: &'static str,
}

// Domain-level errors for identity workflows.
#[derive(Debug)]
pub enum AuthError {
    InvalidRegistration(Vec<InvalidField>),
    EmailTaken,
    InvalidCredentials,
    InvalidToken,
    SessionExpired,
    StorageFailure,
}
