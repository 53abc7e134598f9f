// Use cases layer: identity workflows for the user service.

pub mod current_user;
pub mod login;
pub mod logout;
pub mod register;

#[cfg(test)]
pub(crate) mod test_support;

// Emails are matched case-insensitively and without surrounding whitespace.
pub(crate) fn normalize_email(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}
