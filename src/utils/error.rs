use std::fmt;

/// Failure taxonomy for store operations. `Invalid` carries the reason,
/// `Duplicate` the colliding email, `NotFound` the requested id and
/// `Unavailable` the underlying database/transport detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    Invalid(String),
    Duplicate(String),
    NotFound(String),
    Unavailable(String),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::Invalid(reason) => write!(f, "Invalid request: {}", reason),
            UserError::Duplicate(email) => write!(f, "Email '{}' is already registered", email),
            UserError::NotFound(id) => write!(f, "No user with id '{}'", id),
            UserError::Unavailable(detail) => write!(f, "Store unavailable: {}", detail),
        }
    }
}

impl std::error::Error for UserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_offending_value() {
        assert_eq!(
            UserError::Duplicate("a@x.com".into()).to_string(),
            "Email 'a@x.com' is already registered"
        );
        assert_eq!(
            UserError::Invalid("field 'name' is required".into()).to_string(),
            "Invalid request: field 'name' is required"
        );
    }
}
