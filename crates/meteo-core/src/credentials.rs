//! Dashboard login credentials

use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Invalid credentials payload: expected a JSON object")]
    NotAnObject,

    #[error("Invalid {0}. {0} is not string.")]
    NotText(&'static str),
}

/// Username and password as submitted by a dashboard user
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Extract credentials from an untyped request body.
    ///
    /// Both `username` and `password` must be JSON strings; numbers, nulls
    /// and missing keys are rejected.
    pub fn from_json(value: &Value) -> Result<Self, CredentialsError> {
        let object = value.as_object().ok_or(CredentialsError::NotAnObject)?;

        let text = |key: &'static str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .ok_or(CredentialsError::NotText(key))
        };

        Ok(Self::new(text("username")?, text("password")?))
    }
}

// Keeps passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
