use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote service error{}: {message}", status_suffix(.status))]
    Remote {
        status: Option<u16>,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// HTTP status of a remote failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Remote { status, .. } => *status,
            CoreError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Remote {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// Reasons a bearer token could not be obtained.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no token source: TODOIST_API_TOKEN is unset and no token path is configured")]
    NoSource,

    #[error("could not run secret manager command '{program}': {reason}")]
    CommandMissing { program: String, reason: String },

    #[error("secret manager command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("secret manager returned an empty token for '{0}'")]
    EmptyToken(String),

    #[error("secret manager returned a token that is not valid UTF-8 for '{0}'")]
    InvalidToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_includes_status_when_known() {
        let err = CoreError::Remote {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Remote service error (503): Service Unavailable");
        assert_eq!(err.status(), Some(503));

        let err = CoreError::Remote {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Remote service error: connection refused");
    }

    #[test]
    fn auth_errors_wrap_into_core_error() {
        let err: CoreError = AuthError::EmptyToken("op://Private/Todoist/token".into()).into();
        assert!(matches!(err, CoreError::Authentication(AuthError::EmptyToken(_))));
        assert!(err.to_string().starts_with("Authentication failed"));
    }
}
