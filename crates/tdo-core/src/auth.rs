//! Bearer token resolution.
//!
//! `TODOIST_API_TOKEN` always wins. Otherwise the token is read from the
//! 1Password CLI (`op read <path>`).

use std::fmt;
use std::io::ErrorKind;
use std::process::Command;

use tracing::{debug, info};

use crate::error::AuthError;

pub const TOKEN_ENV_VAR: &str = "TODOIST_API_TOKEN";
pub const DEFAULT_TOKEN_PATH: &str = "op://Private/Todoist/token";

/// An opaque bearer token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Where a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    SecretManager,
}

/// Reads a secret by reference from an external store.
pub trait SecretReader {
    fn read(&self, reference: &str) -> Result<String, AuthError>;
}

/// `op read <reference>` through the 1Password CLI.
#[derive(Debug, Clone)]
pub struct OnePasswordCli {
    program: String,
}

impl OnePasswordCli {
    pub fn new() -> Self {
        Self::with_program("op")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OnePasswordCli {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretReader for OnePasswordCli {
    fn read(&self, reference: &str) -> Result<String, AuthError> {
        debug!(program = %self.program, reference, "reading secret");
        let output = Command::new(&self.program)
            .arg("read")
            .arg(reference)
            .output()
            .map_err(|e| AuthError::CommandMissing {
                program: self.program.clone(),
                reason: match e.kind() {
                    ErrorKind::NotFound => "not installed or not on PATH".to_string(),
                    _ => e.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(AuthError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        token_from_output(output.stdout, reference)
    }
}

fn token_from_output(stdout: Vec<u8>, reference: &str) -> Result<String, AuthError> {
    String::from_utf8(stdout).map_err(|_| AuthError::InvalidToken(reference.to_string()))
}

/// Resolves the API token from the environment or a secret store.
pub struct CredentialResolver<'a> {
    token_path: Option<String>,
    env: Box<dyn Fn(&str) -> Option<String> + 'a>,
    secrets: Box<dyn SecretReader + 'a>,
}

impl<'a> CredentialResolver<'a> {
    /// A resolver backed by the process environment and the `op` CLI.
    pub fn new(token_path: Option<String>) -> Self {
        Self::with_sources(
            token_path,
            |key| std::env::var(key).ok(),
            OnePasswordCli::new(),
        )
    }

    pub fn with_sources(
        token_path: Option<String>,
        env: impl Fn(&str) -> Option<String> + 'a,
        secrets: impl SecretReader + 'a,
    ) -> Self {
        Self {
            token_path: token_path.filter(|p| !p.trim().is_empty()),
            env: Box::new(env),
            secrets: Box::new(secrets),
        }
    }

    pub fn resolve(&self) -> Result<(ApiToken, TokenSource), AuthError> {
        if let Some(token) = (self.env)(TOKEN_ENV_VAR) {
            let token = token.trim();
            if !token.is_empty() {
                info!("using API token from {}", TOKEN_ENV_VAR);
                return Ok((ApiToken::new(token), TokenSource::Environment));
            }
        }

        let path = self.token_path.as_deref().ok_or(AuthError::NoSource)?;
        let raw = self.secrets.read(path)?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken(path.to_string()));
        }

        info!("retrieved API token from secret manager");
        Ok((ApiToken::new(token), TokenSource::SecretManager))
    }
}
