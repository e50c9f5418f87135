//! Credentials generator backed by an external command.
//!
//! Each call to [`generate`](CredentialsGenerator::generate) spawns the
//! configured command, e.g. `vault read -format=json database/creds/app`,
//! and parses its JSON stdout. Two output shapes are understood:
//!
//! - a Vault lease: `{"lease_duration": 3600, "data": {"username": "..", "password": ".."}}`
//! - a flat document: `{"username": "..", "password": "..", "expiration": "2026-01-01T00:00:00Z"}`
//!   where `expiration` is optional and falls back to the configured default TTL

use super::{Credentials, CredentialsGenerator};
use crate::{Result, config::CommandConfig, error::BoxError, error::DynamicSqlError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Deserialize)]
#[serde(untagged)]
enum CommandOutput {
    Lease {
        lease_duration: u64,
        data: LeaseData,
    },
    Flat {
        username: String,
        password: String,
        #[serde(default)]
        expiration: Option<DateTime<Utc>>,
    },
}

#[derive(Deserialize)]
struct LeaseData {
    username: String,
    password: String,
}

/// Generates credentials by running an external command on every call.
///
/// # Example
///
/// ```rust,no_run
/// use dynamicsql_core::{CommandConfig, CommandCredentialsGenerator, CredentialsGenerator};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = CommandConfig::new("vault").args(["read", "-format=json", "database/creds/app"]);
/// let generator = CommandCredentialsGenerator::new(config)?;
/// let creds = generator.generate().await?;
/// println!("credentials expire at {}", creds.expiration());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CommandCredentialsGenerator {
    config: CommandConfig,
}

impl CommandCredentialsGenerator {
    /// Creates a generator after validating its configuration
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid
    pub fn new(config: CommandConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gets the command configuration
    pub const fn config(&self) -> &CommandConfig {
        &self.config
    }

    async fn run(&self) -> Result<Credentials> {
        debug!(program = %self.config.program, "Running credentials command");

        let child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DynamicSqlError::io("Failed to spawn credentials command", e))?;

        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| DynamicSqlError::CommandTimeout {
                timeout: self.config.timeout,
            })?
            .map_err(|e| DynamicSqlError::io("Failed to read credentials command output", e))?;

        let stdout = Zeroizing::new(output.stdout);

        if !output.status.success() {
            debug!(
                status = %output.status,
                stderr_bytes = output.stderr.len(),
                "Credentials command exited unsuccessfully"
            );
            return Err(DynamicSqlError::CommandFailed {
                status: output.status.to_string(),
            });
        }

        parse_command_output(&stdout, self.config.default_ttl, Utc::now())
    }
}

#[async_trait]
impl CredentialsGenerator for CommandCredentialsGenerator {
    async fn generate(&self) -> std::result::Result<Credentials, BoxError> {
        Ok(self.run().await?)
    }
}

/// Parses credentials command stdout relative to `now`.
fn parse_command_output(
    stdout: &[u8],
    default_ttl: Duration,
    now: DateTime<Utc>,
) -> Result<Credentials> {
    let parsed: CommandOutput = serde_json::from_slice(stdout).map_err(|e| {
        DynamicSqlError::serialization("Credentials command printed unexpected output", e)
    })?;

    match parsed {
        CommandOutput::Lease {
            lease_duration,
            data,
        } => {
            let expiration = expires_after(now, Duration::from_secs(lease_duration))?;
            Ok(Credentials::new(data.username, data.password, expiration))
        }
        CommandOutput::Flat {
            username,
            password,
            expiration,
        } => {
            let expiration = match expiration {
                Some(expiration) => expiration,
                None => expires_after(now, default_ttl)?,
            };
            Ok(Credentials::new(username, password, expiration))
        }
    }
}

fn expires_after(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| DynamicSqlError::configuration("credential lifetime is out of range"))
}
