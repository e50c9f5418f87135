//! Configuration for credential commands and connection pools.

use crate::{Result, error::DynamicSqlError};
use std::time::Duration;

/// Configuration for [`CommandCredentialsGenerator`](crate::CommandCredentialsGenerator).
///
/// The command is executed directly (no shell) on every credential
/// generation and must print a JSON document on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    /// Program to execute, e.g. `vault`
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Maximum time the command may run
    pub timeout: Duration,
    /// Lifetime assumed when the command output carries no expiration
    pub default_ttl: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
            default_ttl: Duration::from_secs(3600),
        }
    }
}

impl CommandConfig {
    /// Creates a configuration for `program` with default limits
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Appends an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the command timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the fallback credential lifetime
    #[must_use]
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Validates the configuration
    ///
    /// # Errors
    /// Returns a configuration error if the program is blank or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(DynamicSqlError::configuration(
                "credentials command program must not be empty",
            ));
        }

        if self.timeout.is_zero() {
            return Err(DynamicSqlError::configuration(
                "credentials command timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Limits for a [`Pool`](crate::Pool).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of connections checked out or idle at once
    pub max_connections: u32,
    /// Maximum time [`Pool::acquire`](crate::Pool::acquire) waits for a free slot
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    /// Sets the maximum number of connections
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets the acquire timeout
    #[must_use]
    pub const fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    /// Validates the configuration
    ///
    /// # Errors
    /// Returns a configuration error if either limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(DynamicSqlError::configuration(
                "max_connections must be greater than zero",
            ));
        }

        if self.acquire_timeout.is_zero() {
            return Err(DynamicSqlError::configuration(
                "acquire_timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}
