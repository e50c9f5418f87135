//! Database driver decorator that injects freshly generated credentials.
//!
//! Applications keep opening connections by connection string. When that
//! string contains the placeholders `genusername` and/or `genpassword`, a
//! [`CredentialsGenerator`] (for example one backed by Vault's database
//! secrets engine) is asked for new credentials, the placeholders are
//! replaced, and the result is handed to the real [`Driver`].
//!
//! # Security Guarantees
//! - Credentials are generated for every connection attempt, never cached
//! - Credentials and substituted connection strings are zeroized on drop
//! - Nothing secret is logged or included in this crate's error messages
//!
//! # Architecture
//! - [`DynamicDriver`]: the decorator; itself a [`Driver`]
//! - [`Connector`]: direct-connector form with a fixed template
//! - [`DriverRegistry`] and [`register`]: named-registry form
//! - [`Pool`]: connection pool opening new connections through a [`Connector`]
//! - [`adapters`]: sqlx delegate drivers (feature-gated)
//! - [`CommandCredentialsGenerator`]: credentials from an external command

#[cfg(any(feature = "postgresql", feature = "mysql", feature = "sqlite"))]
pub mod adapters;
pub mod config;
pub mod connector;
pub mod credentials;
pub mod driver;
pub mod error;
pub mod logging;
pub mod pool;
pub mod registry;

// Re-export commonly used types
#[cfg(feature = "mysql")]
pub use adapters::MySqlDriver;
#[cfg(feature = "postgresql")]
pub use adapters::PgDriver;
#[cfg(feature = "sqlite")]
pub use adapters::SqliteDriver;
#[cfg(any(feature = "postgresql", feature = "mysql", feature = "sqlite"))]
pub use adapters::SqlxDriver;
pub use config::{CommandConfig, PoolConfig};
pub use connector::{Connect, Connector};
pub use credentials::{CommandCredentialsGenerator, Credentials, CredentialsGenerator};
pub use driver::{
    Driver, DynamicDriver, PASSWORD_PLACEHOLDER, USERNAME_PLACEHOLDER, contains_placeholders,
    substitute_credentials, substitute_redacted,
};
pub use error::{BoxError, DynamicSqlError, Result};
pub use logging::init_logging;
pub use pool::{Pool, PooledConnection};
pub use registry::{DRIVER_NAME, DriverRegistry, SharedDriver, register};
