//! Named driver registry.
//!
//! A [`DriverRegistry`] maps names to shared drivers so that code which only
//! knows a driver name and a connection string can open connections. The
//! registry is an ordinary value: create it at startup, register drivers,
//! then share it (typically behind an `Arc`) for the rest of the process.
//! Entries are never removed.

use crate::credentials::CredentialsGenerator;
use crate::driver::{Driver, DynamicDriver};
use crate::error::{BoxError, DynamicSqlError};
use crate::Result;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Name under which [`register`] installs the credential-injecting driver
pub const DRIVER_NAME: &str = "dynamicsql";

/// Shared driver handle stored in a registry
pub type SharedDriver<C> = Arc<dyn Driver<Connection = C>>;

/// Registry of drivers producing connections of type `C`.
pub struct DriverRegistry<C> {
    drivers: RwLock<HashMap<String, SharedDriver<C>>>,
}

impl<C> Default for DriverRegistry<C> {
    fn default() -> Self {
        Self {
            drivers: RwLock::new(HashMap::new()),
        }
    }
}

impl<C> std::fmt::Debug for DriverRegistry<C>
where
    C: Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.drivers())
            .finish()
    }
}

impl<C> DriverRegistry<C>
where
    C: Send + 'static,
{
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `driver` under `name`.
    ///
    /// # Errors
    /// Returns [`DynamicSqlError::DuplicateDriver`] if the name is taken;
    /// the existing entry is left in place.
    pub fn register<D>(&self, name: impl Into<String>, driver: D) -> Result<()>
    where
        D: Driver<Connection = C> + 'static,
    {
        let name = name.into();
        let mut drivers = self.drivers.write().unwrap_or_else(PoisonError::into_inner);

        if drivers.contains_key(&name) {
            return Err(DynamicSqlError::duplicate_driver(name));
        }

        info!(driver = %name, "Registered database driver");
        drivers.insert(name, Arc::new(driver));
        Ok(())
    }

    /// Gets the driver registered under `name`
    pub fn get(&self, name: &str) -> Option<SharedDriver<C>> {
        self.drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Lists registered driver names in sorted order
    pub fn drivers(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Opens a connection with the driver registered under `name`.
    ///
    /// # Errors
    /// - [`DynamicSqlError::UnknownDriver`] if nothing is registered under `name`
    /// - whatever the driver itself returns, unchanged
    pub async fn open(&self, name: &str, dsn: &str) -> std::result::Result<C, BoxError> {
        let driver = self
            .get(name)
            .ok_or_else(|| BoxError::from(DynamicSqlError::unknown_driver(name)))?;

        debug!(driver = %name, "Opening connection through registered driver");
        driver.open(dsn).await
    }
}

/// Registers a credential-injecting driver under [`DRIVER_NAME`].
///
/// # Errors
/// Returns [`DynamicSqlError::DuplicateDriver`] if called twice on the same registry
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use chrono::{Duration, Utc};
/// use dynamicsql_core::{BoxError, Credentials, CredentialsGenerator, Driver, DriverRegistry, DRIVER_NAME, register};
///
/// struct EchoDriver;
///
/// #[async_trait]
/// impl Driver for EchoDriver {
///     type Connection = String;
///
///     async fn open(&self, dsn: &str) -> Result<String, BoxError> {
///         Ok(dsn.to_string())
///     }
/// }
///
/// struct StaticGenerator;
///
/// #[async_trait]
/// impl CredentialsGenerator for StaticGenerator {
///     async fn generate(&self) -> Result<Credentials, BoxError> {
///         Ok(Credentials::new("app", "pw", Utc::now() + Duration::minutes(5)))
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), BoxError> {
/// let registry = DriverRegistry::new();
/// register(&registry, EchoDriver, StaticGenerator)?;
///
/// let conn = registry.open(DRIVER_NAME, "genusername:genpassword@myhost/mydb").await?;
/// assert_eq!(conn, "app:pw@myhost/mydb");
/// # Ok(())
/// # }
/// ```
pub fn register<C, D, G>(registry: &DriverRegistry<C>, actual: D, generator: G) -> Result<()>
where
    C: Send + 'static,
    D: Driver<Connection = C> + 'static,
    G: CredentialsGenerator + 'static,
{
    registry.register(DRIVER_NAME, DynamicDriver::new(actual, generator))
}
