//! sqlx-backed delegate drivers.
//!
//! [`SqlxDriver`] opens a single `sqlx` connection for whatever connection
//! string it receives. Wrapped in a [`DynamicDriver`](crate::DynamicDriver)
//! or [`Connector`](crate::Connector), it receives the substituted string.
//! Database support is feature-gated: `postgresql`, `mysql`, `sqlite`.

use crate::driver::Driver;
use crate::error::BoxError;
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::trace;

/// Driver opening connections of the sqlx database `DB`.
///
/// sqlx errors are returned boxed and otherwise untouched, so callers can
/// recover them with `downcast_ref::<sqlx::Error>()`.
pub struct SqlxDriver<DB> {
    _database: PhantomData<fn() -> DB>,
}

impl<DB> SqlxDriver<DB>
where
    DB: sqlx::Database,
{
    /// Creates a new driver
    pub const fn new() -> Self {
        Self {
            _database: PhantomData,
        }
    }
}

impl<DB> Default for SqlxDriver<DB>
where
    DB: sqlx::Database,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DB> Clone for SqlxDriver<DB> {
    fn clone(&self) -> Self {
        Self {
            _database: PhantomData,
        }
    }
}

impl<DB> std::fmt::Debug for SqlxDriver<DB>
where
    DB: sqlx::Database,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxDriver")
            .field("database", &DB::NAME)
            .finish()
    }
}

#[async_trait]
impl<DB> Driver for SqlxDriver<DB>
where
    DB: sqlx::Database,
{
    type Connection = DB::Connection;

    async fn open(&self, dsn: &str) -> Result<Self::Connection, BoxError> {
        trace!(database = DB::NAME, "Opening sqlx connection");
        <DB::Connection as sqlx::Connection>::connect(dsn)
            .await
            .map_err(BoxError::from)
    }
}

/// PostgreSQL driver
#[cfg(feature = "postgresql")]
pub type PgDriver = SqlxDriver<sqlx::Postgres>;

/// MySQL driver
#[cfg(feature = "mysql")]
pub type MySqlDriver = SqlxDriver<sqlx::MySql>;

/// SQLite driver
#[cfg(feature = "sqlite")]
pub type SqliteDriver = SqlxDriver<sqlx::Sqlite>;
