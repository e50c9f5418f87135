//! Short-lived database credentials and the capability that produces them.
//!
//! # Security
//! - Username and password are stored in `Zeroizing` containers
//! - Memory is cleared when credentials go out of scope
//! - The password is never shown in debug output

mod command;

pub use command::CommandCredentialsGenerator;

use crate::error::BoxError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Generated database credentials with an expiration time.
///
/// The expiration is informational: the driver decorator never interprets it,
/// but generators and callers may use it to reason about rotation.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use dynamicsql_core::Credentials;
///
/// let creds = Credentials::new("v-app-7f3a", "s3cr3t", Utc::now() + Duration::minutes(10));
/// assert_eq!(creds.username(), "v-app-7f3a");
/// assert!(!creds.is_expired());
/// assert!(!format!("{:?}", creds).contains("s3cr3t"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<String>,
    expiration: DateTime<Utc>,
}

impl Credentials {
    /// Creates new credentials with automatic memory zeroing.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        expiration: DateTime<Utc>,
    ) -> Self {
        Self {
            username: Zeroizing::new(username.into()),
            password: Zeroizing::new(password.into()),
            expiration,
        }
    }

    /// Gets the generated username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the generated password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Gets the point in time after which the credentials are no longer valid
    pub const fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Checks whether the credentials have already expired
    pub fn is_expired(&self) -> bool {
        self.expiration <= Utc::now()
    }

    /// Remaining lifetime, or `None` once expired
    pub fn time_to_expiry(&self) -> Option<std::time::Duration> {
        self.expiration
            .signed_duration_since(Utc::now())
            .to_std()
            .ok()
            .filter(|remaining| !remaining.is_zero())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &"****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Produces fresh database credentials on demand.
///
/// Implementations are called once per connection attempt whose connection
/// string carries placeholders, possibly from several tasks at once. They
/// must not assume any caching happens on the caller's side.
#[async_trait]
pub trait CredentialsGenerator: Send + Sync {
    /// Generates a new set of credentials
    ///
    /// # Errors
    /// Returns whatever error the underlying credential source reports
    async fn generate(&self) -> Result<Credentials, BoxError>;
}

#[async_trait]
impl<T> CredentialsGenerator for Arc<T>
where
    T: CredentialsGenerator + ?Sized,
{
    async fn generate(&self) -> Result<Credentials, BoxError> {
        (**self).generate().await
    }
}

#[async_trait]
impl<T> CredentialsGenerator for Box<T>
where
    T: CredentialsGenerator + ?Sized,
{
    async fn generate(&self) -> Result<Credentials, BoxError> {
        (**self).generate().await
    }
}
