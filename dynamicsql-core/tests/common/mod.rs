//! Counting fakes shared by the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dynamicsql_core::{BoxError, Credentials, CredentialsGenerator, Driver};
use std::error::Error;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEMPLATE: &str = "genusername:genpassword@myhost/mydb";
pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "thisisatotallysupersecretpassword";

/// Error returned by [`FakeDriver::failing`]
#[derive(Debug, thiserror::Error)]
#[error("fake driver not implemented")]
pub struct FakeDriverError;

/// Error returned by [`FakeGenerator::failing`]
#[derive(Debug, thiserror::Error)]
#[error("uh-oh")]
pub struct GenerateError;

type GenerateFn = dyn Fn(usize) -> Result<Credentials, BoxError> + Send + Sync;

/// Credentials generator that records how often it was called.
pub struct FakeGenerator {
    calls: AtomicUsize,
    generate: Box<GenerateFn>,
}

impl FakeGenerator {
    /// Always returns `username` / `password`
    pub fn returning(username: &'static str, password: &'static str) -> Self {
        Self::with(move |_| Ok(Credentials::new(username, password, expires_soon())))
    }

    /// Returns `user-N` / `password-N` for the N-th call, starting at 1
    pub fn incrementing() -> Self {
        Self::with(|call| {
            Ok(Credentials::new(
                format!("user-{}", call),
                format!("password-{}", call),
                expires_soon(),
            ))
        })
    }

    /// Always fails with [`GenerateError`]
    pub fn failing() -> Self {
        Self::with(|_| Err(Box::new(GenerateError)))
    }

    fn with(
        generate: impl Fn(usize) -> Result<Credentials, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            generate: Box::new(generate),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialsGenerator for FakeGenerator {
    async fn generate(&self) -> Result<Credentials, BoxError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        (self.generate)(call)
    }
}

/// Driver that records every connection string it receives.
///
/// Successful opens return the received string as the "connection".
pub struct FakeDriver {
    received: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeDriver {
    pub fn accepting() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl Driver for FakeDriver {
    type Connection = String;

    async fn open(&self, dsn: &str) -> Result<String, BoxError> {
        self.received.lock().unwrap().push(dsn.to_string());
        if self.fail {
            return Err(Box::new(FakeDriverError));
        }
        Ok(dsn.to_string())
    }
}

pub fn expires_soon() -> chrono::DateTime<Utc> {
    Utc::now() + Duration::minutes(10)
}

/// Returns true if any error in the source chain of `err` is an `E`
pub fn chain_contains<E>(err: &BoxError) -> bool
where
    E: Error + 'static,
{
    let top: &(dyn Error + 'static) = &**err;
    std::iter::successors(Some(top), |&e| e.source()).any(|e| e.is::<E>())
}
