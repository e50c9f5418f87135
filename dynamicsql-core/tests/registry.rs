//! Named-registry form: opening connections by driver name.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::uninlined_format_args)]

mod common;

use common::{FakeDriver, FakeDriverError, FakeGenerator, GenerateError, PASSWORD, TEMPLATE, USERNAME, chain_contains};
use dynamicsql_core::{DRIVER_NAME, DriverRegistry, DynamicSqlError, register};
use std::sync::Arc;

#[tokio::test]
async fn test_register_registers_driver() {
    let registry = DriverRegistry::new();
    let driver = Arc::new(FakeDriver::failing());
    let generator = Arc::new(FakeGenerator::returning(USERNAME, PASSWORD));

    register(&registry, Arc::clone(&driver), Arc::clone(&generator)).unwrap();
    assert_eq!(registry.drivers(), vec![DRIVER_NAME.to_string()]);

    let err = registry.open(DRIVER_NAME, TEMPLATE).await.unwrap_err();

    assert!(err.is::<FakeDriverError>(), "Did not call actual driver");
    assert_eq!(
        driver.received(),
        vec![format!("{}:{}@myhost/mydb", USERNAME, PASSWORD)],
        "Incorrect DSN"
    );
}

#[tokio::test]
async fn test_registered_driver_regenerates_per_open() {
    let registry = DriverRegistry::new();
    let driver = Arc::new(FakeDriver::accepting());
    let generator = Arc::new(FakeGenerator::incrementing());
    register(&registry, Arc::clone(&driver), Arc::clone(&generator)).unwrap();

    let first = registry.open(DRIVER_NAME, TEMPLATE).await.unwrap();
    let second = registry.open(DRIVER_NAME, TEMPLATE).await.unwrap();

    assert_eq!(first, "user-1:password-1@myhost/mydb");
    assert_eq!(second, "user-2:password-2@myhost/mydb");
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_registered_driver_surfaces_generation_failure() {
    let registry = DriverRegistry::new();
    let driver = Arc::new(FakeDriver::accepting());
    register(&registry, Arc::clone(&driver), FakeGenerator::failing()).unwrap();

    let err = registry.open(DRIVER_NAME, TEMPLATE).await.unwrap_err();

    assert!(chain_contains::<GenerateError>(&err));
    assert_eq!(driver.calls(), 0);
}

#[test]
fn test_register_twice_fails_loudly() {
    let registry = DriverRegistry::new();
    register(&registry, FakeDriver::accepting(), FakeGenerator::incrementing()).unwrap();

    let result = register(&registry, FakeDriver::accepting(), FakeGenerator::incrementing());

    assert!(matches!(result, Err(DynamicSqlError::DuplicateDriver { .. })));
}

#[tokio::test]
async fn test_registry_holds_plain_and_dynamic_drivers() {
    let registry = DriverRegistry::new();
    let plain = Arc::new(FakeDriver::accepting());
    registry.register("plain", Arc::clone(&plain)).unwrap();
    register(&registry, FakeDriver::accepting(), FakeGenerator::returning(USERNAME, PASSWORD)).unwrap();

    let conn = registry.open("plain", TEMPLATE).await.unwrap();

    assert_eq!(conn, TEMPLATE, "Plain driver must not substitute");
    assert_eq!(registry.drivers(), vec![DRIVER_NAME.to_string(), "plain".to_string()]);
}

#[tokio::test]
async fn test_shared_registry_across_tasks() {
    let registry = Arc::new(DriverRegistry::new());
    let generator = Arc::new(FakeGenerator::incrementing());
    register(&*registry, FakeDriver::accepting(), Arc::clone(&generator)).unwrap();

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.open(DRIVER_NAME, TEMPLATE).await })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked").unwrap();
    }

    assert_eq!(generator.calls(), 4);
}
