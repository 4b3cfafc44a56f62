//! Stack capture under the environment-driven default policy.
//!
//! Every test here changes process environment variables, so they live in
//! their own test binary and take `ENV_LOCK` before touching the environment.

use coded_errors::{
    CodedError, ErrorCatalog, ErrorData, ErrorFactory, StackCapture, STACK_CAPTURE_ENV,
};
use parking_lot::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_backtrace_env() {
    std::env::remove_var("RUST_BACKTRACE");
    std::env::remove_var("RUST_LIB_BACKTRACE");
    std::env::remove_var(STACK_CAPTURE_ENV);
}

fn factory() -> ErrorFactory {
    ErrorFactory::new(
        "fake",
        "Fake",
        ErrorCatalog::from([("generic-error", "Unknown error")]),
    )
}

#[test]
fn test_default_factory_has_stack() {
    let _guard = ENV_LOCK.lock();
    clear_backtrace_env();

    let factory = factory();
    assert_eq!(factory.stack_capture(), StackCapture::Always);

    let e = factory.create("generic-error");
    assert!(!e.stack().is_empty());
    assert!(e.stack().contains("test_default_factory_has_stack"));
}

#[test]
fn test_env_policy_reaches_factory() {
    let _guard = ENV_LOCK.lock();
    clear_backtrace_env();

    std::env::set_var(STACK_CAPTURE_ENV, "never");
    let factory = factory();
    std::env::remove_var(STACK_CAPTURE_ENV);

    assert_eq!(factory.stack_capture(), StackCapture::Never);
    assert_eq!(factory.create("generic-error").stack(), "");
}

#[test]
fn test_auto_policy_follows_rust_backtrace() {
    let _guard = ENV_LOCK.lock();
    clear_backtrace_env();

    std::env::set_var(STACK_CAPTURE_ENV, "auto");
    std::env::set_var("RUST_LIB_BACKTRACE", "0");
    let e = factory().create("generic-error");
    clear_backtrace_env();

    assert_eq!(e.stack(), "");
}

#[test]
fn test_coded_error_new_uses_env_policy() {
    let _guard = ENV_LOCK.lock();
    clear_backtrace_env();

    std::env::set_var(STACK_CAPTURE_ENV, "never");
    let quiet = CodedError::new("a/b", "A: b (a/b).", ErrorData::new());
    std::env::set_var(STACK_CAPTURE_ENV, "always");
    let loud = CodedError::new("a/b", "A: b (a/b).", ErrorData::new());
    clear_backtrace_env();

    assert_eq!(quiet.stack(), "");
    assert!(!loud.stack().is_empty());
    assert!(!loud.stack().contains("coded_errors::error::CodedError"));
    assert_eq!(quiet.code(), loud.code());
    assert_eq!(quiet.message(), loud.message());
}
