//! Registry-bound error construction.
//!
//! An [`ErrorFactory`] is registered once per service with a fixed catalog.
//! At a failure site, [`ErrorFactory::create_with`] looks up the template for
//! a code, substitutes placeholders and returns a [`CodedError`] whose message
//! has the layout
//!
//! ```text
//! <ServiceName>: <substituted template> (<service>/<code>).
//! ```
//!
//! Construction never fails: an unknown code produces the body `Error`, and a
//! missing placeholder value produces `<name?>`.
//!
//! # Example
//!
//! ```
//! use coded_errors::{error_data, ErrorCatalog, ErrorFactory};
//!
//! let factory = ErrorFactory::new(
//!     "storage",
//!     "Storage",
//!     ErrorCatalog::from([("object-not-found", "Object '{$object}' does not exist.")]),
//! );
//!
//! let err = factory.create_with("object-not-found", error_data! { "object" => "a.png" });
//! assert_eq!(err.code(), "storage/object-not-found");
//! assert_eq!(
//!     err.message(),
//!     "Storage: Object 'a.png' does not exist. (storage/object-not-found)."
//! );
//! ```

use crate::error::CodedError;
use crate::stack::StackCapture;
use crate::template::replace_template;
use coded_errors_types::{CatalogCode, ErrorCatalog, ErrorCode, ErrorData};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Message body used when a code has no template.
pub const FALLBACK_TEMPLATE: &str = "Error";

/// Builds [`CodedError`]s for one service from a fixed catalog.
///
/// `C` is the accepted code type: `str` for free-form codes, or an enum
/// declared with [`error_codes!`](crate::error_codes) to restrict callers to
/// a known set at compile time.
pub struct ErrorFactory<C: ?Sized = str> {
    service: String,
    service_name: String,
    errors: ErrorCatalog,
    stack_capture: StackCapture,
    _code: PhantomData<fn(&C)>,
}

impl ErrorFactory<str> {
    /// Create a factory that accepts any string code.
    pub fn new(
        service: impl Into<String>,
        service_name: impl Into<String>,
        errors: ErrorCatalog,
    ) -> Self {
        Self::with_catalog(service, service_name, errors)
    }
}

impl<C: CatalogCode> ErrorFactory<C> {
    /// Create a factory whose catalog is the template set of `C`.
    pub fn for_codes(service: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self::with_catalog(service, service_name, ErrorCatalog::from_codes::<C>())
    }
}

impl<C: ErrorCode + ?Sized> ErrorFactory<C> {
    /// Create a factory for code type `C` with an explicit catalog.
    pub fn with_catalog(
        service: impl Into<String>,
        service_name: impl Into<String>,
        errors: ErrorCatalog,
    ) -> Self {
        Self {
            service: service.into(),
            service_name: service_name.into(),
            errors,
            stack_capture: StackCapture::from_env(),
            _code: PhantomData,
        }
    }

    /// Override the stack capture policy for errors built by this factory.
    pub fn with_stack_capture(mut self, policy: StackCapture) -> Self {
        self.stack_capture = policy;
        self
    }

    /// Short namespace id, the prefix of every code.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Human-readable service name, the prefix of every message.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.errors
    }

    pub fn stack_capture(&self) -> StackCapture {
        self.stack_capture
    }

    /// The namespaced form of `code`, `service/code`.
    pub fn full_code(&self, code: &C) -> String {
        format!("{}/{}", self.service, code.code())
    }

    /// Create an error for `code` with no data.
    #[inline(never)]
    pub fn create(&self, code: &C) -> CodedError {
        self.build(code, ErrorData::new())
    }

    /// Create an error for `code`, filling placeholders from `data`.
    ///
    /// Keys ending in `_` are used for substitution but left out of the
    /// error's [`data`](CodedError::data).
    #[inline(never)]
    pub fn create_with(&self, code: &C, data: impl Into<ErrorData>) -> CodedError {
        self.build(code, data.into())
    }

    #[inline(never)]
    fn build(&self, code: &C, data: ErrorData) -> CodedError {
        let code = code.code();
        let full_code = format!("{}/{}", self.service, code);

        let body = match self.errors.template(code) {
            Some(template) if !template.is_empty() => replace_template(template, &data),
            _ => {
                debug!(
                    service = %self.service,
                    code,
                    "no template for error code, using fallback"
                );
                FALLBACK_TEMPLATE.to_string()
            }
        };

        let full_message = format!("{}: {} ({}).", self.service_name, body, full_code);

        CodedError::with_stack_capture(
            full_code,
            full_message,
            data.without_anonymous_keys(),
            self.stack_capture,
        )
    }
}

impl<C: ?Sized> Clone for ErrorFactory<C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            service_name: self.service_name.clone(),
            errors: self.errors.clone(),
            stack_capture: self.stack_capture,
            _code: PhantomData,
        }
    }
}

impl<C: ?Sized> fmt::Debug for ErrorFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFactory")
            .field("service", &self.service)
            .field("service_name", &self.service_name)
            .field("codes", &self.errors.len())
            .field("stack_capture", &self.stack_capture)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coded_errors_types::{error_codes, error_data};

    error_codes! {
        enum FakeError {
            Generic = "generic-error" => "Unknown error",
            FileNotFound = "file-not-found" => "Could not find file: '{$file}'",
            AnonReplace = "anon-replace" => "Hello, {$repl_}!",
        }
    }

    fn fake() -> ErrorFactory {
        ErrorFactory::new(
            "fake",
            "Fake",
            ErrorCatalog::from([
                ("generic-error", "Unknown error"),
                ("file-not-found", "Could not find file: '{$file}'"),
                ("anon-replace", "Hello, {$repl_}!"),
                ("empty", ""),
            ]),
        )
        .with_stack_capture(StackCapture::Never)
    }

    #[test]
    fn test_create_without_placeholders() {
        let e = fake().create("generic-error");
        assert_eq!(e.code(), "fake/generic-error");
        assert_eq!(e.message(), "Fake: Unknown error (fake/generic-error).");
        assert!(e.data().is_empty());
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let e = fake().create("no-such-code");
        assert_eq!(e.code(), "fake/no-such-code");
        assert_eq!(e.message(), "Fake: Error (fake/no-such-code).");
    }

    #[test]
    fn test_fallback_is_not_substituted() {
        let e = fake().create_with("no-such-code", error_data! { "Error" => "x" });
        assert_eq!(e.message(), "Fake: Error (fake/no-such-code).");
        // Data is still kept on the error
        assert_eq!(e.data().get("Error"), Some("x"));
    }

    #[test]
    fn test_empty_template_falls_back() {
        let e = fake().create("empty");
        assert_eq!(e.message(), "Fake: Error (fake/empty).");
    }

    #[test]
    fn test_anonymous_keys_substitute_but_are_filtered() {
        let e = fake().create_with("anon-replace", error_data! { "repl_" => "world" });
        assert_eq!(e.message(), "Fake: Hello, world! (fake/anon-replace).");
        assert!(!e.data().contains_key("repl_"));
    }

    #[test]
    fn test_full_code_and_accessors() {
        let factory = fake();
        assert_eq!(factory.full_code("x"), "fake/x");
        assert_eq!(factory.service(), "fake");
        assert_eq!(factory.service_name(), "Fake");
        assert_eq!(factory.catalog().len(), 4);
        assert_eq!(factory.stack_capture(), StackCapture::Never);
    }

    #[test]
    fn test_typed_factory() {
        let factory =
            ErrorFactory::<FakeError>::for_codes("fake", "Fake").with_stack_capture(StackCapture::Never);
        let e = factory.create_with(&FakeError::FileNotFound, error_data! { "file" => "foo.txt" });
        assert_eq!(e.code(), "fake/file-not-found");
        assert_eq!(
            e.message(),
            "Fake: Could not find file: 'foo.txt' (fake/file-not-found)."
        );
        assert_eq!(factory.full_code(&FakeError::Generic), "fake/generic-error");
    }

    #[test]
    fn test_debug_does_not_dump_catalog() {
        let rendered = format!("{:?}", fake());
        assert!(rendered.contains("service: \"fake\""));
        assert!(rendered.contains("codes: 4"));
        assert!(!rendered.contains("Unknown error"));
    }
}
