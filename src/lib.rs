//! Coded Errors
//!
//! Typed, human-readable errors built from a registered catalog of error codes
//! and message templates:
//!
//! - **[`ErrorFactory`]**: registered once per service with a fixed catalog;
//!   turns a code plus placeholder data into a [`CodedError`]
//! - **[`CodedError`]**: a `std::error::Error` carrying a namespaced code
//!   (`service/code`), a formatted message, the data used to build it and an
//!   optional construction-site backtrace
//!
//! Messages always have the layout
//! `<ServiceName>: <template with substitutions> (<service>/<code>).`
//!
//! # Example
//!
//! ```
//! use coded_errors::{error_codes, error_data, CodedError, ErrorFactory};
//!
//! error_codes! {
//!     pub enum FileError {
//!         Generic = "generic-error" => "Unknown error",
//!         NotFound = "file-not-found" => "Could not find file: '{$file}'",
//!     }
//! }
//!
//! fn open(factory: &ErrorFactory<FileError>, name: &str) -> Result<(), CodedError> {
//!     Err(factory.create_with(&FileError::NotFound, error_data! { "file" => name }))
//! }
//!
//! let factory = ErrorFactory::<FileError>::for_codes("fs", "FileSystem");
//! let err = open(&factory, "foo.txt").unwrap_err();
//! assert_eq!(err.code(), "fs/file-not-found");
//! assert_eq!(
//!     err.to_string(),
//!     "FileSystem: Could not find file: 'foo.txt' (fs/file-not-found)."
//! );
//! ```
//!
//! Stack capture follows [`StackCapture`]; the default comes from the
//! `CODED_ERRORS_STACK` environment variable (`always`, the default, `auto`
//! or `never`).

pub mod error;
pub mod factory;
pub mod stack;
pub mod template;

pub use error::{CodedError, ERROR_NAME};
pub use factory::{ErrorFactory, FALLBACK_TEMPLATE};
pub use stack::{StackCapture, STACK_CAPTURE_ENV};
pub use template::{missing_marker, replace_template};

// Re-export the shared types so callers depend on one crate
pub use coded_errors_types::{
    env_utils, error_codes, error_data, is_anonymous_key, CatalogCode, ErrorCatalog, ErrorCode,
    ErrorData, ANONYMOUS_KEY_SUFFIX,
};
