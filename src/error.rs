//! The coded error value.
//!
//! A [`CodedError`] is one occurrence of a failure: a namespaced code
//! (`service/code`), a fully formatted message, the data used to build it and,
//! where available, the stack at the point of construction.

use crate::stack::{self, StackCapture};
use coded_errors_types::ErrorData;
use serde::Serialize;
use std::fmt;

/// Family name carried by every [`CodedError`].
pub const ERROR_NAME: &str = "CodedError";

/// A typed error with a stable machine-readable code.
///
/// Implements [`std::error::Error`], so it propagates with `?` into
/// `Box<dyn Error>` or `anyhow::Error` and can be recovered with
/// `downcast_ref::<CodedError>()`.
#[derive(Debug, Clone, Serialize)]
pub struct CodedError {
    name: &'static str,
    code: String,
    message: String,
    data: ErrorData,
    #[serde(skip_serializing_if = "String::is_empty")]
    stack: String,
}

impl CodedError {
    /// Construct an error as given, capturing the stack per
    /// [`StackCapture::from_env`]. No validation is performed.
    #[inline(never)]
    pub fn new(code: impl Into<String>, message: impl Into<String>, data: ErrorData) -> Self {
        Self::with_stack_capture(code, message, data, StackCapture::from_env())
    }

    /// Construct an error with an explicit stack capture policy.
    #[inline(never)]
    pub fn with_stack_capture(
        code: impl Into<String>,
        message: impl Into<String>,
        data: ErrorData,
        policy: StackCapture,
    ) -> Self {
        Self {
            name: ERROR_NAME,
            code: code.into(),
            message: message.into(),
            data,
            stack: stack::capture(policy),
        }
    }

    /// Namespaced code, `service/code`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Always [`ERROR_NAME`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Data used to build the message, minus anonymous keys.
    pub fn data(&self) -> &ErrorData {
        &self.data
    }

    /// Backtrace text from construction time; empty when not captured.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// True if this error carries the namespaced code `full_code`.
    pub fn has_code(&self, full_code: &str) -> bool {
        self.code == full_code
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CodedError {}
