//! Shared types for the coded-errors workspace.
//!
//! This crate holds the pieces that describe *what* an error can say, without
//! constructing errors itself:
//!
//! - [`ErrorCatalog`] - code to template mapping owned by a factory
//! - [`ErrorData`] - placeholder values supplied per error
//! - [`ErrorCode`] / [`CatalogCode`] - traits for free-form and enumerated codes
//! - [`error_codes!`] / [`error_data!`] - declaration helpers
//! - [`env_utils`] - environment-driven configuration helpers

pub mod catalog;
pub mod data;
pub mod env_utils;

pub use catalog::{CatalogCode, ErrorCatalog, ErrorCode};
pub use data::{is_anonymous_key, ErrorData, ANONYMOUS_KEY_SUFFIX};
