//! Error catalogs: the fixed mapping from error code to message template.
//!
//! A template may contain any number of `{$name}` placeholders which are
//! filled from an [`ErrorData`](crate::ErrorData) when an error is created.
//!
//! Catalogs can be assembled three ways:
//! - from `(code, template)` pairs ([`ErrorCatalog::from_entries`] or `collect()`),
//! - from a code enum declared with [`error_codes!`](crate::error_codes),
//! - from a JSON object `{"code": "template", ...}` in a string or a file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

// =============================================================================
// Code Traits
// =============================================================================

/// A value usable as an error code.
///
/// Implemented for `str` and `String` so a factory can accept free-form codes,
/// and for every enum generated by [`error_codes!`](crate::error_codes).
pub trait ErrorCode {
    /// The code string as it appears after the service prefix.
    fn code(&self) -> &str;
}

impl ErrorCode for str {
    fn code(&self) -> &str {
        self
    }
}

impl ErrorCode for String {
    fn code(&self) -> &str {
        self.as_str()
    }
}

impl<T: ErrorCode + ?Sized> ErrorCode for &T {
    fn code(&self) -> &str {
        (**self).code()
    }
}

/// A closed set of error codes that carries its own templates.
pub trait CatalogCode: ErrorCode + Sized + 'static {
    /// Every code in the set, in declaration order.
    const ALL: &'static [Self];

    /// The message template for this code.
    fn template(&self) -> &'static str;
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable mapping from error code to message template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCatalog {
    templates: BTreeMap<String, String>,
}

impl ErrorCatalog {
    /// Build a catalog from `(code, template)` pairs. Later duplicates win.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Build a catalog covering every code of a [`CatalogCode`] set.
    pub fn from_codes<C: CatalogCode>() -> Self {
        C::ALL
            .iter()
            .map(|c| (c.code().to_string(), c.template()))
            .collect()
    }

    /// Parse a catalog from a JSON object of string templates.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self =
            serde_json::from_str(json).context("Failed to parse error catalog JSON")?;
        debug!(entries = catalog.len(), "loaded error catalog");
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read error catalog {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid error catalog {}", path.display()))
    }

    /// The template registered for `code`, if any.
    pub fn template(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.templates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ErrorCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

// =============================================================================
// Code Enum Macro
// =============================================================================

/// Declare an error-code enum together with its templates.
///
/// The generated enum implements [`ErrorCode`] and [`CatalogCode`], so a
/// factory parameterized over it only accepts its variants.
///
/// ```
/// use coded_errors_types::{error_codes, CatalogCode, ErrorCode};
///
/// error_codes! {
///     pub enum StorageError {
///         Unknown = "unknown" => "An unknown error occurred.",
///         ObjectNotFound = "object-not-found" => "Object '{$object}' does not exist.",
///     }
/// }
///
/// assert_eq!(StorageError::ObjectNotFound.code(), "object-not-found");
/// assert_eq!(StorageError::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! error_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $template:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::ErrorCode for $name {
            fn code(&self) -> &str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }
        }

        impl $crate::CatalogCode for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn template(&self) -> &'static str {
                match self {
                    $( $name::$variant => $template ),+
                }
            }
        }
    };
}
