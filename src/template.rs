//! Placeholder substitution for message templates.
//!
//! A placeholder is `{$name}` where `name` is one or more characters other
//! than `}`. Placeholders are matched left to right without overlap. A
//! placeholder whose value is missing or absent renders as `<name?>`.

use coded_errors_types::ErrorData;
use tracing::trace;

const PLACEHOLDER_OPEN: &str = "{$";
const PLACEHOLDER_CLOSE: char = '}';

/// Marker rendered in place of a placeholder that has no value.
pub fn missing_marker(key: &str) -> String {
    format!("<{}?>", key)
}

/// Replace every `{$name}` in `template` with the matching value from `data`.
pub fn replace_template(template: &str, data: &ErrorData) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];
        match after_open.find(PLACEHOLDER_CLOSE) {
            // `{$}` is not a placeholder; resume scanning just past the `{`
            Some(0) => {
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
            Some(end) => {
                let key = &after_open[..end];
                out.push_str(&rest[..start]);
                match data.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        trace!(placeholder = key, "no value for template placeholder");
                        out.push_str(&missing_marker(key));
                    }
                }
                rest = &after_open[end + PLACEHOLDER_CLOSE.len_utf8()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
