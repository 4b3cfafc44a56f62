//! Backtrace capture for coded errors.
//!
//! Capture is a capability, not a requirement: when the platform cannot
//! produce a backtrace, or the policy disables it, the stack is the empty
//! string. Captured traces are trimmed so that the first frame is the code
//! that asked for the error, not the capture machinery or the factory.

use coded_errors_types::env_utils::env_var_or;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the default [`StackCapture`] policy.
pub const STACK_CAPTURE_ENV: &str = "CODED_ERRORS_STACK";

/// Symbol prefixes of frames that never belong in a reported stack.
const INTERNAL_FRAMES: &[&str] = &[
    "std::backtrace",
    "std::backtrace_rs",
    "coded_errors::stack::",
    "coded_errors::error::CodedError",
    "coded_errors::factory::ErrorFactory",
    "<coded_errors::",
];

/// When to capture a backtrace for a new error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackCapture {
    /// Follow `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    Auto,
    /// Always capture, regardless of environment.
    #[default]
    Always,
    /// Never capture; stacks are empty.
    Never,
}

impl StackCapture {
    /// Policy configured through [`STACK_CAPTURE_ENV`], defaulting to `Always`.
    pub fn from_env() -> Self {
        Self::from_env_var(STACK_CAPTURE_ENV)
    }

    /// Policy read from `key`, defaulting to `Always` when unset or unparsable.
    pub fn from_env_var(key: &str) -> Self {
        env_var_or(key, StackCapture::default())
    }

    fn as_str(&self) -> &'static str {
        match self {
            StackCapture::Auto => "auto",
            StackCapture::Always => "always",
            StackCapture::Never => "never",
        }
    }
}

impl fmt::Display for StackCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StackCapture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(StackCapture::Auto),
            "always" | "1" | "true" | "on" => Ok(StackCapture::Always),
            "never" | "0" | "false" | "off" => Ok(StackCapture::Never),
            other => Err(format!("unknown stack capture policy '{}'", other)),
        }
    }
}

/// Capture the current stack according to `policy`.
///
/// Returns an empty string when nothing was captured.
#[inline(never)]
pub(crate) fn capture(policy: StackCapture) -> String {
    let backtrace = match policy {
        StackCapture::Never => return String::new(),
        StackCapture::Auto => Backtrace::capture(),
        StackCapture::Always => Backtrace::force_capture(),
    };
    if backtrace.status() != BacktraceStatus::Captured {
        return String::new();
    }
    trim_internal_frames(&backtrace.to_string())
}

/// One symbol of rendered backtrace text plus the `at file:line` lines that
/// follow it. Symbols inlined into the same physical frame share `frame`.
struct Entry<'a> {
    frame: usize,
    symbol: &'a str,
    locations: Vec<&'a str>,
}

fn frame_symbol(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    trimmed[digits..].strip_prefix(": ")
}

fn parse_entries(text: &str) -> Vec<Entry<'_>> {
    let mut entries: Vec<Entry<'_>> = Vec::new();
    let mut frame = 0;
    for line in text.lines() {
        if let Some(symbol) = frame_symbol(line) {
            if !entries.is_empty() {
                frame += 1;
            }
            entries.push(Entry {
                frame,
                symbol,
                locations: Vec::new(),
            });
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match entries.last_mut() {
            Some(entry) if trimmed.starts_with("at ") => entry.locations.push(trimmed),
            // Unnumbered symbol: inlined into the current frame
            Some(_) => entries.push(Entry {
                frame,
                symbol: trimmed,
                locations: Vec::new(),
            }),
            None => {}
        }
    }
    entries
}

fn is_internal(symbol: &str) -> bool {
    INTERNAL_FRAMES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}

/// Drop every symbol up to and including the last internal one, then
/// renumber the remaining frames from 0.
///
/// Text that does not look like a rendered backtrace is returned unchanged.
pub(crate) fn trim_internal_frames(text: &str) -> String {
    let entries = parse_entries(text);
    if entries.is_empty() {
        return text.to_string();
    }
    let start = entries
        .iter()
        .rposition(|e| is_internal(e.symbol))
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut out = String::new();
    let mut index = 0;
    let mut current = None;
    for entry in &entries[start..] {
        if current == Some(entry.frame) {
            out.push_str(&format!("      {}\n", entry.symbol));
        } else {
            if current.is_some() {
                index += 1;
            }
            current = Some(entry.frame);
            out.push_str(&format!("{:>4}: {}\n", index, entry.symbol));
        }
        for location in &entry.locations {
            out.push_str(&format!("             {}\n", location));
        }
    }
    out
}
