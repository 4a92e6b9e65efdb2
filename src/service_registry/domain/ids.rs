//! Identifier types for the service registry domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Escape character used by [`SanitizedKey`]. Always escaped itself.
const ESCAPE_CHAR: char = '%';

/// Separator between storage path segments.
const PATH_SEPARATOR: char = '/';

/// Reserved segment for the empty identifier.
///
/// No other identifier can produce it because every literal `%` is escaped.
const EMPTY_ID_SEGMENT: &str = "%00";

/// Encoded form of a single `.` inside the reserved `.` and `..` segments.
const ESCAPED_DOT: &str = "%2E";

/// Caller-supplied service identifier, stored exactly as given.
///
/// Identifiers are opaque: they may be empty, contain path separators, or
/// consist only of separators. Use [`ServiceId::sanitized_key`] to obtain the
/// storage-safe form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates an identifier from any raw string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as supplied by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw identifier bytes as persisted in the `Id` leaf.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Derives the storage path segment for this identifier.
    #[must_use]
    pub fn sanitized_key(&self) -> SanitizedKey {
        SanitizedKey::from_raw(&self.0)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServiceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage-path-safe form of a [`ServiceId`].
///
/// The mapping is total, deterministic and injective: `%` becomes `%25`, `/`
/// becomes `%2F`, the segments `.` and `..` are spelled with `%2E`, and the
/// empty identifier maps to `%00`. A sanitized key therefore never contains
/// the path separator and never names the current or parent node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SanitizedKey(String);

impl SanitizedKey {
    fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            return Self(EMPTY_ID_SEGMENT.to_owned());
        }
        if raw == "." || raw == ".." {
            return Self(ESCAPED_DOT.repeat(raw.len()));
        }

        let mut escaped = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match ch {
                ESCAPE_CHAR => escaped.push_str("%25"),
                PATH_SEPARATOR => escaped.push_str("%2F"),
                other => escaped.push(other),
            }
        }
        Self(escaped)
    }

    /// Returns the key as a path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SanitizedKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SanitizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
