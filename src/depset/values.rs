//! Exact string value restrictions
//!
//! The leaf-level match primitive: compare a value's string form against a
//! stored string, case-sensitively or not, optionally negated. Instances
//! are immutable; the stored string is normalized (lowercased) once at
//! construction when the match is case-insensitive, and a hash over
//! `(exact, negate, case_sensitive)` is precomputed for cheap set and map
//! membership.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Matchers over the string form of a value.
pub trait StrRestriction {
    fn matches(&self, value: &str) -> bool;
}

/// Exact string comparison match.
///
/// Construction defaults are case-sensitive and non-negated; both flags are
/// only changed by asking for it explicitly via [`with_flags`].
///
/// [`with_flags`]: ExactStringMatch::with_flags
#[derive(Debug, Clone)]
pub struct ExactStringMatch {
    exact: String,
    negate: bool,
    case_sensitive: bool,
    hash: u64,
}

impl ExactStringMatch {
    /// Case-sensitive, non-negated match on `exact`.
    pub fn new(exact: impl Into<String>) -> Self {
        Self::with_flags(exact, true, false)
    }

    pub fn with_flags(exact: impl Into<String>, case_sensitive: bool, negate: bool) -> Self {
        let mut exact = exact.into();
        if !case_sensitive {
            exact = exact.to_lowercase();
        }
        let hash = {
            let mut hasher = DefaultHasher::new();
            exact.hash(&mut hasher);
            negate.hash(&mut hasher);
            case_sensitive.hash(&mut hasher);
            hasher.finish()
        };
        Self {
            exact,
            negate,
            case_sensitive,
            hash,
        }
    }

    /// The stored comparison string (already lowercased when the match is
    /// case-insensitive).
    pub fn exact(&self) -> &str {
        &self.exact
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Match a value already in string form.
    pub fn matches(&self, value: &str) -> bool {
        let equal = if self.case_sensitive {
            self.exact == value
        } else {
            self.exact == value.to_lowercase()
        };
        equal != self.negate
    }

    /// Match any value by coercing it to its display form first.
    pub fn matches_value<V: fmt::Display + ?Sized>(&self, value: &V) -> bool {
        self.matches(&value.to_string())
    }
}

impl StrRestriction for ExactStringMatch {
    fn matches(&self, value: &str) -> bool {
        ExactStringMatch::matches(self, value)
    }
}

impl PartialEq for ExactStringMatch {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.negate != other.negate || self.case_sensitive != other.case_sensitive {
            return false;
        }
        self.exact == other.exact
    }
}

impl Eq for ExactStringMatch {}

impl Hash for ExactStringMatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
