//! Attribute-path restrictions over host object graphs
//!
//! A wrapper restriction that resolves a dotted attribute path (`"a.b.c"`)
//! off a host object before delegating the resolved value to a child
//! matcher. The host side is abstracted behind the [`AttrObject`] trait so
//! any object graph can be matched against; resolution walks one segment at
//! a time, rebinding to each intermediate object.
//!
//! Paths without a dot take a shallow fast path: a single lookup by the
//! whole attribute name.

use std::borrow::Cow;
use std::fmt;

use crate::depset::values::StrRestriction;

/// A value pulled out of a host object graph during attribute resolution.
pub enum AttrValue<'a> {
    /// A textual leaf value.
    Text(Cow<'a, str>),
    /// An intermediate object that can itself be looked into.
    Object(&'a dyn AttrObject),
}

impl<'a> AttrValue<'a> {
    /// Borrowed text value.
    pub fn text(value: &'a str) -> Self {
        AttrValue::Text(Cow::Borrowed(value))
    }

    /// The value's string form, if it has one.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            AttrValue::Text(text) => Some(Cow::Borrowed(text.as_ref())),
            AttrValue::Object(object) => object.as_text(),
        }
    }
}

impl fmt::Debug for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            AttrValue::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Read-only attribute access over a host object.
pub trait AttrObject {
    /// Look up a single attribute by name.
    fn get_attr(&self, name: &str) -> Option<AttrValue<'_>>;

    /// The object's own string form, when it has one. Objects without one
    /// can never satisfy a string matcher directly.
    fn as_text(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// Errors from attribute resolution during a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A dotted-path segment was absent on the object being walked.
    AttributeMissing { attr: String, segment: String },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::AttributeMissing { attr, segment } => {
                write!(f, "attribute path '{}': segment '{}' is missing", attr, segment)
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Restriction resolving a dotted attribute path before delegating to a
/// child matcher.
///
/// `negate` defaults to false and `ignore_missing` to true; when a missing
/// attribute is ignored, the match result falls back to `negate`. The
/// `attr` path must be non-empty with no leading or trailing dot — that is
/// the caller's obligation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePathRestriction<R> {
    attr: String,
    restriction: R,
    negate: bool,
    ignore_missing: bool,
    shallow: bool,
}

impl<R: StrRestriction> AttributePathRestriction<R> {
    pub fn new(attr: impl Into<String>, restriction: R) -> Self {
        let attr = attr.into();
        debug_assert!(!attr.is_empty(), "attribute path must be non-empty");
        debug_assert!(
            !attr.starts_with('.') && !attr.ends_with('.'),
            "attribute path must not have leading/trailing dots"
        );
        let shallow = !attr.contains('.');
        Self {
            attr,
            restriction,
            negate: false,
            ignore_missing: true,
            shallow,
        }
    }

    /// Invert the overall match result.
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Whether a missing attribute is swallowed (true, the default) or
    /// surfaced as an error.
    pub fn ignore_missing(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }

    pub fn attr(&self) -> &str {
        &self.attr
    }

    pub fn restriction(&self) -> &R {
        &self.restriction
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    /// True iff the path has no dot, enabling the single-lookup fast path.
    pub fn shallow(&self) -> bool {
        self.shallow
    }

    /// Resolve the attribute path against `root` without matching.
    pub fn resolve<'a>(&self, root: &'a dyn AttrObject) -> Result<AttrValue<'a>, MatchError> {
        if self.shallow {
            return root
                .get_attr(&self.attr)
                .ok_or_else(|| self.missing(&self.attr));
        }
        let mut current = AttrValue::Object(root);
        for segment in self.attr.split('.') {
            let object = match current {
                AttrValue::Object(object) => object,
                // a text value has no attributes to walk into
                AttrValue::Text(_) => return Err(self.missing(segment)),
            };
            current = object
                .get_attr(segment)
                .ok_or_else(|| self.missing(segment))?;
        }
        Ok(current)
    }

    /// Resolve the path and delegate the value's string form to the child
    /// matcher, honoring `negate` and `ignore_missing`.
    pub fn matches(&self, root: &dyn AttrObject) -> Result<bool, MatchError> {
        let text = match self.resolve(root) {
            Ok(value) => value.as_text().map(|text| text.into_owned()),
            Err(err) => {
                if self.ignore_missing {
                    return Ok(self.negate);
                }
                return Err(err);
            }
        };
        let Some(text) = text else {
            // a value with no string form is treated like a missing attribute
            if self.ignore_missing {
                return Ok(self.negate);
            }
            let segment = self.attr.rsplit('.').next().unwrap_or(&self.attr).to_string();
            return Err(MatchError::AttributeMissing {
                attr: self.attr.clone(),
                segment,
            });
        };
        Ok(self.restriction.matches(&text) != self.negate)
    }

    fn missing(&self, segment: &str) -> MatchError {
        MatchError::AttributeMissing {
            attr: self.attr.clone(),
            segment: segment.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depset::values::ExactStringMatch;

    struct Category {
        name: String,
    }

    impl AttrObject for Category {
        fn get_attr(&self, name: &str) -> Option<AttrValue<'_>> {
            match name {
                "name" => Some(AttrValue::text(&self.name)),
                _ => None,
            }
        }
    }

    struct Package {
        name: String,
        category: Category,
    }

    impl AttrObject for Package {
        fn get_attr(&self, name: &str) -> Option<AttrValue<'_>> {
            match name {
                "name" => Some(AttrValue::text(&self.name)),
                "category" => Some(AttrValue::Object(&self.category)),
                _ => None,
            }
        }
    }

    fn sample() -> Package {
        Package {
            name: "rust".to_string(),
            category: Category {
                name: "dev-lang".to_string(),
            },
        }
    }

    #[test]
    fn test_shallow_lookup() {
        let r = AttributePathRestriction::new("name", ExactStringMatch::new("rust"));
        assert!(r.shallow());
        assert_eq!(r.matches(&sample()), Ok(true));
    }

    #[test]
    fn test_deep_lookup() {
        let r = AttributePathRestriction::new("category.name", ExactStringMatch::new("dev-lang"));
        assert!(!r.shallow());
        assert_eq!(r.matches(&sample()), Ok(true));
        assert_eq!(
            r.resolve(&sample()).unwrap().as_text().unwrap().as_ref(),
            "dev-lang"
        );
    }

    #[test]
    fn test_missing_segment_ignored_by_default() {
        let r = AttributePathRestriction::new("category.slot", ExactStringMatch::new("0"));
        assert_eq!(r.matches(&sample()), Ok(false));
    }

    #[test]
    fn test_missing_segment_ignored_with_negate() {
        let r =
            AttributePathRestriction::new("category.slot", ExactStringMatch::new("0")).negated();
        assert_eq!(r.matches(&sample()), Ok(true));
    }

    #[test]
    fn test_missing_segment_surfaces_when_required() {
        let r = AttributePathRestriction::new("category.slot", ExactStringMatch::new("0"))
            .ignore_missing(false);
        assert_eq!(
            r.matches(&sample()),
            Err(MatchError::AttributeMissing {
                attr: "category.slot".to_string(),
                segment: "slot".to_string(),
            })
        );
    }

    #[test]
    fn test_walk_through_text_is_missing() {
        // "name.len": the first hop resolves to text, which has no attributes.
        let r = AttributePathRestriction::new("name.len", ExactStringMatch::new("4"))
            .ignore_missing(false);
        assert_eq!(
            r.matches(&sample()),
            Err(MatchError::AttributeMissing {
                attr: "name.len".to_string(),
                segment: "len".to_string(),
            })
        );
    }

    #[test]
    fn test_negate_inverts_match() {
        let r = AttributePathRestriction::new("name", ExactStringMatch::new("rust")).negated();
        assert_eq!(r.matches(&sample()), Ok(false));
    }
}
