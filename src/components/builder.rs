//! The builder lifecycle
//!
//! Builders accumulate optional values, report whether anything was set,
//! and commit to a validated component. An empty builder commits to
//! `Ok(None)`: the optional element was simply not supplied.

use crate::error::Result;
use crate::version::VersionContext;
use std::fmt;

/// A mutable accumulator paired with one component or attribute group type
pub trait Builder: fmt::Debug {
    /// The type produced on commit
    type Target;

    /// Check whether every field and every child builder is empty.
    ///
    /// This is computed from the current state on every call.
    fn is_empty(&self) -> bool;

    /// Validate the accumulated values and produce the target.
    ///
    /// Returns `Ok(None)` when the builder is empty. Validation failures
    /// are returned unchanged; no partially built value is ever produced.
    fn commit(&self, ctx: &VersionContext) -> Result<Option<Self::Target>>;
}

/// Commit every non-empty builder of a list, discarding the empty ones
pub fn commit_all<B: Builder>(builders: &[B], ctx: &VersionContext) -> Result<Vec<B::Target>> {
    let mut committed = Vec::with_capacity(builders.len());
    for builder in builders {
        if let Some(target) = builder.commit(ctx)? {
            committed.push(target);
        }
    }
    Ok(committed)
}

/// Check whether every builder of a list is empty
pub fn all_empty<B: Builder>(builders: &[B]) -> bool {
    builders.iter().all(Builder::is_empty)
}

/// Check whether every string of a list is blank
pub fn all_blank(values: &[String]) -> bool {
    values.iter().all(|v| v.trim().is_empty())
}

/// Check whether an optional string is absent or blank
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// The commit result of an empty builder
pub(crate) fn omitted<T>(builder: &str) -> Result<Option<T>> {
    tracing::trace!(builder, "empty builder committed to nothing");
    Ok(None)
}

/// Trim an optional value, treating blank as absent
pub(crate) fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The non-blank strings of a list, trimmed
pub(crate) fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::SecurityAttributesBuilder;
    use crate::components::SubOrganizationBuilder;
    use crate::version::DdmsVersion;

    fn sub(text: &str) -> SubOrganizationBuilder {
        SubOrganizationBuilder {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_commit_all_discards_empty() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let builders = vec![SubOrganizationBuilder::default(), sub("PEO"), sub(" ")];
        assert!(!all_empty(&builders));

        let committed = commit_all(&builders, &ctx).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].text(), "PEO");
    }

    #[test]
    fn test_commit_all_propagates_errors() {
        let ctx = VersionContext::new(DdmsVersion::V5_0);
        let builders = vec![SubOrganizationBuilder {
            text: Some("PEO".to_string()),
            security: SecurityAttributesBuilder::new().with("classification", "bogus"),
        }];
        assert!(commit_all(&builders, &ctx).is_err());
    }

    #[test]
    fn test_blank_helpers() {
        assert!(all_blank(&[]));
        assert!(all_blank(&[" ".to_string()]));
        assert!(!all_blank(&["a".to_string()]));
        assert!(is_blank(&None));
        assert!(is_blank(&Some("\t".to_string())));
        assert_eq!(non_blank(&[" a ".to_string(), "".to_string()]), vec!["a"]);
    }
}
