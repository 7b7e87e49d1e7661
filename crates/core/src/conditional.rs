//! Conditional-request decision logic.
//!
//! Pure functions over a freshly computed current tag and the tag the
//! client supplied. Outcomes map 1:1 onto HTTP statuses in the API layer:
//! 304 for a fresh cache, 428 for a missing precondition, 412 for a stale
//! one. Comparison is exact string equality of strong tags.

use crate::error::CoreError;

/// True when the client's `If-None-Match` tag equals the current tag, i.e.
/// the cached representation is still fresh and a GET may answer 304.
pub fn is_not_modified(current: &str, if_none_match: Option<&str>) -> bool {
    if_none_match.is_some_and(|tag| tag == current)
}

/// Gate a PATCH/PUT on a mandatory `If-Match` tag.
///
/// # Errors
///
/// [`CoreError::PreconditionRequired`] when no tag was supplied,
/// [`CoreError::PreconditionFailed`] when the supplied tag is stale.
pub fn require_if_match(current: &str, if_match: Option<&str>) -> Result<(), CoreError> {
    match if_match {
        None => Err(CoreError::PreconditionRequired),
        Some(tag) if tag != current => Err(CoreError::PreconditionFailed),
        Some(_) => Ok(()),
    }
}

/// Gate a DELETE on an optional `If-Match` tag: an absent header passes,
/// a stale tag fails.
///
/// # Errors
///
/// [`CoreError::PreconditionFailed`] when a tag was supplied and is stale.
pub fn check_if_match(current: &str, if_match: Option<&str>) -> Result<(), CoreError> {
    match if_match {
        Some(tag) if tag != current => Err(CoreError::PreconditionFailed),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const CURRENT: &str = "\"aaaa\"";
    const STALE: &str = "\"bbbb\"";

    #[test]
    fn if_none_match_hit_is_not_modified() {
        assert!(is_not_modified(CURRENT, Some(CURRENT)));
    }

    #[test]
    fn if_none_match_miss_or_absent_is_modified() {
        assert!(!is_not_modified(CURRENT, Some(STALE)));
        assert!(!is_not_modified(CURRENT, None));
    }

    #[test]
    fn mutation_without_tag_requires_precondition() {
        assert_matches!(
            require_if_match(CURRENT, None),
            Err(CoreError::PreconditionRequired)
        );
    }

    #[test]
    fn mutation_with_stale_tag_fails_precondition() {
        assert_matches!(
            require_if_match(CURRENT, Some(STALE)),
            Err(CoreError::PreconditionFailed)
        );
    }

    #[test]
    fn mutation_with_current_tag_passes() {
        assert_matches!(require_if_match(CURRENT, Some(CURRENT)), Ok(()));
    }

    #[test]
    fn delete_without_tag_passes() {
        assert_matches!(check_if_match(CURRENT, None), Ok(()));
    }

    #[test]
    fn delete_with_stale_tag_fails_precondition() {
        assert_matches!(
            check_if_match(CURRENT, Some(STALE)),
            Err(CoreError::PreconditionFailed)
        );
    }

    #[test]
    fn delete_with_current_tag_passes() {
        assert_matches!(check_if_match(CURRENT, Some(CURRENT)), Ok(()));
    }
}
