//! Shell patterns

use crate::{error, regex, trace_categories};

/// Encapsulates a shell glob pattern used by the trim and replace operators.
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    pattern: String,
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Self {
            pattern: value.to_owned(),
        }
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Self { pattern: value }
    }
}

impl Pattern {
    /// Returns whether or not the pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Converts the pattern to a regular expression string.
    ///
    /// # Arguments
    ///
    /// * `strict_prefix_match` - Whether or not the pattern should strictly match the beginning of
    ///   the string.
    /// * `strict_suffix_match` - Whether or not the pattern should strictly match the end of the
    ///   string.
    pub(crate) fn to_regex_str(
        &self,
        strict_prefix_match: bool,
        strict_suffix_match: bool,
    ) -> Result<String, error::Error> {
        let mut regex_str = String::new();

        if strict_prefix_match {
            regex_str.push('^');
        }

        regex_str.push_str(&envsubst_parser::pattern::pattern_to_regex_str(&self.pattern)?);

        if strict_suffix_match {
            regex_str.push('$');
        }

        Ok(regex_str)
    }

    /// Converts the pattern to a regular expression. Wildcards match across newlines.
    ///
    /// # Arguments
    ///
    /// * `strict_prefix_match` - Whether or not the pattern should strictly match the beginning of
    ///   the string.
    /// * `strict_suffix_match` - Whether or not the pattern should strictly match the end of the
    ///   string.
    pub(crate) fn to_regex(
        &self,
        strict_prefix_match: bool,
        strict_suffix_match: bool,
    ) -> Result<fancy_regex::Regex, error::Error> {
        let regex_str = self.to_regex_str(strict_prefix_match, strict_suffix_match)?;

        tracing::debug!(target: trace_categories::PATTERN, "pattern: '{self:?}' => regex: '{regex_str}'");

        regex::compile_regex(std::format!("(?s){regex_str}"))
    }

    /// Checks if the pattern exactly matches the given string. An error result
    /// is returned if the pattern is found to be invalid or malformed
    /// during processing.
    ///
    /// # Arguments
    ///
    /// * `value` - The string to check for a match.
    pub fn exactly_matches(&self, value: &str) -> Result<bool, error::Error> {
        let re = self.to_regex(true, true)?;
        Ok(re.is_match(value)?)
    }
}

/// Removes the largest matching prefix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the prefix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_largest_matching_prefix<'a>(
    s: &'a str,
    pattern: &Pattern,
) -> Result<&'a str, error::Error> {
    if pattern.is_empty() {
        return Ok(s);
    }

    let indices = s.char_indices().rev();
    let mut last_idx = s.len();

    #[allow(
        clippy::string_slice,
        reason = "because we get the indices from char_indices()"
    )]
    for (idx, _) in indices {
        let prefix = &s[0..last_idx];
        if pattern.exactly_matches(prefix)? {
            return Ok(&s[last_idx..]);
        }

        last_idx = idx;
    }

    Ok(s)
}

/// Removes the smallest matching prefix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the prefix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_smallest_matching_prefix<'a>(
    s: &'a str,
    pattern: &Pattern,
) -> Result<&'a str, error::Error> {
    if pattern.is_empty() {
        return Ok(s);
    }

    if pattern.exactly_matches("")? {
        return Ok(s);
    }

    let mut indices = s.char_indices();

    #[allow(
        clippy::string_slice,
        reason = "because we get the indices from char_indices()"
    )]
    while indices.next().is_some() {
        let next_index = indices.offset();
        let prefix = &s[0..next_index];
        if pattern.exactly_matches(prefix)? {
            return Ok(&s[next_index..]);
        }
    }

    Ok(s)
}

/// Removes the largest matching suffix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the suffix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_largest_matching_suffix<'a>(
    s: &'a str,
    pattern: &Pattern,
) -> Result<&'a str, error::Error> {
    if pattern.is_empty() {
        return Ok(s);
    }

    #[allow(
        clippy::string_slice,
        reason = "because we get the indices from char_indices()"
    )]
    for (idx, _) in s.char_indices() {
        let suffix = &s[idx..];
        if pattern.exactly_matches(suffix)? {
            return Ok(&s[..idx]);
        }
    }

    Ok(s)
}

/// Removes the smallest matching suffix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the suffix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_smallest_matching_suffix<'a>(
    s: &'a str,
    pattern: &Pattern,
) -> Result<&'a str, error::Error> {
    if pattern.is_empty() {
        return Ok(s);
    }

    if pattern.exactly_matches("")? {
        return Ok(s);
    }

    #[allow(
        clippy::string_slice,
        reason = "because we get the indices from char_indices()"
    )]
    for (idx, _) in s.char_indices().rev() {
        let suffix = &s[idx..];
        if pattern.exactly_matches(suffix)? {
            return Ok(&s[..idx]);
        }
    }

    Ok(s)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pattern_translation() -> Result<()> {
        assert_eq!(Pattern::from("a").to_regex_str(true, true)?, "^a$");
        assert_eq!(Pattern::from("a*").to_regex_str(true, false)?, "^a.*");
        assert_eq!(Pattern::from("*.").to_regex_str(false, true)?, r".*\.$");
        assert_eq!(Pattern::from(r"a\*b").to_regex_str(false, false)?, r"a\*b");
        Ok(())
    }

    #[test]
    fn test_remove_largest_matching_prefix() -> Result<()> {
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from(""))?, "ooof");
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from("x"))?, "ooof");
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from("o"))?, "oof");
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from("o*o"))?, "f");
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from("o*"))?, "");
        assert_eq!(
            remove_largest_matching_prefix("🚀🚀🚀rocket", &Pattern::from("🚀"))?,
            "🚀🚀rocket"
        );
        Ok(())
    }

    #[test]
    fn test_remove_smallest_matching_prefix() -> Result<()> {
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from(""))?, "ooof");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("x"))?, "ooof");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("o*o"))?, "of");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("o*"))?, "oof");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("ooof"))?, "");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("*"))?, "ooof");
        assert_eq!(remove_smallest_matching_prefix("ooof", &Pattern::from("*f"))?, "");
        Ok(())
    }

    #[test]
    fn test_remove_largest_matching_suffix() -> Result<()> {
        assert_eq!(remove_largest_matching_suffix("foo", &Pattern::from("x"))?, "foo");
        assert_eq!(remove_largest_matching_suffix("foo", &Pattern::from("o"))?, "fo");
        assert_eq!(remove_largest_matching_suffix("foo", &Pattern::from("o*"))?, "f");
        assert_eq!(remove_largest_matching_suffix("foo", &Pattern::from("foo"))?, "");
        assert_eq!(
            remove_largest_matching_suffix("rocket🚀🚀🚀", &Pattern::from("🚀"))?,
            "rocket🚀🚀"
        );
        Ok(())
    }

    #[test]
    fn test_remove_smallest_matching_suffix() -> Result<()> {
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("x"))?, "fooo");
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("o*o"))?, "fo");
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("o*"))?, "foo");
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("fooo"))?, "");
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("*"))?, "fooo");
        assert_eq!(remove_smallest_matching_suffix("fooo", &Pattern::from("f*"))?, "");
        Ok(())
    }

    #[test]
    fn test_matching() -> Result<()> {
        assert!(Pattern::from("abc").exactly_matches("abc")?);
        assert!(!Pattern::from("abc").exactly_matches("ABC")?);
        assert!(!Pattern::from("abc").exactly_matches("xabcx")?);

        assert!(Pattern::from("*").exactly_matches("")?);
        assert!(Pattern::from("*").exactly_matches("multi\nline")?);

        assert!(Pattern::from("a?c").exactly_matches("abc")?);
        assert!(!Pattern::from("a?c").exactly_matches("ac")?);

        assert!(Pattern::from("[[:digit:]]*").exactly_matches("42abc")?);
        assert!(!Pattern::from("[!0-9]*").exactly_matches("42abc")?);
        Ok(())
    }
}
