//! Implementations of the substitution operators. Each receives the resolved
//! value and its pre-evaluated arguments; none of them resolve variables.

use std::cmp::min;

use envsubst_parser::ast::SubstringMatchKind;

use crate::error;
use crate::patterns::{self, Pattern};

/// `${#v}`: the length of the value, in characters.
pub(crate) fn length(s: &str) -> String {
    s.chars().count().to_string()
}

pub(crate) fn uppercase_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn lowercase_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `${v:offset}` and `${v:offset:length}`, indexed by character.
///
/// A negative offset counts back from the end of the value. A negative length
/// marks an end position counted back from the end of the value. If either
/// argument is not an integer, the value is returned unchanged.
pub(crate) fn substring(s: &str, offset: &str, length: Option<&str>) -> String {
    let Some(offset) = parse_index(offset) else {
        return s.to_owned();
    };

    #[expect(clippy::cast_possible_wrap)]
    let len = s.chars().count() as i64;

    let start = if offset < 0 { offset + len } else { min(offset, len) };
    if start < 0 {
        return String::new();
    }

    let end = match length {
        None => len,
        Some(length) => {
            let Some(length) = parse_index(length) else {
                return s.to_owned();
            };

            if length < 0 {
                length + len
            } else {
                min(start.saturating_add(length), len)
            }
        }
    };

    if end <= start {
        return String::new();
    }

    #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let (skip, take) = (start as usize, (end - start) as usize);

    s.chars().skip(skip).take(take).collect()
}

/// An empty argument counts as zero.
fn parse_index(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        Some(0)
    } else {
        s.parse().ok()
    }
}

pub(crate) fn remove_smallest_prefix(s: &str, pattern: &str) -> Result<String, error::Error> {
    patterns::remove_smallest_matching_prefix(s, &Pattern::from(pattern)).map(str::to_owned)
}

pub(crate) fn remove_largest_prefix(s: &str, pattern: &str) -> Result<String, error::Error> {
    patterns::remove_largest_matching_prefix(s, &Pattern::from(pattern)).map(str::to_owned)
}

pub(crate) fn remove_smallest_suffix(s: &str, pattern: &str) -> Result<String, error::Error> {
    patterns::remove_smallest_matching_suffix(s, &Pattern::from(pattern)).map(str::to_owned)
}

pub(crate) fn remove_largest_suffix(s: &str, pattern: &str) -> Result<String, error::Error> {
    patterns::remove_largest_matching_suffix(s, &Pattern::from(pattern)).map(str::to_owned)
}

/// `${v/pattern/string}` and friends. The replacement is inserted literally.
///
/// An empty pattern matches nothing, except under `/#` and `/%` where it matches
/// at the anchor.
pub(crate) fn replace_substring(
    s: &str,
    pattern: &str,
    replacement: &str,
    match_kind: SubstringMatchKind,
) -> Result<String, error::Error> {
    let pattern = Pattern::from(pattern);
    if pattern.is_empty()
        && matches!(
            match_kind,
            SubstringMatchKind::FirstOccurrence | SubstringMatchKind::Anywhere
        )
    {
        return Ok(s.to_owned());
    }

    let regex = pattern.to_regex(
        matches!(match_kind, SubstringMatchKind::Prefix),
        matches!(match_kind, SubstringMatchKind::Suffix),
    )?;

    let limit = match match_kind {
        SubstringMatchKind::Anywhere => 0,
        SubstringMatchKind::Prefix
        | SubstringMatchKind::Suffix
        | SubstringMatchKind::FirstOccurrence => 1,
    };

    let result = regex.try_replacen(s, limit, fancy_regex::NoExpand(replacement))?;
    Ok(result.into_owned())
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_length() {
        assert_eq!(length("abcdEFGH28ij"), "12");
        assert_eq!(length(""), "0");
        assert_eq!(length("🚀x"), "2");
    }

    #[test]
    fn test_case_folding_first_char() {
        assert_eq!(uppercase_first_char("abcdEFGH28ij"), "AbcdEFGH28ij");
        assert_eq!(lowercase_first_char("ABC"), "aBC");
        assert_eq!(uppercase_first_char(""), "");
        assert_eq!(lowercase_first_char(""), "");
        assert_eq!(uppercase_first_char("ßa"), "SSa");
    }

    #[test]
    fn test_substring() {
        let v = "/home/bozo/ideas/thoughts.for.today";
        assert_eq!(substring(v, "11", None), "ideas/thoughts.for.today");
        assert_eq!(substring(v, "11", Some("5")), "ideas");
        assert_eq!(substring(v, "100", None), "");
        assert_eq!(substring(v, "11", Some("100")), "ideas/thoughts.for.today");
        assert_eq!(substring("abcdef", " -3", None), "def");
        assert_eq!(substring("abcdef", "-10", None), "");
        assert_eq!(substring("abcdef", "1", Some("-1")), "bcde");
        assert_eq!(substring("abcdef", "4", Some("-3")), "");
        assert_eq!(substring("abcdef", "2", Some("")), "");
        assert_eq!(substring("abcdef", "x", None), "abcdef");
        assert_eq!(substring("abcdef", "1", Some("x")), "abcdef");
        assert_eq!(substring("🚀🚀rocket", "1", Some("2")), "🚀r");
    }

    #[test]
    fn test_remove() -> Result<()> {
        let v = "bash.string.txt";
        assert_eq!(remove_smallest_prefix(v, "*.")?, "string.txt");
        assert_eq!(remove_largest_prefix(v, "*.")?, "txt");
        assert_eq!(remove_smallest_suffix(v, ".*")?, "bash.string");
        assert_eq!(remove_largest_suffix(v, ".*")?, "bash");
        assert_eq!(remove_largest_suffix(v, "nomatch")?, v);

        // A pattern matching the empty string removes nothing when shortest.
        assert_eq!(remove_smallest_prefix("abc", "*")?, "abc");
        assert_eq!(remove_smallest_suffix("abc", "*")?, "abc");
        assert_eq!(remove_smallest_prefix("a.b.c", "*")?, "a.b.c");
        assert_eq!(remove_largest_prefix("abc", "*")?, "");
        assert_eq!(remove_largest_suffix("abc", "*")?, "");
        Ok(())
    }

    #[test]
    fn test_replace() -> Result<()> {
        let v = "abcABC123ABCabc";
        assert_eq!(
            replace_substring(v, "abc", "xyz", SubstringMatchKind::FirstOccurrence)?,
            "xyzABC123ABCabc"
        );
        assert_eq!(
            replace_substring(v, "abc", "xyz", SubstringMatchKind::Anywhere)?,
            "xyzABC123ABCxyz"
        );
        assert_eq!(
            replace_substring(v, "abc", "XYZ", SubstringMatchKind::Suffix)?,
            "abcABC123ABCXYZ"
        );
        assert_eq!(
            replace_substring(v, "abc", "XYZ", SubstringMatchKind::Prefix)?,
            "XYZABC123ABCabc"
        );
        assert_eq!(
            replace_substring(v, "ABC", "XYZ", SubstringMatchKind::Prefix)?,
            v
        );
        Ok(())
    }

    #[test]
    fn test_replace_edge_cases() -> Result<()> {
        assert_eq!(
            replace_substring("foo.bar", ".", "", SubstringMatchKind::FirstOccurrence)?,
            "foobar"
        );
        assert_eq!(
            replace_substring("a.b", ".", "$0", SubstringMatchKind::Anywhere)?,
            "a$0b"
        );
        assert_eq!(
            replace_substring("abc", "", "x", SubstringMatchKind::Anywhere)?,
            "abc"
        );
        assert_eq!(
            replace_substring("abc", "", "x", SubstringMatchKind::FirstOccurrence)?,
            "abc"
        );
        assert_eq!(
            replace_substring("abc", "", "X", SubstringMatchKind::Prefix)?,
            "Xabc"
        );
        assert_eq!(
            replace_substring("abc", "", "X", SubstringMatchKind::Suffix)?,
            "abcX"
        );
        assert_eq!(
            replace_substring("", "", "X", SubstringMatchKind::Prefix)?,
            "X"
        );
        assert_eq!(
            replace_substring("foo/bar/baz", "/", "-", SubstringMatchKind::Anywhere)?,
            "foo-bar-baz"
        );
        assert_eq!(
            replace_substring("aXbXc", "X*", "-", SubstringMatchKind::FirstOccurrence)?,
            "a-"
        );
        Ok(())
    }
}
