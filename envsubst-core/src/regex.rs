use crate::error;

/// Compiles a regular expression, memoizing recently used ones.
#[allow(clippy::needless_pass_by_value)]
#[cached::proc_macro::cached(size = 64, result = true)]
pub(crate) fn compile_regex(regex_str: String) -> Result<fancy_regex::Regex, error::Error> {
    match fancy_regex::Regex::new(regex_str.as_str()) {
        Ok(re) => Ok(re),
        Err(e) => Err(error::Error::InvalidRegex(e, regex_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_invalid_regex() {
        let err = compile_regex(String::from("(unclosed")).err();
        assert!(matches!(err, Some(error::Error::InvalidRegex(_, s)) if s == "(unclosed"));
    }

    #[test]
    fn compiles_valid_regex() {
        assert!(compile_regex(String::from("^a.*b$")).is_ok_and(|re| re.is_match("axxb").unwrap_or(false)));
    }
}
