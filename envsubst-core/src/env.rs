//! Resolution of variables against the process environment.

use crate::eval::VariableResolver;

/// Resolves variables from the process environment.
///
/// In lenient mode (the default) an unset variable resolves to the empty string,
/// so default-value operators only see it as empty. In strict mode it is reported
/// as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvResolver {
    strict: bool,
}

impl EnvResolver {
    /// Returns a new resolver.
    ///
    /// # Arguments
    ///
    /// * `strict` - Whether unset variables are reported as unset rather than empty.
    pub const fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl VariableResolver for EnvResolver {
    fn resolve(&mut self, name: &str) -> Option<String> {
        match std::env::var_os(name) {
            Some(value) => Some(value.to_string_lossy().into_owned()),
            None if self.strict => None,
            None => Some(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNSET: &str = "ENVSUBST_TEST_VARIABLE_THAT_IS_NEVER_SET";

    #[test]
    fn unset_variables() {
        assert_eq!(EnvResolver::new(false).resolve(UNSET), Some(String::new()));
        assert_eq!(EnvResolver::new(true).resolve(UNSET), None);
    }

    #[test]
    fn set_variables() {
        let Some(expected) = std::env::var_os("PATH") else {
            return;
        };
        let expected = expected.to_string_lossy().into_owned();

        assert_eq!(EnvResolver::new(true).resolve("PATH"), Some(expected.clone()));
        assert_eq!(EnvResolver::default().resolve("PATH"), Some(expected));
    }
}
