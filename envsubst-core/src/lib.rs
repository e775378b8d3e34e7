//! Core evaluation engine for shell-style parameter substitution strings.
//!
//! ```
//! let output = envsubst_core::evaluate("${GREETING:-hello}, ${NAME^}!", |name| match name {
//!     "NAME" => Some(String::from("world")),
//!     _ => None,
//! })?;
//! assert_eq!(output, "hello, World!");
//! # Ok::<(), envsubst_core::Error>(())
//! ```

mod env;
mod error;
mod eval;
mod funcs;
mod patterns;
mod regex;

pub mod trace_categories;

pub use env::EnvResolver;
pub use error::Error;
pub use eval::{AdvancedMapping, Mapped, NodeInfo, Template, VariableResolver};
pub use patterns::Pattern;

pub use envsubst_parser::ast;
pub use envsubst_parser::{ParseError, ParserOptions};

/// Parses the given string into a reusable template.
///
/// # Arguments
///
/// * `input` - The string to parse.
pub fn parse(input: &str) -> Result<Template, Error> {
    Template::parse(input)
}

/// Evaluates all substitutions in the given string.
///
/// # Arguments
///
/// * `input` - The string to evaluate.
/// * `resolve` - Resolves variable names to values; `None` means unset.
pub fn evaluate<F>(input: &str, mut resolve: F) -> Result<String, Error>
where
    F: FnMut(&str) -> Option<String>,
{
    Template::parse(input)?.execute(&mut resolve)
}

/// Evaluates all substitutions in the given string against the process environment.
///
/// # Arguments
///
/// * `input` - The string to evaluate.
/// * `strict` - Whether unset variables are treated as unset rather than empty.
pub fn evaluate_env(input: &str, strict: bool) -> Result<String, Error> {
    Template::parse(input)?.execute(&mut EnvResolver::new(strict))
}

/// Evaluates all substitutions in the given string, consulting `mapping` before
/// each one.
///
/// # Arguments
///
/// * `input` - The string to evaluate.
/// * `mapping` - Decides how each substitution is handled.
pub fn evaluate_advanced<F>(input: &str, mut mapping: F) -> Result<String, Error>
where
    F: FnMut(&str, &NodeInfo<'_>) -> Mapped,
{
    Template::parse(input)?.execute_advanced(&mut mapping)
}
