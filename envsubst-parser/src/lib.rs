//! Implements a scanner and recursive-descent parser for shell-style parameter
//! substitution strings (`${var}`, `${var:-default}`, `${var#pattern}`, `$var`, ...).
//!
//! Parsing produces an immutable [`ast::Tree`] that can be evaluated repeatedly
//! by `envsubst-core`.

pub mod ast;
pub mod pattern;

mod error;
mod format;
mod parser;
mod scanner;

pub use error::{ParseError, PatternError};
pub use format::format_node;
pub use parser::{DEFAULT_MAX_NESTING_DEPTH, Parser, ParserOptions, parse, parse_with_options};
