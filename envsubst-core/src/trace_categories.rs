//! Trace utilities

/// Trace category for substitution evaluation.
pub const EXPANSION: &str = "expansion";
/// Trace category for parsing.
pub const PARSE: &str = "parse";
/// Trace category for shell patterns.
pub const PATTERN: &str = "pattern";
