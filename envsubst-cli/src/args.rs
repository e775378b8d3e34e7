use clap::{Parser, builder::styling};
use std::path::PathBuf;

use crate::{events, productinfo};

const SHORT_DESCRIPTION: &str = "Substitutes environment variables in shell-style strings";

const LONG_DESCRIPTION: &str = r"
envsubst reads standard input one line at a time, expands every ${var} and $var
reference in it against the process environment, and writes the result to standard
output.

The bash parameter expansion operators are supported, including defaults (${v:-x}),
substrings (${v:1:3}), pattern trimming (${v#*.}), replacement (${v/a/b}) and case
conversion (${v^^}). A literal dollar sign is written as $$.
";

const VERSION: &str = const_format::concatcp!(
    productinfo::PRODUCT_VERSION,
    " (",
    productinfo::PRODUCT_DISPLAY_URI,
    ")"
);

/// Parsed command-line arguments for envsubst.
#[derive(Parser)]
#[clap(name = productinfo::PRODUCT_NAME,
       version = VERSION,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       author,
       styles = envsubst_help_styles())]
#[allow(clippy::module_name_repetitions)]
pub struct CommandLineArgs {
    /// Treat unset variables as unset rather than empty, so default operators apply.
    #[clap(long = "strict", env = "ENVSUBST_STRICT")]
    pub strict: bool,

    /// Path to configuration file (default: `~/.config/envsubst/config.toml`).
    #[clap(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Don't load any configuration file.
    #[clap(long = "no-config", conflicts_with = "config_file")]
    pub no_config: bool,

    /// Enable debug logging for classes of tracing events.
    #[clap(long = "debug", alias = "log-enable", value_name = "EVENT")]
    pub enabled_debug_events: Vec<events::TraceEvent>,
}

/// Returns clap styling to be used for command-line help.
#[doc(hidden)]
fn envsubst_help_styles() -> clap::builder::Styles {
    styling::Styles::styled()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::UNDERLINE,
        )
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}
