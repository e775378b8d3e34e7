//! Implements the command-line interface for `envsubst`.

mod args;
mod config;
mod entry;
mod error;
mod error_formatter;
mod events;
mod productinfo;

/// Main entry point for `envsubst`.
fn main() {
    entry::run();
}
