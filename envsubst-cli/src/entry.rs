//! Implements the command-line interface for `envsubst`.

use std::io::{BufRead, IsTerminal, Write};

use clap::Parser;
use envsubst_core::{EnvResolver, Template, VariableResolver};

use crate::args::CommandLineArgs;
use crate::config::{self, Settings};
use crate::error::Error;
use crate::{error_formatter, events, productinfo};

/// Main entry point for `envsubst`.
pub fn run() {
    //
    // Install panic handlers to report panics in a friendly way.
    //
    install_panic_handlers();

    //
    // Parse args.
    //
    let parsed_args = match CommandLineArgs::try_parse_from(std::env::args_os()) {
        Ok(parsed_args) => parsed_args,
        Err(e) => {
            let _ = e.print();

            // clap returns errors for `--help`, `--version`, etc.
            let exit_code = match e.kind() {
                clap::error::ErrorKind::DisplayVersion => 0,
                clap::error::ErrorKind::DisplayHelp => 0,
                _ => 1,
            };

            std::process::exit(exit_code);
        }
    };

    let event_config = events::TraceEventConfig::init(&parsed_args.enabled_debug_events);
    if !event_config.enabled_events().is_empty() {
        tracing::debug!("enabled trace events: {:?}", event_config.enabled_events());
    }

    //
    // Run.
    //
    let exit_code = match run_impl(&parsed_args) {
        Ok(()) => 0,
        Err(err) => {
            let formatter = error_formatter::Formatter {
                use_color: std::io::stderr().is_terminal(),
            };
            eprint!("{}", formatter.format_error(&err));
            1
        }
    };

    std::process::exit(exit_code);
}

/// Installs panic handlers to report our panic and cleanly exit on panic.
fn install_panic_handlers() {
    //
    // On release builds, this captures panic details to a temporary .toml file and
    // reports a human-readable message to the screen.
    //
    human_panic::setup_panic!(
        human_panic::Metadata::new(productinfo::PRODUCT_NAME, productinfo::PRODUCT_VERSION)
            .homepage(productinfo::PRODUCT_DISPLAY_URI)
    );
}

fn run_impl(args: &CommandLineArgs) -> Result<(), Error> {
    let settings = load_settings(args)?;
    tracing::debug!("effective settings: {settings:?}");

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    substitute_lines(stdin, &mut stdout, &mut EnvResolver::new(settings.strict))
}

/// Merges the configuration file (if any) with the command-line arguments. A broken
/// default configuration file is reported and skipped; a broken explicitly requested
/// one is fatal.
fn load_settings(args: &CommandLineArgs) -> Result<Settings, Error> {
    let result = config::load_config(args.no_config, args.config_file.as_deref());

    if let Some(err) = result.error {
        let path = result
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        if result.explicit_path {
            return Err(Error::Config { path, source: err });
        }

        tracing::warn!("{path}: {err}; using default configuration");
    }

    Ok(result.config.to_settings(args))
}

/// Expands each line of `input` and writes it to `output`, one line at a time.
/// Stops at the first line that fails to expand.
fn substitute_lines(
    input: impl BufRead,
    output: &mut impl Write,
    resolver: &mut impl VariableResolver,
) -> Result<(), Error> {
    for line in input.lines() {
        let line = line?;
        let expanded = Template::parse(&line)?.execute(resolver)?;

        writeln!(output, "{expanded}")?;
        output.flush()?;
    }

    Ok(())
}
