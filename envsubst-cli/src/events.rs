use std::{collections::HashSet, fmt::Display};

use envsubst_core::trace_categories;
use tracing_subscriber::{
    Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Type of event to trace.
#[derive(Clone, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum TraceEvent {
    /// Traces substitution evaluation.
    #[clap(name = "expand")]
    Expand,
    /// Traces the process of parsing input into a substitution tree.
    #[clap(name = "parse")]
    Parse,
    /// Traces pattern matching.
    #[clap(name = "pattern")]
    Pattern,
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand => write!(f, "expand"),
            Self::Parse => write!(f, "parse"),
            Self::Pattern => write!(f, "pattern"),
        }
    }
}

#[derive(Default)]
pub(crate) struct TraceEventConfig {
    enabled_trace_events: HashSet<TraceEvent>,
}

impl TraceEventConfig {
    /// Installs a global subscriber writing to stderr. Failure to install one is
    /// reported but not fatal.
    pub fn init(enabled_debug_events: &[TraceEvent]) -> Self {
        let config = Self {
            enabled_trace_events: enabled_debug_events.iter().cloned().collect(),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(config.compose_filter());

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // Something went wrong; proceed on anyway but complain audibly.
            eprintln!("warning: failed to initialize tracing.");
        }

        config
    }

    fn compose_filter(&self) -> Targets {
        let mut filter =
            Targets::new().with_default(tracing_subscriber::filter::LevelFilter::INFO);

        for event in &self.enabled_trace_events {
            let targets = match event {
                TraceEvent::Expand => vec![trace_categories::EXPANSION],
                TraceEvent::Parse => vec![trace_categories::PARSE],
                TraceEvent::Pattern => vec![trace_categories::PATTERN],
            };

            filter = filter.with_targets(
                targets
                    .into_iter()
                    .map(|target| (target, tracing::Level::DEBUG)),
            );
        }

        filter
    }

    pub fn enabled_events(&self) -> &HashSet<TraceEvent> {
        &self.enabled_trace_events
    }
}
