//! crates/logging/src/tracing_bridge.rs
//! Subscriber setup for the `nfs4acl::*` targets.
//!
//! Two pieces live here:
//!
//! - [`init_tracing`] installs a global subscriber that writes events to
//!   stderr through `tracing_subscriber::fmt`, filtered by the
//!   [`EnvFilter`] directives derived from a [`VerbosityConfig`].
//! - [`CaptureLayer`] records matching events into a thread-local buffer
//!   drained with [`crate::drain_events`], which tests and embedders use to
//!   inspect what the library reported.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(&config)?;
//!
//! tracing::debug!(target: "nfs4acl::xdr", len = 28, "xdr_decoded");
//! ```

use super::config::VerbosityConfig;
use super::levels::DebugFlag;
use super::thread_local::{DiagnosticEvent, emit};
use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

/// A tracing layer that records `nfs4acl::*` events admitted by a
/// [`VerbosityConfig`].
#[derive(Clone, Debug)]
pub struct CaptureLayer {
    config: VerbosityConfig,
}

impl CaptureLayer {
    /// Create a layer filtering with the given configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { config }
    }

    /// Returns true if an event with this target and level would be recorded.
    #[must_use]
    pub fn admits(&self, target: &str, level: &Level) -> bool {
        target_to_debug_flag(target)
            .is_some_and(|flag| self.config.debug.get(flag) >= level_to_verbosity_level(level))
    }
}

/// Map a tracing target to a debug flag.
///
/// Only the exact `nfs4acl::<flag>` targets from [`DebugFlag::target`] map;
/// `other_crate::acl` or a bare `xdr` belong to nobody.
#[must_use]
pub fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
    DebugFlag::ALL
        .into_iter()
        .find(|flag| flag.target() == target)
}

/// Map a tracing level to a verbosity level.
#[must_use]
pub const fn level_to_verbosity_level(level: &Level) -> u8 {
    match *level {
        Level::ERROR | Level::WARN | Level::INFO => 1,
        Level::DEBUG => 2,
        Level::TRACE => 3,
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(flag) = target_to_debug_flag(metadata.target()) else {
            return;
        };
        let level = level_to_verbosity_level(metadata.level());
        if self.config.debug.get(flag) < level {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        emit(DiagnosticEvent {
            flag,
            level,
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

/// Visitor collecting the message and the remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn push(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_owned(), value));
        }
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field, value.to_owned());
    }
}

impl VerbosityConfig {
    /// Build the [`EnvFilter`] matching [`Self::filter_directives`].
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.filter_directives())
    }
}

/// Install the global subscriber writing admitted events to stderr.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &VerbosityConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
