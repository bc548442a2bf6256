#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` controls how much the ACL crates report. The library crates emit
//! `tracing` events on six targets, `nfs4acl::acl`, `nfs4acl::inherit`,
//! `nfs4acl::xdr`, `nfs4acl::text`, `nfs4acl::json` and `nfs4acl::store`;
//! this crate names those categories ([`DebugFlag`]), holds a level for each
//! ([`DebugLevels`]), and turns a [`VerbosityConfig`] into subscriber
//! filtering.
//!
//! # Design
//!
//! - [`VerbosityConfig::from_verbose_level`] maps a `-v` count onto flag
//!   levels; [`VerbosityConfig::apply_debug_flag`] refines single flags with
//!   `NAME[N]` tokens such as `xdr2`, plus `all[N]` and `none`.
//! - [`VerbosityConfig::filter_directives`] renders the levels as
//!   `tracing_subscriber::EnvFilter` directives, so the same configuration
//!   drives the stock `fmt` subscriber installed by `init_tracing`.
//! - With the `tracing` feature, `CaptureLayer` records admitted events into
//!   a thread-local buffer read back with `drain_events`.
//!
//! # Invariants
//!
//! - A flag at level 0 admits nothing; level `N` admits events whose
//!   verbosity (1 info, 2 debug, 3 trace) is at most `N`.
//! - Directive order follows [`DebugFlag::ALL`], so rendering is
//!   deterministic.
//!
//! # Errors
//!
//! Token parsing reports `String` messages naming the offending token.
//! `init_tracing` fails only when a global subscriber already exists.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flag("xdr3").unwrap();
//! assert_eq!(
//!     config.filter_directives(),
//!     "nfs4acl::xdr=trace,nfs4acl::store=debug"
//! );
//! ```
//!
//! # See also
//!
//! - `acl::debug_acl`, `codec::debug_codec` and `metadata::debug_store` for
//!   the events themselves.

mod config;
mod levels;
#[cfg(feature = "tracing")]
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels};

#[cfg(feature = "tracing")]
pub use thread_local::{DiagnosticEvent, drain_events};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    CaptureLayer, init_tracing, level_to_verbosity_level, target_to_debug_flag,
};
