//! Support code shared by the packaging tools.

/// Configuration sections reused across binaries.
#[cfg(feature = "logging")]
pub mod config;

/// Content digests.
pub mod hash;

/// Tracing subscriber setup.
#[cfg(feature = "logging")]
pub mod logging;
