//! Tracing/logging setup shared by the `tally` binaries.

/// Initialize process-wide tracing, falling back to `default_filter` when
/// `RUST_LOG` is unset or invalid.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
