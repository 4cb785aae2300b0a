//! Process-wide logging setup.

/// Initialize tracing with the default `info` filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Initialize tracing, falling back to `default_directive` when `RUST_LOG` is unset.
pub fn init_with(default_directive: &str) {
    tracing::init(default_directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
