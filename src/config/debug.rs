//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so
//! debug builds stay readable. All of them are further gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit detailed serialization/deserialization logs.
    pub print_serde: bool,
    /// Emit one line per Binance page while downloading.
    pub print_fetch_progress: bool,
    /// Emit every applied delay.
    pub print_latency_draws: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_serde: false,
    print_fetch_progress: true,
    print_latency_draws: false,
};
