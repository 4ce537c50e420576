//! Logging bootstrap shared by fairdiv binaries.

/// Initialize `env_logger` from `FAIRDIV_LOG`, defaulting to `info`.
///
/// Safe to call more than once per process; subsequent calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or("FAIRDIV_LOG", "info"))
        .format_timestamp_millis()
        .try_init();
}
