// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_test_writer()
            .try_init();
    });
}

pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}
