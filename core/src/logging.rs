// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Diagnostic logging setup.
//!
//! Filtering follows the `PHRASE_SEARCH_LOG` environment variable using
//! `EnvFilter` directives, e.g. `PHRASE_SEARCH_LOG=debug` or
//! `PHRASE_SEARCH_LOG=warn,phrase_search_core::node=debug`.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV_VAR: &str = "PHRASE_SEARCH_LOG";

/// Install the global subscriber, falling back to `default_level` when the
/// environment variable is unset. Later calls are ignored.
pub fn init_with_default(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}
