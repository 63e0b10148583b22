//! Chrome trace output for `--profile <path>`.
//!
//! Catalog loading, suggestion, and menu filtering carry `tracing` spans; the
//! trace can be opened in `chrome://tracing` or https://ui.perfetto.dev/

use std::path::PathBuf;

use tracing_subscriber::prelude::*;

/// Keeps the trace file open. The trace is flushed when this is dropped.
pub struct TraceGuard {
    _flush: tracing_chrome::FlushGuard,
}

/// Start tracing to `output`, or do nothing when no path was given.
pub fn start(output: Option<PathBuf>) -> Option<TraceGuard> {
    let output = output?;

    let (layer, flush) = tracing_chrome::ChromeLayerBuilder::new()
        .file(output)
        .include_args(true)
        .build();

    // A subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::registry().with(layer).try_init();

    Some(TraceGuard { _flush: flush })
}
