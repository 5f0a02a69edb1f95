//! Telemetry initialization and per-file span helpers.

use std::{path::Path, time::Instant};

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one file's processing.
pub struct FileSpan {
    span: Span,
    started_at: Instant,
    run_id: Uuid,
}

impl FileSpan {
    /// Open a span for `path`.
    pub fn start(path: &Path) -> Self {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            target: "comment_translator::pipeline",
            "translate_file",
            %run_id,
            path = %path.display()
        );
        Self {
            span,
            started_at: Instant::now(),
            run_id,
        }
    }

    /// Span to enter while the file is processed.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span, recording status and counters.
    pub fn finish(self, status: &'static str, comments: usize, characters: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "comment_translator::pipeline",
            run_id = %self.run_id,
            status,
            comments,
            characters,
            elapsed_ms,
            "Finished file"
        );
    }
}
