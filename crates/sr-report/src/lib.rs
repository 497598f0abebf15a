//! `sr-report` — CSV export of billboard exposure statistics.
//!
//! Writes one file, `billboard_exposure.csv`, with a row per billboard per
//! snapshot call:
//!
//! ```text
//! elapsed_secs, billboard, view_rate, window_last, window_mean, unique_viewers
//! ```
//!
//! The columns mirror the read-only reporting surface of the world: the
//! decayed tick-level view rate, the most recent and mean per-second
//! unique-viewer counts from the bounded history, and the lifetime unique
//! total.  Enough for downstream analysis without touching internal sets.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use thiserror::Error;

use sr_exposure::Billboard;

#[cfg(test)]
mod tests;

/// Errors produced while writing the exposure report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Writes exposure snapshots to `billboard_exposure.csv` in a directory.
pub struct ExposureCsvWriter {
    writer: Writer<File>,
    finished: bool,
}

impl ExposureCsvWriter {
    /// Open (or create) the report file in `dir` and write the header row.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut writer = Writer::from_path(dir.join("billboard_exposure.csv"))?;
        writer.write_record([
            "elapsed_secs",
            "billboard",
            "view_rate",
            "window_last",
            "window_mean",
            "unique_viewers",
        ])?;
        Ok(Self { writer, finished: false })
    }

    /// Append one row per billboard for the current simulation state.
    pub fn write_snapshot(
        &mut self,
        elapsed_secs: f64,
        billboards: &[Billboard],
    ) -> ReportResult<()> {
        for bb in billboards {
            let last = bb.window_history().last().unwrap_or(0);
            let mean = if bb.window_history_len() == 0 {
                0.0
            } else {
                bb.window_history().sum::<usize>() as f64 / bb.window_history_len() as f64
            };
            self.writer.write_record(&[
                format!("{elapsed_secs:.3}"),
                bb.label().to_owned(),
                format!("{:.4}", bb.view_rate()),
                last.to_string(),
                format!("{mean:.2}"),
                bb.lifetime_unique().to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush the underlying file.  Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
