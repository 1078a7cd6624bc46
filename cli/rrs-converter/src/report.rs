// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! End-of-run reporting
//!
//! Failed copies go to `<bucket>-error.log` in the working directory, one
//! line per object:
//!
//! ```text
//! 2026-10-16T09:12:44Z WARNING: failed to convert broken.bin: service error: ...
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use tracing::{error, info, warn};

use class_migration::{MigrationSummary, OutcomeSet};

pub fn error_log_path(dir: &Path, bucket: &str) -> PathBuf {
    dir.join(format!("{bucket}-error.log"))
}

/// Write one line per failure. Returns the number of lines written.
pub fn write_error_log(path: &Path, failures: &OutcomeSet) -> io::Result<usize> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut written = 0;
    for (key, err) in failures {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        writeln!(out, "{timestamp} WARNING: failed to convert {key}: {err}")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

pub fn summary_line(summary: &MigrationSummary) -> String {
    format!(
        "{} listed, {} already at target, {} converted, {} failed",
        summary.listed,
        summary.skipped,
        summary.succeeded(),
        summary.failures.len()
    )
}

pub fn failure_notice(log: &Path) -> String {
    format!(
        "Conversion finished with errors. Check {} for details",
        log.display()
    )
}

/// Report a completed run and pick the exit code.
///
/// Any failure is written to `<bucket>-error.log` under `dir`. If the log
/// cannot be written the failures go to stderr instead; the exit is non-zero
/// either way.
pub fn finish(summary: &MigrationSummary, bucket: &str, dir: &Path) -> ExitCode {
    info!("{}", summary_line(summary));

    if summary.is_success() {
        return ExitCode::SUCCESS;
    }

    let log = error_log_path(dir, bucket);
    match write_error_log(&log, &summary.failures) {
        Ok(written) => {
            warn!(failures = written, log = %log.display(), "Wrote error log");
            println!("{}", failure_notice(&log));
        }
        Err(e) => {
            error!(log = %log.display(), error = %e, "Failed to write error log");
            for (key, err) in &summary.failures {
                eprintln!("failed to convert {}: {}", key, err);
            }
        }
    }
    ExitCode::FAILURE
}

/// `1h 02m 03.450s`, dropping leading zero units.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let millis = elapsed.subsec_millis();

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}.{millis:03}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}.{millis:03}s")
    } else {
        format!("{seconds}.{millis:03}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use class_migration::{CopyError, OutcomeAggregator};
    use pretty_assertions::assert_eq;

    async fn failures(entries: &[(&str, &str)]) -> OutcomeSet {
        let aggregator = OutcomeAggregator::new();
        for (key, message) in entries {
            aggregator
                .record(key, CopyError::service(*message))
                .await;
        }
        aggregator.into_outcome()
    }

    #[tokio::test]
    async fn test_error_log_single_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = error_log_path(dir.path(), "photos");
        assert!(path.ends_with("photos-error.log"));

        let set = failures(&[("broken.bin", "InvalidObjectState: archived")]).await;
        let written = write_error_log(&path, &set).unwrap();
        assert_eq!(written, 1);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let (timestamp, rest) = lines[0].split_once(' ').unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(
            rest,
            "WARNING: failed to convert broken.bin: service error: InvalidObjectState: archived"
        );
    }

    #[tokio::test]
    async fn test_error_log_lines_sorted_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = error_log_path(dir.path(), "b");

        let set = failures(&[("z/2", "SlowDown: x"), ("a/1", "SlowDown: y")]).await;
        write_error_log(&path, &set).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let keys: Vec<_> = contents
            .lines()
            .map(|l| l.split("failed to convert ").nth(1).unwrap())
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["a/1", "z/2"]);
    }

    #[test]
    fn test_failure_notice() {
        assert_eq!(
            failure_notice(Path::new("photos-error.log")),
            "Conversion finished with errors. Check photos-error.log for details"
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(2_050)), "2.050s");
        assert_eq!(format_elapsed(Duration::from_millis(61_500)), "1m 01.500s");
        assert_eq!(format_elapsed(Duration::from_secs(3_723)), "1h 02m 03.000s");
    }
}
