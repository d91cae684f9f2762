//! Action and timing side logs for catalog operations.
//!
//! Callers wrap an operation in [`Journal::track`]; the journal appends
//! the outcome to the actions log and the elapsed time to the timings log.
//! Writing the logs never changes the wrapped result.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Journal {
    paths: Option<(PathBuf, PathBuf)>,
}

impl Journal {
    pub fn new(actions: impl Into<PathBuf>, timings: impl Into<PathBuf>) -> Self {
        Self {
            paths: Some((actions.into(), timings.into())),
        }
    }

    /// A journal that records nothing.
    pub fn disabled() -> Self {
        Self { paths: None }
    }

    pub fn actions_path(&self) -> Option<&Path> {
        self.paths.as_ref().map(|(a, _)| a.as_path())
    }

    pub fn timings_path(&self) -> Option<&Path> {
        self.paths.as_ref().map(|(_, t)| t.as_path())
    }

    /// Run `f`, then record `op` with its `args` and outcome.
    pub fn track<T, E: Display>(
        &self,
        op: &str,
        args: &str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let started = Instant::now();
        let result = f();
        let elapsed = started.elapsed();

        if let Some((actions, timings)) = &self.paths {
            let outcome = match &result {
                Ok(_) => "OK".to_string(),
                Err(e) => format!("ERROR: {e}"),
            };
            append(actions, &action_line(op, args, &outcome));
            append(timings, &timing_line(op, elapsed));
        }

        result
    }
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn action_line(op: &str, args: &str, outcome: &str) -> String {
    format!("[{}] {op} {args} -> {outcome}", now())
}

fn timing_line(op: &str, elapsed: Duration) -> String {
    format!("{} {op}: {:.2} ms", now(), elapsed.as_secs_f64() * 1000.0)
}

fn append(path: &Path, line: &str) {
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| writeln!(f, "{line}"));
    if let Err(e) = written {
        log::warn!("could not write journal {}: {e}", path.display());
    }
}
