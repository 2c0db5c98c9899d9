//! Crontab files
//!
//! Only job lines matter here. Blank lines, `#` comments and environment
//! assignments (`NAME = value`) are skipped; every other line must be a job.

use crate::error::Result;
use crate::types::{CronJob, NextRun};
use chrono::NaiveDateTime;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w+\s*=").expect("valid assignment regex"))
}

/// Whether a (trimmed) crontab line carries no job.
pub fn is_ignored_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || assignment_pattern().is_match(line)
}

/// Ordered list of parsed jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crontab {
    jobs: Vec<CronJob>,
}

impl Crontab {
    /// Parse crontab text. The first bad line aborts the whole parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use a3s_crontab::Crontab;
    ///
    /// let crontab = Crontab::parse("# nightly\nSHELL=/bin/sh\n0 2 * * * backup.sh\n").unwrap();
    /// assert_eq!(crontab.jobs().len(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse a crontab from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut jobs = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let lineno = index + 1;
            let line = line?;
            let line = line.trim();
            if is_ignored_line(line) {
                tracing::debug!(lineno, "Skipping non-job line");
                continue;
            }
            let job = CronJob::parse(line).map_err(|e| e.at_line(lineno))?;
            jobs.push(job);
        }

        tracing::debug!(jobs = jobs.len(), "Parsed crontab");
        Ok(Self { jobs })
    }

    /// Read and parse a crontab file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn jobs(&self) -> &[CronJob] {
        &self.jobs
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Each job's next run after `now`, lazily and in input order.
    ///
    /// An unschedulable job yields an error for its own item only.
    pub fn next_runs(
        &self,
        now: NaiveDateTime,
    ) -> impl Iterator<Item = (&CronJob, Result<NextRun>)> + '_ {
        self.jobs.iter().map(move |job| {
            let next = job.next_run(now).map(|next_run| NextRun {
                command: job.command.clone(),
                next_run,
            });
            (job, next)
        })
    }
}

impl From<Vec<CronJob>> for Crontab {
    fn from(jobs: Vec<CronJob>) -> Self {
        Self { jobs }
    }
}
