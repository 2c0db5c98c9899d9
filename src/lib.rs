//! # a3s-crontab
//!
//! Crontab parsing and next-run computation for the A3S ecosystem.
//!
//! ## Overview
//!
//! `a3s-crontab` reads classic 5-field crontab lines and computes, for each
//! job, the exact next minute at which it fires. Carries propagate from
//! minute up to year, day-of-month and day-of-week combine with cron's OR
//! rule, and non-existent dates (February 30th, February 29th outside leap
//! years) are skipped.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_crontab::{CronJob, Crontab};
//! use chrono::NaiveDate;
//!
//! # fn example() -> a3s_crontab::Result<()> {
//! let now = NaiveDate::from_ymd_opt(2014, 11, 15)
//!     .unwrap()
//!     .and_hms_opt(17, 4, 49)
//!     .unwrap();
//!
//! // A single job line
//! let job = CronJob::parse("* * 1 * * true")?;
//! assert_eq!(job.next_run(now)?.to_string(), "2014-12-01 00:00:00");
//!
//! // A whole crontab, comments and assignments skipped
//! let crontab = Crontab::parse("# nightly\nMAILTO=root\n0 2 * * * backup.sh\n")?;
//! for (_, next) in crontab.next_runs(now) {
//!     let next = next?;
//!     println!("{}: {}", next.next_run, next.command);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **bounds**: the five fields and their inclusive value ranges
//! - **range**: `Range`/`Set` and the carry-aware "next value" step
//! - **parser**: field, expression and job-line grammar
//! - **occurrence**: the next-run engine over five sets
//! - **crontab**: file filtering and per-job next runs

pub mod bounds;
pub mod cli;
pub mod crontab;
pub mod error;
pub mod occurrence;
pub mod parser;
pub mod range;
pub mod types;

pub use bounds::{Bounds, Field};
pub use crontab::Crontab;
pub use error::{CronError, Result};
pub use parser::{parse_expression, parse_job, parse_range, parse_set};
pub use range::{Range, Set};
pub use types::{CronExpression, CronJob, NextRun};
