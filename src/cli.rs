//! Command-line front end: read a crontab, print when each job runs next.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;

use crate::crontab::Crontab;

/// Reads through a crontab and prints out each job and when it will run
#[derive(Debug, Parser)]
#[command(name = "a3s-crontab", version, about)]
pub struct Cli {
    /// The location of the crontab to parse (`-` reads stdin)
    #[arg(env = "A3S_CRONTAB")]
    pub crontab: PathBuf,

    /// Fake that the program is being run on this date (mm/dd/yyyy)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Fake that the program is being run at this time (hr:min)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// Print one JSON object per job instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The moment next runs are computed from: `--date`/`--time` where
    /// given, the local clock otherwise.
    pub fn reference_time(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        NaiveDateTime::new(
            self.date.unwrap_or(now.date()),
            self.time.unwrap_or(now.time()),
        )
    }
}

/// Parse a date of the form `mm/dd/yyyy`.
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    let err = || format!("date should be of the form mm/dd/yyyy: was {}", text);

    let parts = text
        .split('/')
        .map(|p| p.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| err())?;
    let &[month, day, year] = parts.as_slice() else {
        return Err(err());
    };

    let (Ok(year), Ok(month), Ok(day)) = (
        i32::try_from(year),
        u32::try_from(month),
        u32::try_from(day),
    ) else {
        return Err(err());
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

/// Parse a time of the form `hr:min`.
pub fn parse_time(text: &str) -> Result<NaiveTime, String> {
    let err = || format!("time should be of the form hr:min: was {}", text);

    let parts = text
        .split(':')
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| err())?;
    let &[hour, minute] = parts.as_slice() else {
        return Err(err());
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}

/// Execute the CLI: load the crontab and report every job's next run.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let crontab = load(&cli.crontab)?;
    let now = cli.reference_time();
    tracing::debug!(%now, jobs = crontab.jobs().len(), "Computing next runs");

    let stdout = io::stdout();
    let stderr = io::stderr();
    let all_scheduled = report(
        &crontab,
        now,
        cli.json,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    Ok(if all_scheduled {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load(path: &Path) -> anyhow::Result<Crontab> {
    if path == Path::new("-") {
        return Crontab::from_reader(io::stdin().lock())
            .context("Failed to parse crontab from stdin");
    }
    Crontab::load(path)
        .with_context(|| format!("Failed to parse crontab {}", path.display()))
}

/// Write each job's next run to `out`, in crontab order.
///
/// Unschedulable jobs are reported to `err` and do not stop the others.
/// Returns `false` if any job was unschedulable.
pub fn report<W: Write, E: Write>(
    crontab: &Crontab,
    now: NaiveDateTime,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<bool> {
    let mut all_scheduled = true;

    for (job, next) in crontab.next_runs(now) {
        match next {
            Ok(next) if json => writeln!(out, "{}", serde_json::to_string(&next)?)?,
            Ok(next) => writeln!(
                out,
                "{}: {}",
                next.next_run.format("%Y-%m-%d %H:%M:%S"),
                next.command
            )?,
            Err(e) => {
                all_scheduled = false;
                writeln!(err, "error: {}: {}", job.command, e)?;
            }
        }
    }

    Ok(all_scheduled)
}
