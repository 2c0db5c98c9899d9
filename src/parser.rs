//! Cron field parser
//!
//! Supports the classic 5-field job line:
//! ```text
//! ┌───────────── minute (0-59)
//! │ ┌───────────── hour (0-23)
//! │ │ ┌───────────── day of month (1-31)
//! │ │ │ ┌───────────── month (1-12)
//! │ │ │ │ ┌───────────── day of week (1-7, 7=Sunday)
//! │ │ │ │ │
//! * * * * * command to run
//! ```
//!
//! Special characters:
//! - `*` - the whole field, same as `min-max`
//! - `,` - range list separator (e.g., `1,3,5`)
//! - `-` - range (e.g., `1-5`)
//! - `/` - step (e.g., `*/5` or `0-30/5`)

use crate::bounds::{Bounds, Field};
use crate::error::{CronError, Result};
use crate::range::{Range, Set};
use crate::types::{CronExpression, CronJob};

/// Parse one comma-separated element, e.g. `1-4/3`, `*/5` or `17`.
///
/// # Examples
///
/// ```
/// use a3s_crontab::{parse_range, Field};
///
/// let r = parse_range("*/5", Field::Minute.bounds()).unwrap();
/// assert_eq!(r.to_string(), "0-59/5");
///
/// let r = parse_range("4", Field::Minute.bounds()).unwrap();
/// assert_eq!(r.to_string(), "4-4/1");
/// ```
pub fn parse_range(text: &str, bounds: Bounds) -> Result<Range> {
    let invalid = || CronError::InvalidField(text.to_string());

    let (base, step) = match text.split_once('/') {
        Some((base, step_str)) => {
            let step: u32 = step_str.parse().map_err(|_| invalid())?;
            if step == 0 {
                return Err(invalid());
            }
            (base, step)
        }
        None => (text, 1),
    };

    let (min, max) = if base == "*" {
        (bounds.min, bounds.max)
    } else if let Some((lo, hi)) = base.split_once('-') {
        let lo: u32 = lo.parse().map_err(|_| invalid())?;
        let hi: u32 = hi.parse().map_err(|_| invalid())?;
        (lo, hi)
    } else {
        let value: u32 = base.parse().map_err(|_| invalid())?;
        (value, value)
    };

    if min > max || !bounds.contains(min) || !bounds.contains(max) {
        return Err(invalid());
    }

    Range::new(min, max, step).map_err(|_| invalid())
}

/// Parse a whole field, e.g. `1-5/4,34-57,59,*/30`.
pub fn parse_set(text: &str, bounds: Bounds) -> Result<Set> {
    let ranges = text
        .split(',')
        .map(|element| parse_range(element, bounds))
        .collect::<Result<Vec<_>>>()?;
    Set::new(ranges)
}

/// Parse the five time fields of a job line (without the command).
pub fn parse_expression(text: &str) -> Result<CronExpression> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let fields: [&str; 5] = fields
        .try_into()
        .map_err(|_| CronError::InvalidJob(text.to_string()))?;
    expression_from_fields(fields)
}

/// Parse a full job line: five time fields followed by the command.
///
/// The command is everything after the fifth run of whitespace, with its
/// own internal spacing kept verbatim.
///
/// # Examples
///
/// ```
/// use a3s_crontab::parse_job;
///
/// let job = parse_job("*/15 9-17 * * 1-5 echo  tick").unwrap();
/// assert_eq!(job.command, "echo  tick");
/// assert_eq!(job.expression.to_string(), "0-59/15 9-17/1 1-31/1 1-12/1 1-5/1");
/// ```
pub fn parse_job(line: &str) -> Result<CronJob> {
    let invalid = || CronError::InvalidJob(line.to_string());

    let mut fields = [""; 5];
    let mut rest = line.trim_start();
    for slot in fields.iter_mut() {
        let end = rest.find(char::is_whitespace).ok_or_else(invalid)?;
        *slot = &rest[..end];
        rest = rest[end..].trim_start();
    }

    let command = rest.trim_end();
    if command.is_empty() {
        return Err(invalid());
    }

    let expression = expression_from_fields(fields)?;
    tracing::debug!(schedule = %expression, command, "Parsed cron job");

    Ok(CronJob {
        expression,
        command: command.to_string(),
    })
}

fn expression_from_fields(fields: [&str; 5]) -> Result<CronExpression> {
    let [minutes, hours, doms, months, dows] = fields;
    Ok(CronExpression {
        minutes: parse_set(minutes, Field::Minute.bounds())?,
        hours: parse_set(hours, Field::Hour.bounds())?,
        doms: parse_set(doms, Field::DayOfMonth.bounds())?,
        months: parse_set(months, Field::Month.bounds())?,
        dows: parse_set(dows, Field::DayOfWeek.bounds())?,
        dom_specified: doms != "*",
        dow_specified: dows != "*",
    })
}
