//! Next-occurrence engine
//!
//! Carries propagate minute → hour → day → month → year. The day itself is
//! searched along two independent paths, one driven by day-of-month and one
//! by day-of-week, and cron's OR rule picks between them:
//!
//! - both day fields restricted: the earlier of the two paths
//! - only day-of-week restricted: the day-of-week path
//! - otherwise: the day-of-month path

use crate::error::{CronError, Result};
use crate::types::CronExpression;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

/// Upper bound on day-of-month passes that land on a non-existent date.
///
/// Each pass consumes one invalid date and a month holds at most three
/// (29th-31st), so reaching the next February 29th across a skipped
/// century leap year (8 years) needs well under this.
pub const MAX_DATE_ATTEMPTS: usize = 128;

/// Hour and minute picked by the first step, plus whether the hour wrapped
/// into the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clock {
    carry: bool,
    hour: u32,
    minute: u32,
}

/// Calendar position threaded through the day-of-month search. It may hold
/// a date that does not exist (e.g. February 30th) between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    year: i32,
    month: u32,
    day: u32,
}

impl Cursor {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// One day-of-month/month/year pass.
    fn advance(self, expr: &CronExpression, carry: bool) -> Self {
        let (day_carry, day) = expr.doms.next(self.day, carry);
        let (month_carry, month) = expr.months.next(self.month, day_carry);
        let day = if month_carry || month != self.month {
            expr.doms.first()
        } else {
            day
        };

        Self {
            year: self.year + i32::from(month_carry),
            month,
            day,
        }
    }
}

/// Compute the next time strictly after `now` that `expr` fires.
///
/// Seconds in `now` are ignored; the result always has zero seconds.
pub fn next_run(expr: &CronExpression, now: NaiveDateTime) -> Result<NaiveDateTime> {
    find_next(expr, now).inspect_err(|e| {
        tracing::warn!(schedule = %expr, error = %e, "No valid time found for schedule");
    })
}

fn find_next(expr: &CronExpression, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let today = now.date();
    let clock = next_clock(expr, now.hour(), now.minute());

    let date = match (expr.dom_specified, expr.dow_specified) {
        (true, true) => {
            let by_dom = dom_path(expr, today, clock.carry);
            let by_dow = dow_path(expr, today, clock.carry);
            match (by_dom, by_dow) {
                (Ok(a), Ok(b)) => a.min(b),
                (Ok(date), Err(_)) | (Err(_), Ok(date)) => date,
                (Err(e), Err(_)) => return Err(e),
            }
        }
        (false, true) => dow_path(expr, today, clock.carry)?,
        _ => dom_path(expr, today, clock.carry)?,
    };

    let (hour, minute) = if date == today {
        (clock.hour, clock.minute)
    } else {
        (expr.hours.first(), expr.minutes.first())
    };

    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| unschedulable(expr))
}

/// The next hour:minute strictly after the given one.
fn next_clock(expr: &CronExpression, hour: u32, minute: u32) -> Clock {
    let (minute_carry, next_minute) = expr.minutes.next(minute, true);
    let (carry, next_hour) = expr.hours.next(hour, minute_carry);
    let minute = if carry || next_hour != hour {
        expr.minutes.first()
    } else {
        next_minute
    };

    Clock {
        carry,
        hour: next_hour,
        minute,
    }
}

/// First existing date on or after `today` (after it, if `carry`)
/// allowed by day-of-month and month.
fn dom_path(expr: &CronExpression, today: NaiveDate, carry: bool) -> Result<NaiveDate> {
    let mut cursor = Cursor::from_date(today);
    let mut carry = carry;

    for attempt in 0..MAX_DATE_ATTEMPTS {
        cursor = cursor.advance(expr, carry);
        if let Some(date) = cursor.to_date() {
            return Ok(date);
        }
        tracing::trace!(
            attempt,
            year = cursor.year,
            month = cursor.month,
            day = cursor.day,
            "Skipping non-existent date"
        );
        carry = true;
    }

    Err(unschedulable(expr))
}

/// First date on or after `today` (after it, if `carry`) allowed by
/// day-of-week and month.
fn dow_path(expr: &CronExpression, today: NaiveDate, carry: bool) -> Result<NaiveDate> {
    let weekday = today.weekday().number_from_monday();
    let (dow_carry, dow) = expr.dows.next(weekday, carry);
    let candidate = add_days(expr, today, days_until(weekday, dow, dow_carry))?;

    if candidate.year() == today.year()
        && candidate.month() == today.month()
        && expr.months.contains(today.month())
    {
        return Ok(candidate);
    }

    // Realign from the 1st of the next allowed month. A month has at least
    // four weeks, so the realigned day stays inside it.
    let (month_carry, month) = expr.months.next(today.month(), true);
    let first = NaiveDate::from_ymd_opt(today.year() + i32::from(month_carry), month, 1)
        .ok_or_else(|| unschedulable(expr))?;
    let weekday = first.weekday().number_from_monday();
    let (dow_carry, dow) = expr.dows.next(weekday, false);
    add_days(expr, first, days_until(weekday, dow, dow_carry))
}

/// Forward distance in days from one weekday to another, wrapping through a
/// full week when the day-of-week field carried.
fn days_until(current: u32, next: u32, carry: bool) -> u64 {
    let wrapped = u64::from(next) + if carry { 7 } else { 0 };
    wrapped.saturating_sub(u64::from(current))
}

fn add_days(expr: &CronExpression, date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| unschedulable(expr))
}

fn unschedulable(expr: &CronExpression) -> CronError {
    CronError::Unschedulable(expr.to_string())
}
