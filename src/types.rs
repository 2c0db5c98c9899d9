//! Core types for the crontab library

use crate::error::Result;
use crate::range::Set;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// The five parsed time fields of one job line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronExpression {
    /// Allowed minutes (0-59)
    pub minutes: Set,
    /// Allowed hours (0-23)
    pub hours: Set,
    /// Allowed days of month (1-31)
    pub doms: Set,
    /// Allowed months (1-12)
    pub months: Set,
    /// Allowed days of week (1-7, 1=Monday, 7=Sunday)
    pub dows: Set,
    /// Day-of-month field text was something other than `*`
    pub dom_specified: bool,
    /// Day-of-week field text was something other than `*`
    pub dow_specified: bool,
}

impl CronExpression {
    /// Parse the five time fields of a cron line
    ///
    /// # Examples
    ///
    /// ```
    /// use a3s_crontab::CronExpression;
    ///
    /// // Every 5 minutes
    /// let expr = CronExpression::parse("*/5 * * * *").unwrap();
    ///
    /// // Every Wednesday at midnight
    /// let expr = CronExpression::parse("0 0 * * 3").unwrap();
    /// assert!(expr.dow_specified);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        crate::parser::parse_expression(text)
    }

    /// Next time strictly after `now` (truncated to the minute) that this
    /// expression fires.
    pub fn next_after(&self, now: NaiveDateTime) -> Result<NaiveDateTime> {
        crate::occurrence::next_run(self, now)
    }

    /// Check if a timestamp matches this expression (seconds are ignored)
    pub fn matches(&self, dt: &NaiveDateTime) -> bool {
        let dom = self.doms.contains(dt.day());
        let dow = self.dows.contains(dt.weekday().number_from_monday());
        let day = match (self.dom_specified, self.dow_specified) {
            (true, true) => dom || dow,
            (false, true) => dow,
            _ => dom,
        };

        day && self.minutes.contains(dt.minute())
            && self.hours.contains(dt.hour())
            && self.months.contains(dt.month())
    }
}

impl std::fmt::Display for CronExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minutes, self.hours, self.doms, self.months, self.dows
        )
    }
}

/// One parsed crontab entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronJob {
    /// When the job fires
    pub expression: CronExpression,
    /// Command text, internal whitespace kept verbatim
    pub command: String,
}

impl CronJob {
    /// Parse a full job line
    pub fn parse(line: &str) -> Result<Self> {
        crate::parser::parse_job(line)
    }

    /// Next run strictly after `now`
    pub fn next_run(&self, now: NaiveDateTime) -> Result<NaiveDateTime> {
        self.expression.next_after(now)
    }
}

impl std::fmt::Display for CronJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.expression, self.command)
    }
}

/// A job's command paired with when it next runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRun {
    pub command: String,
    pub next_run: NaiveDateTime,
}
