//! Field bounds for the five cron time fields
//!
//! ```text
//! ┌───────────── minute (0-59)
//! │ ┌───────────── hour (0-23)
//! │ │ ┌───────────── day of month (1-31)
//! │ │ │ ┌───────────── month (1-12)
//! │ │ │ │ ┌───────────── day of week (1-7, 1=Monday, 7=Sunday)
//! │ │ │ │ │
//! * * * * *
//! ```

use serde::{Deserialize, Serialize};

/// Inclusive numeric range a field's values must fall in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// One of the five cron time fields, in line order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl Field {
    /// All fields in the order they appear on a job line
    pub const ALL: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    pub const fn bounds(self) -> Bounds {
        match self {
            Field::Minute => Bounds::new(0, 59),
            Field::Hour => Bounds::new(0, 23),
            Field::DayOfMonth => Bounds::new(1, 31),
            Field::Month => Bounds::new(1, 12),
            Field::DayOfWeek => Bounds::new(1, 7),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Minute => write!(f, "minute"),
            Field::Hour => write!(f, "hour"),
            Field::DayOfMonth => write!(f, "day-of-month"),
            Field::Month => write!(f, "month"),
            Field::DayOfWeek => write!(f, "day-of-week"),
        }
    }
}
