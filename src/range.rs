//! Range and Set value model
//!
//! A [`Range`] is an arithmetic grid `{min, min+step, ...}` clipped to `max`.
//! A [`Set`] is the union of one field's comma-separated ranges. Both answer
//! the same question: what is the next admissible value at or after a given
//! point, and did reaching it require wrapping into the next cycle?

use crate::error::{CronError, Result};
use serde::Serialize;

/// An arithmetic grid of admissible values for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    min: u32,
    max: u32,
    step: u32,
}

impl Range {
    /// Create a range, rejecting `min > max` and a zero step.
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self> {
        if step == 0 || min > max {
            return Err(CronError::InvalidField(format!("{}-{}/{}", min, max, step)));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Whether `value` lies on this range's grid.
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }

    /// Next grid point at or after `current + carry`.
    ///
    /// Returns `(carry_out, value)`. When the grid is exhausted for this
    /// cycle the value wraps to `min` and `carry_out` is set so the next
    /// coarser field advances.
    pub fn next(&self, current: u32, carry: bool) -> (bool, u32) {
        let target = u64::from(current) + u64::from(carry);
        let min = u64::from(self.min);
        if target <= min {
            return (false, self.min);
        }

        let step = u64::from(self.step);
        let distance = (target - min).div_ceil(step);
        let value = min + step * distance;
        if value > u64::from(self.max) {
            (true, self.min)
        } else {
            // value <= max, so it fits
            (false, value as u32)
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}/{}", self.min, self.max, self.step)
    }
}

/// Ordered, non-empty collection of ranges for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Set {
    ranges: Vec<Range>,
}

impl Set {
    /// Create a set from its ranges in source order.
    pub fn new(ranges: Vec<Range>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(CronError::InvalidField(String::new()));
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Whether any member range admits `value`.
    pub fn contains(&self, value: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    /// Smallest admissible value in a fresh cycle.
    pub fn first(&self) -> u32 {
        self.next(0, false).1
    }

    /// Earliest `(carry, value)` over all member ranges.
    ///
    /// A result without carry lies in the current cycle and so always beats
    /// one with carry, whatever the numbers. Tuple ordering gives exactly
    /// that because `false < true`.
    pub fn next(&self, current: u32, carry: bool) -> (bool, u32) {
        self.ranges
            .iter()
            .map(|r| r.next(current, carry))
            .min()
            // never empty: `Set::new` rejects an empty range list
            .unwrap_or((true, 0))
    }
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}
