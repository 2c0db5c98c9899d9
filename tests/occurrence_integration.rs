//! Next-run integration tests
//!
//! End-to-end checks of `CronJob::next_run`: the reference scenarios,
//! day-of-month/day-of-week disjunction, leap years, and a randomized
//! comparison against a plain forward scan.

use a3s_crontab::{CronError, CronExpression, CronJob};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn next(line: &str, now: NaiveDateTime) -> NaiveDateTime {
    CronJob::parse(line).unwrap().next_run(now).unwrap()
}

// ─── Reference scenarios ─────────────────────────────────────────

#[test]
fn test_every_minute() {
    assert_eq!(
        next("* * * * * true", at(2014, 11, 15, 17, 4, 49)),
        at(2014, 11, 15, 17, 5, 0)
    );
}

#[test]
fn test_first_of_month() {
    assert_eq!(
        next("* * 1 * * true", at(2014, 11, 15, 17, 4, 49)),
        at(2014, 12, 1, 0, 0, 0)
    );
}

#[test]
fn test_wednesday_same_month() {
    assert_eq!(
        next("* * * * 3 true", at(2014, 11, 15, 17, 4, 49)),
        at(2014, 11, 19, 0, 0, 0)
    );
}

#[test]
fn test_wednesday_next_month() {
    assert_eq!(
        next("* * * * 3 true", at(2014, 11, 29, 17, 4, 49)),
        at(2014, 12, 3, 0, 0, 0)
    );
}

#[test]
fn test_wednesday_in_november_only() {
    assert_eq!(
        next("* * * 11 3 true", at(2014, 11, 29, 17, 4, 49)),
        at(2015, 11, 4, 0, 0, 0)
    );
}

#[test]
fn test_end_of_year_rolls_over() {
    assert_eq!(
        next("* * * * * true", at(2014, 12, 31, 23, 59, 0)),
        at(2015, 1, 1, 0, 0, 0)
    );
}

#[test]
fn test_leap_day_skips_to_next_leap_year() {
    assert_eq!(
        next("* * 29 2 * true", at(2014, 12, 31, 23, 59, 0)),
        at(2016, 2, 29, 0, 0, 0)
    );
}

#[test]
fn test_leap_day_skips_century_year() {
    // 2200 is not a leap year
    assert_eq!(
        next("* * 29 2 * true", at(2196, 2, 29, 23, 59, 0)),
        at(2204, 2, 29, 0, 0, 0)
    );
}

// ─── Behaviour details ───────────────────────────────────────────

#[test]
fn test_result_is_strictly_after_now() {
    let now = at(2014, 11, 15, 17, 5, 0);
    assert_eq!(next("5 17 * * * true", now), at(2014, 11, 16, 17, 5, 0));
}

#[test]
fn test_seconds_are_truncated() {
    let now = at(2014, 11, 15, 17, 4, 59);
    let run = next("*/15 * * * * true", now);
    assert_eq!(run, at(2014, 11, 15, 17, 15, 0));
    assert_eq!(run.second(), 0);
}

#[test]
fn test_both_day_fields_take_earlier() {
    // the 1st OR Wednesdays; from Sat 2014-11-15 Wednesday the 19th comes first
    assert_eq!(
        next("0 0 1 * 3 true", at(2014, 11, 15, 17, 4, 0)),
        at(2014, 11, 19, 0, 0, 0)
    );
    // from Thu 2014-11-27 the 1st of December comes before Wednesday the 3rd
    assert_eq!(
        next("0 0 1 * 3 true", at(2014, 11, 27, 17, 4, 0)),
        at(2014, 12, 1, 0, 0, 0)
    );
}

#[test]
fn test_restricted_dom_ignores_wildcard_dow() {
    assert_eq!(
        next("30 6 15 * * true", at(2014, 11, 15, 17, 4, 0)),
        at(2014, 12, 15, 6, 30, 0)
    );
}

#[test]
fn test_sunday_is_seven() {
    // Saturday evening: Sunday 09:00
    assert_eq!(
        next("0 9 * * 7 true", at(2014, 11, 15, 17, 4, 0)),
        at(2014, 11, 16, 9, 0, 0)
    );
}

#[test]
fn test_step_and_list_fields() {
    let line = "1-5/4,34-57,59,*/30 9-17 * * 1-5 true";
    // Friday 17:58 → 17:59
    assert_eq!(next(line, at(2014, 11, 14, 17, 58, 0)), at(2014, 11, 14, 17, 59, 0));
    // Friday 17:59 → Monday 09:00
    assert_eq!(next(line, at(2014, 11, 14, 17, 59, 0)), at(2014, 11, 17, 9, 0, 0));
}

#[test]
fn test_unschedulable_is_reported() {
    let job = CronJob::parse("0 0 31 2 * never").unwrap();
    let err = job.next_run(at(2014, 1, 1, 0, 0, 0)).unwrap_err();
    assert!(matches!(err, CronError::Unschedulable(_)));
    assert!(err.to_string().contains("Couldn't find a valid time"));
}

#[test]
fn test_schedules_are_independent() {
    let good = CronJob::parse("* * * * * true").unwrap();
    let bad = CronJob::parse("0 0 30 2 * never").unwrap();
    let now = at(2014, 11, 15, 17, 4, 49);
    assert!(bad.next_run(now).is_err());
    assert_eq!(good.next_run(now).unwrap(), at(2014, 11, 15, 17, 5, 0));
}

// ─── Randomized comparison against a forward scan ────────────────

/// Walk forward one day at a time, then one minute at a time within a
/// matching day. Gives up after ten years.
fn scan(expr: &CronExpression, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let first_hour = expr.hours.first();
    let first_minute = expr.minutes.first();
    let start = now.with_second(0).unwrap() + chrono::Duration::minutes(1);
    let mut day = start.date();

    for _ in 0..(366 * 10) {
        // whether a day qualifies doesn't depend on the time of day
        if expr.matches(&day.and_hms_opt(first_hour, first_minute, 0).unwrap()) {
            let from = if day == start.date() {
                start.hour() * 60 + start.minute()
            } else {
                0
            };
            for m in from..24 * 60 {
                let t = day.and_hms_opt(m / 60, m % 60, 0).unwrap();
                if expr.matches(&t) {
                    return Some(t);
                }
            }
        }
        day = day.succ_opt()?;
    }
    None
}

fn random_field(rng: &mut StdRng, min: u32, max: u32) -> String {
    if rng.gen_bool(0.35) {
        return "*".to_string();
    }
    let elements: Vec<String> = (0..rng.gen_range(1..=2))
        .map(|_| {
            let lo = rng.gen_range(min..=max);
            match rng.gen_range(0..4) {
                0 => lo.to_string(),
                1 => format!("{}-{}", lo, rng.gen_range(lo..=max)),
                2 => format!("{}-{}/{}", lo, rng.gen_range(lo..=max), rng.gen_range(1..=7)),
                _ => format!("*/{}", rng.gen_range(1..=max.max(2))),
            }
        })
        .collect();
    elements.join(",")
}

#[test]
fn test_next_run_matches_forward_scan() {
    let mut rng = StdRng::seed_from_u64(2014_11_15);

    for _ in 0..300 {
        let text = format!(
            "{} {} {} {} {}",
            random_field(&mut rng, 0, 59),
            random_field(&mut rng, 0, 23),
            random_field(&mut rng, 1, 31),
            random_field(&mut rng, 1, 12),
            random_field(&mut rng, 1, 7),
        );
        let expr = CronExpression::parse(&text).unwrap();
        let now = at(
            rng.gen_range(2000..=2030),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
            rng.gen_range(0..=23),
            rng.gen_range(0..=59),
            rng.gen_range(0..=59),
        );

        let expected = scan(&expr, now);
        match expr.next_after(now) {
            Ok(found) => {
                assert_eq!(Some(found), expected, "{} from {}", text, now);
                assert!(expr.matches(&found));
                assert!(found > now);
            }
            Err(e) => assert_eq!(expected, None, "{} from {}: {}", text, now, e),
        }
    }
}

#[test]
fn test_february_edge_days_match_forward_scan() {
    let now = at(2097, 3, 1, 0, 0, 0);
    for text in ["0 0 29 2 *", "0 0 29-31 2 *", "0 0 28,29 2 *", "0 0 29 2 7", "0 0 30 2 1"] {
        let expr = CronExpression::parse(text).unwrap();
        assert_eq!(expr.next_after(now).ok(), scan(&expr, now), "{}", text);
    }
    assert_eq!(
        CronExpression::parse("0 0 29 2 *").unwrap().next_after(now).unwrap(),
        at(2104, 2, 29, 0, 0, 0)
    );
    // Sunday February 29th, or any February Sunday
    let sunday = CronExpression::parse("0 0 29 2 7").unwrap().next_after(now).unwrap();
    assert_eq!(sunday.month(), 2);
    assert_eq!(sunday.weekday(), chrono::Weekday::Sun);
}
