use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use chrono::Duration;
use regex::Regex;

use crate::time_selector::TimeOfDay;

const TIME_PATTERN: &str = r"^(\d{1,2})[:.]?(\d{2})$";
const MINUTES_PER_HOUR: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    InvalidStartTime,
    InvalidEndTime,
    InvalidRate,
}

impl CalcError {
    pub fn message(self) -> &'static str {
        match self {
            CalcError::InvalidStartTime => "Start time is malformed. Use HH:MM.",
            CalcError::InvalidEndTime => "End time is malformed. Use HH:MM.",
            CalcError::InvalidRate => "Hourly rate must be a positive number.",
        }
    }
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CalcError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub hourly_rate: f64,
    pub duration_minutes: u32,
    pub hours_part: u32,
    pub minutes_part: u32,
    pub total_cost: u64,
}

impl Calculation {
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes) / f64::from(MINUTES_PER_HOUR)
    }

    pub fn duration_label(&self) -> String {
        format!("{}h {}m", self.hours_part, self.minutes_part)
    }
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(TIME_PATTERN).expect("time pattern must compile"))
}

/// Accepts `H:MM`, `HH:MM`, `HH.MM` and `HHMM`; the minute field is always two digits.
pub fn parse_time(input: &str) -> Option<TimeOfDay> {
    let captures = time_pattern().captures(input)?;
    let hour = captures.get(1)?.as_str().parse::<u8>().ok()?;
    let minute = captures.get(2)?.as_str().parse::<u8>().ok()?;
    TimeOfDay::new(hour, minute)
}

pub fn parse_rate(input: &str) -> Option<f64> {
    let rate = input.trim().parse::<f64>().ok()?;
    if rate.is_finite() && rate > 0.0 {
        Some(rate)
    } else {
        None
    }
}

/// Wall-clock duration and cost between two times of day. An end time that is
/// not strictly after the start lands on the following day.
pub fn calculate(start_time: &str, end_time: &str, hourly_rate: &str) -> Result<Calculation, CalcError> {
    let start = parse_time(start_time).ok_or(CalcError::InvalidStartTime)?;
    let end = parse_time(end_time).ok_or(CalcError::InvalidEndTime)?;
    let hourly_rate = parse_rate(hourly_rate).ok_or(CalcError::InvalidRate)?;

    let mut elapsed = end.to_naive_time().signed_duration_since(start.to_naive_time());
    if elapsed <= Duration::zero() {
        elapsed += Duration::days(1);
    }

    let duration_minutes = elapsed.num_minutes().clamp(0, i64::from(u32::MAX)) as u32;
    let duration_hours = f64::from(duration_minutes) / f64::from(MINUTES_PER_HOUR);
    // f64::round breaks ties away from zero; the cast saturates on overflow.
    let total_cost = (duration_hours * hourly_rate).round() as u64;

    Ok(Calculation {
        start,
        end,
        hourly_rate,
        duration_minutes,
        hours_part: duration_minutes / MINUTES_PER_HOUR,
        minutes_part: duration_minutes % MINUTES_PER_HOUR,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::{CalcError, calculate, parse_rate, parse_time};
    use crate::time_selector::TimeOfDay;

    #[test]
    fn parses_accepted_time_shapes() {
        assert_eq!(parse_time("09:05"), Some(TimeOfDay { hour: 9, minute: 5 }));
        assert_eq!(parse_time("9:05"), Some(TimeOfDay { hour: 9, minute: 5 }));
        assert_eq!(parse_time("21.15"), Some(TimeOfDay { hour: 21, minute: 15 }));
        assert_eq!(parse_time("2145"), Some(TimeOfDay { hour: 21, minute: 45 }));
        assert_eq!(parse_time("0:00"), Some(TimeOfDay { hour: 0, minute: 0 }));
    }

    #[test]
    fn rejects_malformed_or_out_of_range_times() {
        for input in ["9:5", "24:00", "12:60", "", "ab:cd", "123:00", " 10:00", "10:00 ", "10-00"] {
            assert_eq!(parse_time(input), None, "{input:?} should be rejected");
        }
    }

    #[test]
    fn rejects_non_positive_or_non_finite_rates() {
        assert_eq!(parse_rate("5000"), Some(5000.0));
        assert_eq!(parse_rate(" 12.5 "), Some(12.5));
        for input in ["-5", "0", "", "abc", "NaN", "inf", "-inf"] {
            assert_eq!(parse_rate(input), None, "{input:?} should be rejected");
        }
    }

    #[test]
    fn computes_same_day_duration_and_cost() {
        let result = calculate("20:30", "23:45", "5000").expect("inputs are valid");
        assert_eq!(result.duration_minutes, 195);
        assert_eq!((result.hours_part, result.minutes_part), (3, 15));
        assert_eq!(result.total_cost, 16_250);
        assert_eq!(result.duration_label(), "3h 15m");
        assert_eq!(result.duration_hours(), 3.25);
    }

    #[test]
    fn wraps_overnight_sessions_to_next_day() {
        let result = calculate("23:00", "01:00", "4000").expect("inputs are valid");
        assert_eq!(result.duration_minutes, 120);
        assert_eq!((result.hours_part, result.minutes_part), (2, 0));
        assert_eq!(result.total_cost, 8_000);
    }

    #[test]
    fn equal_times_count_as_a_full_day() {
        let result = calculate("10:00", "10:00", "1000").expect("inputs are valid");
        assert_eq!(result.duration_minutes, 1440);
        assert_eq!((result.hours_part, result.minutes_part), (24, 0));
        assert_eq!(result.total_cost, 24_000);
    }

    #[test]
    fn rounds_half_cost_away_from_zero() {
        // 30 minutes at 3 per hour costs 1.5
        let result = calculate("10:00", "10:30", "3").expect("inputs are valid");
        assert_eq!(result.total_cost, 2);

        let result = calculate("10:00", "10:20", "5000").expect("inputs are valid");
        assert_eq!(result.total_cost, 1_667);
    }

    #[test]
    fn stops_at_first_invalid_field() {
        assert_eq!(calculate("9:5", "25:00", "-1"), Err(CalcError::InvalidStartTime));
        assert_eq!(calculate("09:05", "25:00", "-1"), Err(CalcError::InvalidEndTime));
        assert_eq!(calculate("10:00", "11:00", "-5"), Err(CalcError::InvalidRate));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = calculate("18:10", "02:35", "7500");
        let second = calculate("18:10", "02:35", "7500");
        assert_eq!(first, second);
    }
}
