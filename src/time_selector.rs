use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;

use chrono::NaiveTime;

use crate::wheel::{ValueWheel, WheelMotion};

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format(self.hour, self.minute))
    }
}

pub fn format(hour: u8, minute: u8) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Best-effort split of an `HH:MM` value for display wheels. Missing or
/// non-numeric parts become zero; out-of-range parts clamp to the wheel.
pub fn parse(value: &str) -> (u8, u8) {
    let mut parts = value.split(':');
    let hour = parse_part(parts.next(), HOURS_PER_DAY - 1);
    let minute = parse_part(parts.next(), MINUTES_PER_HOUR - 1);
    (hour, minute)
}

fn parse_part(part: Option<&str>, max: u8) -> u8 {
    let Some(raw) = part.map(str::trim) else {
        return 0;
    };

    match raw.parse::<u32>() {
        Ok(value) => value.min(max.into()) as u8,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => max,
        Err(_) => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelField {
    Hour,
    Minute,
}

/// Hour and minute wheels exposed as a single `HH:MM` value.
#[derive(Debug, Clone)]
pub struct TimeSelector {
    hour: ValueWheel,
    minute: ValueWheel,
}

impl TimeSelector {
    pub fn new(value: &str, item_height: f64, motion: WheelMotion) -> Self {
        let (hour, minute) = parse(value);
        Self {
            hour: ValueWheel::numeric(HOURS_PER_DAY.into(), hour.into(), item_height, motion),
            minute: ValueWheel::numeric(MINUTES_PER_HOUR.into(), minute.into(), item_height, motion),
        }
    }

    pub fn value(&self) -> String {
        format!("{}:{}", self.hour.selected(), self.minute.selected())
    }

    pub fn set_value(&mut self, value: &str) {
        let (hour, minute) = parse(value);
        self.hour.set_value(&format!("{hour:02}"));
        self.minute.set_value(&format!("{minute:02}"));
    }

    pub fn wheel(&self, field: WheelField) -> &ValueWheel {
        match field {
            WheelField::Hour => &self.hour,
            WheelField::Minute => &self.minute,
        }
    }

    fn wheel_mut(&mut self, field: WheelField) -> &mut ValueWheel {
        match field {
            WheelField::Hour => &mut self.hour,
            WheelField::Minute => &mut self.minute,
        }
    }

    pub fn begin_drag(&mut self, field: WheelField) {
        self.wheel_mut(field).begin_drag();
    }

    pub fn update_drag(&mut self, field: WheelField, delta: f64) {
        self.wheel_mut(field).update_drag(delta);
    }

    pub fn end_drag(&mut self, field: WheelField) -> Option<String> {
        let selected = self.wheel_mut(field).end_drag();
        self.changed(selected)
    }

    pub fn apply_discrete_scroll(&mut self, field: WheelField, delta: f64) -> Option<String> {
        let selected = self.wheel_mut(field).apply_discrete_scroll(delta);
        self.changed(selected)
    }

    /// Advances both wheels; returns the new value if either settled.
    pub fn tick(&mut self, dt: f64) -> Option<String> {
        let hour = self.hour.tick(dt);
        let minute = self.minute.tick(dt);
        self.changed(hour.or(minute))
    }

    /// Completes any glide still in progress on either wheel.
    pub fn finish_settle(&mut self) -> Option<String> {
        let hour = self.hour.finish_settle();
        let minute = self.minute.finish_settle();
        self.changed(hour.or(minute))
    }

    fn changed(&self, selected: Option<String>) -> Option<String> {
        selected.map(|_| self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeOfDay, TimeSelector, WheelField, format, parse};
    use crate::wheel::{ITEM_HEIGHT, WheelMotion};

    #[test]
    fn format_pads_both_fields() {
        assert_eq!(format(9, 5), "09:05");
        assert_eq!(format(23, 59), "23:59");
        assert_eq!(TimeOfDay { hour: 0, minute: 7 }.to_string(), "00:07");
    }

    #[test]
    fn parse_inverts_format_for_every_time_of_day() {
        for hour in 0..24 {
            for minute in 0..60 {
                assert_eq!(parse(&format(hour, minute)), (hour, minute));
            }
        }
    }

    #[test]
    fn parse_degrades_malformed_input() {
        assert_eq!(parse(""), (0, 0));
        assert_eq!(parse("7"), (7, 0));
        assert_eq!(parse("9:5"), (9, 5));
        assert_eq!(parse("ab:cd"), (0, 0));
        assert_eq!(parse("12:xx"), (12, 0));
        assert_eq!(parse("99:75"), (23, 59));
        assert_eq!(parse("-1:30"), (0, 30));
        assert_eq!(parse("99999999999:75"), (23, 59));
        assert_eq!(parse("7:99999999999999999999"), (7, 59));
    }

    #[test]
    fn time_of_day_rejects_out_of_range_fields() {
        assert!(TimeOfDay::new(23, 59).is_some());
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
    }

    #[test]
    fn wheel_selection_produces_new_value() {
        let mut selector = TimeSelector::new("20:30", ITEM_HEIGHT, WheelMotion::Instant);
        assert_eq!(selector.value(), "20:30");

        let value = selector.apply_discrete_scroll(WheelField::Hour, -ITEM_HEIGHT);
        assert_eq!(value.as_deref(), Some("21:30"));

        selector.begin_drag(WheelField::Minute);
        selector.update_drag(WheelField::Minute, 2.0 * ITEM_HEIGHT);
        assert_eq!(selector.end_drag(WheelField::Minute).as_deref(), Some("21:28"));
        assert_eq!(selector.wheel(WheelField::Minute).selected_index(), 28);
    }

    #[test]
    fn eased_wheels_report_value_after_settling() {
        let mut selector = TimeSelector::new("10:00", ITEM_HEIGHT, WheelMotion::Eased { rate: 15.0 });
        selector.begin_drag(WheelField::Hour);
        selector.update_drag(WheelField::Hour, -1.3 * ITEM_HEIGHT);
        assert_eq!(selector.end_drag(WheelField::Hour), None);

        let mut values = Vec::new();
        for _ in 0..120 {
            values.extend(selector.tick(1.0 / 60.0));
        }
        assert_eq!(values, vec!["11:00".to_string()]);
    }

    #[test]
    fn finish_settle_reports_pending_glide() {
        let mut selector = TimeSelector::new("10:00", ITEM_HEIGHT, WheelMotion::Eased { rate: 15.0 });
        assert_eq!(selector.finish_settle(), None);

        selector.begin_drag(WheelField::Minute);
        selector.update_drag(WheelField::Minute, -14.8 * ITEM_HEIGHT);
        assert_eq!(selector.end_drag(WheelField::Minute), None);
        assert_eq!(selector.finish_settle().as_deref(), Some("10:15"));
        assert_eq!(selector.tick(0.1), None);
    }

    #[test]
    fn set_value_moves_both_wheels() {
        let mut selector = TimeSelector::new("00:00", ITEM_HEIGHT, WheelMotion::Instant);
        selector.set_value("23:45");
        assert_eq!(selector.value(), "23:45");
        assert_eq!(selector.wheel(WheelField::Minute).position(), -45.0 * ITEM_HEIGHT);

        selector.set_value("garbage");
        assert_eq!(selector.value(), "00:00");
    }
}
