use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use serde::{Deserialize, Serialize};

use crate::calculator::Calculation;

const ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub hourly_rate: f64,
    pub duration: String,
    pub total: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(
        calculation: &Calculation,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_id(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            hourly_rate: calculation.hourly_rate,
            duration: calculation.duration_label(),
            total: calculation.total_cost,
            timestamp: recorded_at.timestamp_millis(),
        }
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Past calculations, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

/// Whole currency units with `.` thousands grouping, e.g. `Rp 16.250`.
pub fn format_currency(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if symbol.is_empty() {
        grouped
    } else {
        format!("{symbol} {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{History, HistoryEntry, format_currency};
    use crate::calculator::calculate;

    fn entry(start: &str, end: &str) -> HistoryEntry {
        let calculation = calculate(start, end, "5000").expect("inputs are valid");
        HistoryEntry::new(
            &calculation,
            start,
            end,
            Utc.with_ymd_and_hms(2026, 3, 14, 21, 0, 0).unwrap(),
        )
    }

    #[test]
    fn builds_entry_from_calculation() {
        let entry = entry("20:30", "23:45");
        assert_eq!(entry.id.len(), 8);
        assert!(entry.id.chars().all(|ch| ch.is_ascii_alphanumeric()));
        assert_eq!(entry.duration, "3h 15m");
        assert_eq!(entry.total, 16_250);
        assert_eq!(entry.hourly_rate, 5000.0);
        assert_eq!(
            entry.recorded_at(),
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn records_newest_first() {
        let mut history = History::new();
        history.record(entry("10:00", "11:00"));
        let latest_id = history.record(entry("12:00", "13:30")).id.clone();

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next().map(|entry| entry.id.as_str()), Some(latest_id.as_str()));
        let starts = history.iter().map(|entry| entry.start_time.as_str()).collect::<Vec<_>>();
        assert_eq!(starts, vec!["12:00", "10:00"]);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut history = History::new();
        history.record(entry("23:00", "01:00"));
        let json = serde_json::to_value(&history).expect("history should serialize");
        let first = &json.as_array().expect("history is a JSON array")[0];
        assert_eq!(first["startTime"], "23:00");
        assert_eq!(first["endTime"], "01:00");
        assert_eq!(first["hourlyRate"], 5000.0);
        assert_eq!(first["duration"], "2h 0m");
        assert_eq!(first["total"], 10_000);
    }

    #[test]
    fn groups_currency_thousands() {
        assert_eq!(format_currency(0, "Rp"), "Rp 0");
        assert_eq!(format_currency(950, "Rp"), "Rp 950");
        assert_eq!(format_currency(16_250, "Rp"), "Rp 16.250");
        assert_eq!(format_currency(1_234_567, ""), "1.234.567");
    }
}
