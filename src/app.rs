use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::calculator::{calculate, CalcError, Calculation};
use crate::config::Settings;
use crate::history::{History, HistoryEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message for the notification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Form fields, last result and history. Mutated only through the methods
/// below; persistence is left to the caller.
#[derive(Debug, Clone)]
pub struct AppState {
    pub start_time: String,
    pub end_time: String,
    pub hourly_rate: String,
    pub result: Option<Calculation>,
    pub history: History,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(settings: &Settings, history: History) -> Self {
        Self {
            start_time: settings.default_start.clone(),
            end_time: settings.default_end.clone(),
            hourly_rate: settings.default_hourly_rate.clone(),
            result: None,
            history,
            notice: None,
        }
    }

    pub fn set_start_time(&mut self, value: impl Into<String>) {
        self.start_time = value.into();
    }

    pub fn set_end_time(&mut self, value: impl Into<String>) {
        self.end_time = value.into();
    }

    pub fn set_hourly_rate(&mut self, value: impl Into<String>) {
        self.hourly_rate = value.into();
    }

    /// On failure only the notice changes; result and history are kept.
    pub fn calculate(&mut self, now: DateTime<Utc>) -> Result<&HistoryEntry, CalcError> {
        let calculation = match calculate(&self.start_time, &self.end_time, &self.hourly_rate) {
            Ok(calculation) => calculation,
            Err(err) => {
                warn!(
                    start = %self.start_time,
                    end = %self.end_time,
                    rate = %self.hourly_rate,
                    error = ?err,
                    "calculation rejected"
                );
                self.notice = Some(Notice::error(err.message()));
                return Err(err);
            }
        };

        info!(
            minutes = calculation.duration_minutes,
            total = calculation.total_cost,
            "calculation recorded"
        );
        let entry = HistoryEntry::new(&calculation, self.start_time.as_str(), self.end_time.as_str(), now);
        self.result = Some(calculation);
        self.notice = Some(Notice::success("Calculation saved."));
        Ok(self.history.record(entry))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.result = None;
        self.notice = Some(Notice::success("History cleared."));
        info!("history cleared");
    }
}
