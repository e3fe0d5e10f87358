//! Trailing time windows applied to `createdAt`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{CoreError, Timestamp, MILLIS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
            TimeWindow::Last90Days => "90d",
            TimeWindow::LastYear => "1y",
            TimeWindow::All => "all",
        }
    }

    fn days(&self) -> Option<u64> {
        match self {
            TimeWindow::Last7Days => Some(7),
            TimeWindow::Last30Days => Some(30),
            TimeWindow::Last90Days => Some(90),
            TimeWindow::LastYear => Some(365),
            TimeWindow::All => None,
        }
    }

    /// Earliest included timestamp, `None` for an unbounded window.
    pub fn since(&self, now: Timestamp) -> Option<Timestamp> {
        self.days()
            .map(|days| now.saturating_sub(days * MILLIS_PER_DAY))
    }

    pub fn contains(&self, at: Timestamp, now: Timestamp) -> bool {
        self.since(now).map_or(true, |since| at >= since)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(TimeWindow::Last7Days),
            "30d" => Ok(TimeWindow::Last30Days),
            "90d" => Ok(TimeWindow::Last90Days),
            "1y" => Ok(TimeWindow::LastYear),
            "all" => Ok(TimeWindow::All),
            _ => Err(CoreError::validation(
                "timeWindow",
                format!("unknown window '{s}', expected 7d, 30d, 90d, 1y or all"),
            )),
        }
    }
}
