use crate::error::Result;
use crate::types::TimeOfDay;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

/// Week shape and slot geometry for a solve.
///
/// Loaded from `config.toml` when present, then overridden by the
/// environment variables WEEK_DAYS, DAY_START, DAY_END, SLOT_MINUTES,
/// LUNCH_START and LUNCH_END.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Ordered working-day labels
    #[serde(default = "default_week_days")]
    pub week_days: Vec<String>,
    #[serde(default = "default_day_start")]
    pub day_start: TimeOfDay,
    #[serde(default = "default_day_end")]
    pub day_end: TimeOfDay,
    /// Base slot length in minutes; every session duration must be a multiple
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// No session may start inside [lunch_start, lunch_end)
    #[serde(default = "default_lunch_start")]
    pub lunch_start: TimeOfDay,
    #[serde(default = "default_lunch_end")]
    pub lunch_end: TimeOfDay,
    /// Wall-clock cap handed to the ILP solver
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: f64,
}

fn default_week_days() -> Vec<String> {
    ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_day_start() -> TimeOfDay {
    TimeOfDay::new(8, 0).unwrap()
}

fn default_day_end() -> TimeOfDay {
    TimeOfDay::new(17, 0).unwrap()
}

fn default_slot_minutes() -> u32 {
    60
}

fn default_lunch_start() -> TimeOfDay {
    TimeOfDay::new(13, 0).unwrap()
}

fn default_lunch_end() -> TimeOfDay {
    TimeOfDay::new(14, 0).unwrap()
}

fn default_time_limit_secs() -> f64 {
    20.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            week_days: default_week_days(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
            lunch_start: default_lunch_start(),
            lunch_end: default_lunch_end(),
            time_limit_secs: default_time_limit_secs(),
        }
    }
}

impl SolverConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from environment variables where set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(days) = env::var("WEEK_DAYS") {
            self.week_days = days
                .split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
        }
        if let Ok(s) = env::var("DAY_START") {
            self.day_start = s.parse()?;
        }
        if let Ok(s) = env::var("DAY_END") {
            self.day_end = s.parse()?;
        }
        if let Ok(s) = env::var("SLOT_MINUTES") {
            self.slot_minutes = s
                .trim()
                .parse()
                .with_context(|| format!("SLOT_MINUTES must be a number, got '{}'", s))?;
        }
        if let Ok(s) = env::var("LUNCH_START") {
            self.lunch_start = s.parse()?;
        }
        if let Ok(s) = env::var("LUNCH_END") {
            self.lunch_end = s.parse()?;
        }
        Ok(())
    }

    /// True when a session starting at `start` falls into the reserved lunch window
    pub fn starts_in_lunch(&self, start: TimeOfDay) -> bool {
        self.lunch_start <= start && start < self.lunch_end
    }
}
