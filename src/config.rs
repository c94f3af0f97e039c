use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use fika_rota::holidays;
use fika_rota::matching::{Matcher, MatcherConfig};
use fika_rota::models::{BlackoutWindow, ConstraintSet, ScheduleCalendar};

/// Top-level rotation configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RotaConfig {
    /// Global RNG seed.
    pub seed: Option<u64>,
    /// Holiday region: "SE" or "none".
    pub region: String,
    /// Slot weekday, e.g. "Fri".
    pub weekday: String,
    /// Matcher retry cap.
    pub max_attempts: Option<usize>,
    /// Windows recurring every year. When absent, the summer and winter
    /// breaks are placed once from the start date.
    pub blackout: Option<Vec<BlackoutWindow>>,
    /// Roster changes and constraints.
    pub constraints: ConstraintsToml,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            seed: None,
            region: "SE".to_string(),
            weekday: "Fri".to_string(),
            max_attempts: None,
            blackout: None,
            constraints: ConstraintsToml::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct ConstraintsToml {
    pub leaving_soon: Vec<String>,
    pub just_arrived: Vec<String>,
    pub together: Vec<Vec<String>>,
    pub holidays: Vec<NaiveDate>,
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl RotaConfig {
    /// Reads a TOML file, or returns defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Builds the slot calendar.
    pub fn build_calendar(&self) -> Result<ScheduleCalendar> {
        let holidays = holidays::for_region(&self.region)?;
        let weekday: Weekday = self
            .weekday
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid weekday {:?}", self.weekday))?;
        let mut calendar = ScheduleCalendar::new(holidays).with_weekday(weekday);
        if let Some(windows) = &self.blackout {
            calendar = calendar.with_windows(windows.clone());
        }
        Ok(calendar)
    }

    /// Builds the matcher.
    pub fn build_matcher(&self) -> Matcher {
        let mut config = MatcherConfig::default();
        if let Some(max) = self.max_attempts {
            config.max_attempts = max;
        }
        Matcher::new(config)
    }

    /// Builds the constraint set from the `[constraints]` table.
    pub fn build_constraints(&self) -> Result<ConstraintSet> {
        let c = &self.constraints;
        let mut set = ConstraintSet::new();
        set.add_leaving_soon_many(&as_strs(&c.leaving_soon))?;
        set.add_just_arrived_many(&as_strs(&c.just_arrived))?;
        for pair in &c.together {
            set.add_fixed_together(&as_strs(pair))?;
        }
        for &date in &c.holidays {
            set.add_blackout_date(date);
        }
        Ok(set)
    }
}

pub fn as_strs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}
