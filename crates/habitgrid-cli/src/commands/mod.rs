//! CLI subcommands.
//!
//! Every command works on a JSON habit snapshot. The file defaults to
//! `~/.config/habitgrid/snapshot.json` and is created on first write.

pub mod config;
pub mod habit;
pub mod heatmap;
pub mod stats;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use habitgrid_core::storage::data_dir;
use habitgrid_core::{
    Config, HabitEngine, JsonSnapshotFile, ScheduleSpec, Snapshot, SnapshotProvider,
};
use std::path::PathBuf;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Shared state resolved from global flags.
pub struct Context {
    snapshot: Option<PathBuf>,
    today: Option<NaiveDate>,
}

impl Context {
    pub fn new(snapshot: Option<PathBuf>, today: Option<NaiveDate>) -> Self {
        Self { snapshot, today }
    }

    pub fn config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        Ok(Config::load()?)
    }

    pub fn snapshot_file(&self) -> Result<JsonSnapshotFile, Box<dyn std::error::Error>> {
        let path = match &self.snapshot {
            Some(path) => path.clone(),
            None => data_dir()?.join("snapshot.json"),
        };
        Ok(JsonSnapshotFile::new(path))
    }

    /// Load the snapshot, treating a missing file as empty.
    pub fn load_snapshot(&self) -> Result<Snapshot, Box<dyn std::error::Error>> {
        let file = self.snapshot_file()?;
        if !file.path().exists() {
            tracing::debug!(path = %file.path().display(), "no snapshot yet");
            return Ok(Snapshot::default());
        }
        Ok(file.load()?)
    }

    pub fn store_snapshot(&self, snapshot: &Snapshot) -> CmdResult {
        self.snapshot_file()?.store(snapshot)?;
        Ok(())
    }

    pub fn engine(&self, config: &Config) -> Result<HabitEngine, Box<dyn std::error::Error>> {
        Ok(HabitEngine::with_snapshot(config, self.load_snapshot()?))
    }

    /// `--today` or the current day in the configured calendar.
    pub fn today(&self, config: &Config) -> NaiveDate {
        self.today
            .unwrap_or_else(|| config.calendar().day_of(Utc::now()))
    }

    /// Instant for an explicit `--today`, otherwise now.
    pub fn now(&self, config: &Config) -> DateTime<Utc> {
        match self.today {
            Some(day) => start_of(day, config),
            None => Utc::now(),
        }
    }
}

/// Midnight of `day` in the configured calendar, as UTC.
pub fn start_of(day: NaiveDate, config: &Config) -> DateTime<Utc> {
    let offset = config.calendar().offset();
    let local_midnight = day.and_time(NaiveTime::MIN);
    (local_midnight - offset).and_utc()
}

/// Parse `daily`, `weekdays` or a comma list such as `mon,wed,fri` or `2,4,6`
/// (1 = Sunday).
pub fn parse_schedule(input: &str) -> Result<ScheduleSpec, String> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "daily" => return Ok(ScheduleSpec::Daily),
        "weekdays" => return Ok(ScheduleSpec::Weekdays),
        _ => {}
    }

    let mut days = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let number = match part {
            "sun" | "sunday" => 1,
            "mon" | "monday" => 2,
            "tue" | "tuesday" => 3,
            "wed" | "wednesday" => 4,
            "thu" | "thursday" => 5,
            "fri" | "friday" => 6,
            "sat" | "saturday" => 7,
            other => match other.parse::<u8>() {
                Ok(n) if (1..=7).contains(&n) => n,
                _ => return Err(format!("invalid schedule day: {other}")),
            },
        };
        days.push(number);
    }
    if days.is_empty() {
        return Err(format!("invalid schedule: {input}"));
    }
    Ok(ScheduleSpec::custom(days))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule() {
        assert_eq!(parse_schedule("daily"), Ok(ScheduleSpec::Daily));
        assert_eq!(parse_schedule(" Weekdays "), Ok(ScheduleSpec::Weekdays));
        assert_eq!(parse_schedule("mon,wed,fri"), Ok(ScheduleSpec::custom([2, 4, 6])));
        assert_eq!(parse_schedule("1,7"), Ok(ScheduleSpec::custom([1, 7])));
        assert!(parse_schedule("mon,funday").is_err());
        assert!(parse_schedule("8").is_err());
        assert!(parse_schedule(",").is_err());
    }

    #[test]
    fn test_start_of_respects_offset() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut config = Config::default();
        assert_eq!(start_of(day, &config).to_rfc3339(), "2026-03-01T00:00:00+00:00");

        config.calendar.utc_offset_minutes = 9 * 60;
        let instant = start_of(day, &config);
        assert_eq!(instant.to_rfc3339(), "2026-02-28T15:00:00+00:00");
        assert_eq!(config.calendar().day_of(instant), day);
    }
}
