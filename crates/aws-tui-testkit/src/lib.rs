// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use time::{Date, Month, OffsetDateTime, Time};

pub const SAMPLE_ZONE: &str = "example.com.";

/// Throwaway home directory with the same layout the app expects under `~`.
pub struct TempHome {
    dir: TempDir,
}

impl TempHome {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp home")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join(".aws-tui").join("settings.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".aws-tui").join("config.toml")
    }

    /// Creates (if needed) and returns a directory relative to the home.
    pub fn dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
        Ok(path)
    }

    pub fn write_file(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_settings(&self, json: &str) -> Result<PathBuf> {
        let path = self.settings_path();
        self.write_file(".aws-tui/settings.json", json)?;
        Ok(path)
    }

    pub fn read_settings(&self) -> Result<String> {
        let path = self.settings_path();
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_owned()).collect()
}

/// Three two-column rows used by the filter scenarios.
pub fn greek_rows() -> Vec<Vec<String>> {
    vec![
        row(&["alpha", "1"]),
        row(&["beta", "2"]),
        row(&["gamma", "3"]),
    ]
}

pub fn fixed_timestamp() -> OffsetDateTime {
    let date = Date::from_calendar_date(2026, Month::January, 15).unwrap_or(Date::MIN);
    let time = Time::from_hms(9, 30, 0).unwrap_or(Time::MIDNIGHT);
    date.with_time(time).assume_utc()
}

#[cfg(test)]
mod tests {
    use super::{TempHome, fixed_timestamp, greek_rows};
    use anyhow::Result;

    #[test]
    fn temp_home_writes_nested_files() -> Result<()> {
        let home = TempHome::new()?;
        let path = home.write_file("uploads/report.csv", "a,b\n")?;
        assert!(path.starts_with(home.path()));
        assert_eq!(std::fs::read_to_string(path)?, "a,b\n");

        home.write_settings("{\"favorites\":[]}")?;
        assert_eq!(home.read_settings()?, "{\"favorites\":[]}");
        Ok(())
    }

    #[test]
    fn fixtures_are_stable() {
        assert_eq!(greek_rows().len(), 3);
        assert_eq!(fixed_timestamp().year(), 2026);
    }
}
