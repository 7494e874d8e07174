// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use aws_tui_app::SETTINGS_DIR;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "aws-tui.log";
const DEFAULT_PROFILE: &str = "default";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub aws: Aws,
    #[serde(default)]
    pub sandbox: Sandbox,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            aws: Aws::default(),
            sandbox: Sandbox::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aws {
    pub region: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sandbox {
    pub db_path: Option<String>,
    pub seed_demo_data: Option<bool>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self {
            db_path: None,
            seed_demo_data: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub type_ahead_timeout: Option<String>,
    pub status_timeout: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            type_ahead_timeout: Some("1s".to_owned()),
            status_timeout: Some("4s".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

/// Profile and region the runtime talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub profile: String,
    pub region: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("AWS_TUI_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }
        Ok(app_dir()?.join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` at the top and keep values under [aws], [sandbox], [ui], and [log]",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.sandbox.db_path {
            aws_tui_sandbox::validate_db_path(db_path)
                .with_context(|| format!("invalid sandbox.db_path in {}", path.display()))?;
        }

        for (name, raw) in [
            ("ui.type_ahead_timeout", &self.ui.type_ahead_timeout),
            ("ui.status_timeout", &self.ui.status_timeout),
        ] {
            if let Some(raw) = raw
                && parse_duration(raw)? <= Duration::ZERO
            {
                bail!("{name} in {} must be positive, got {raw}", path.display());
            }
        }

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!("log.level in {} must not be empty", path.display());
        }
        Ok(())
    }

    /// Resolves the session from config first, then the environment.
    pub fn session(&self) -> Result<Session> {
        self.session_with(|name| env::var(name).ok())
    }

    fn session_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<Session> {
        let profile = self
            .aws
            .profile
            .clone()
            .or_else(|| lookup("AWS_PROFILE"))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_owned());
        if profile.trim().is_empty() {
            bail!("aws profile must not be empty; set [aws].profile or AWS_PROFILE");
        }
        if profile.chars().any(char::is_whitespace) {
            bail!("aws profile {profile:?} contains whitespace; profile names are single words");
        }

        let region = self
            .aws
            .region
            .clone()
            .or_else(|| lookup("AWS_REGION"))
            .or_else(|| lookup("AWS_DEFAULT_REGION"))
            .filter(|region| !region.trim().is_empty());
        Ok(Session { profile, region })
    }

    /// `None` means an in-memory sandbox.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.sandbox
            .db_path
            .as_deref()
            .filter(|path| *path != ":memory:")
            .map(PathBuf::from)
    }

    pub fn seed_demo_data(&self) -> bool {
        self.sandbox.seed_demo_data.unwrap_or(true)
    }

    pub fn type_ahead_timeout(&self) -> Result<Duration> {
        parse_duration(self.ui.type_ahead_timeout.as_deref().unwrap_or("1s"))
    }

    pub fn status_timeout(&self) -> Result<Duration> {
        parse_duration(self.ui.status_timeout.as_deref().unwrap_or("4s"))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(app_dir()?.join(LOG_FILE)),
        }
    }
}

fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        anyhow!("cannot resolve home directory; set AWS_TUI_CONFIG_PATH and [log].file explicitly")
    })?;
    Ok(home.join(SETTINGS_DIR))
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 1s)")
}
