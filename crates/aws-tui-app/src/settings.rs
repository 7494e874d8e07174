// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_DIR: &str = ".aws-tui";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_directory: Option<PathBuf>,
}

/// Persistent user preferences. Every mutation rewrites the whole file; a
/// failed write leaves the in-memory change in place.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    /// `~/.aws-tui/settings.json`, or `None` when no home directory resolves.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Loads from `path`. A missing file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = read_settings(&path)?;
        Ok(Self {
            path: Some(path),
            settings,
        })
    }

    /// Defaults bound to `path`; the next mutation overwrites whatever is there.
    pub fn fresh(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            settings: Settings::default(),
        }
    }

    /// Defaults with nowhere to persist; mutations only live for the session.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn favorites(&self) -> &[String] {
        &self.settings.favorites
    }

    pub fn is_favorite(&self, reference: &str) -> bool {
        self.settings
            .favorites
            .iter()
            .any(|favorite| favorite == reference)
    }

    /// Returns `Ok(false)` when the reference is already a favorite.
    pub fn add_favorite(&mut self, reference: &str) -> Result<bool> {
        if self.is_favorite(reference) {
            return Ok(false);
        }
        self.settings.favorites.push(reference.to_owned());
        self.save()?;
        Ok(true)
    }

    /// Returns `Ok(false)` when the reference was not a favorite.
    pub fn remove_favorite(&mut self, reference: &str) -> Result<bool> {
        let before = self.settings.favorites.len();
        self.settings
            .favorites
            .retain(|favorite| favorite != reference);
        if self.settings.favorites.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Configured directory, else the working directory, else home.
    pub fn local_directory(&self) -> PathBuf {
        if let Some(directory) = &self.settings.local_directory {
            return directory.clone();
        }
        env::current_dir()
            .ok()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_local_directory(&mut self, directory: &Path) -> Result<()> {
        let metadata = fs::metadata(directory)
            .with_context(|| format!("directory not found: {}", directory.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", directory.display());
        }
        self.settings.local_directory = Some(directory.to_path_buf());
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_settings(path, &self.settings)
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "parse settings {} -- fix or delete the file and retry",
            path.display()
        )
    })
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create settings directory {}", parent.display()))?;
        set_mode(parent, 0o755)?;
    }

    let mut body = serde_json::to_string_pretty(settings).context("encode settings")?;
    body.push('\n');

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, body).with_context(|| format!("write settings {}", staging.display()))?;
    set_mode(&staging, 0o644)?;
    fs::rename(&staging, path)
        .with_context(|| format!("replace settings {}", path.display()))?;
    tracing::debug!(path = %path.display(), "settings saved");
    Ok(())
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)
            .with_context(|| format!("stat {}", path.display()))?
            .permissions();
        permissions.set_mode(mode);
        fs::set_permissions(path, permissions)
            .with_context(|| format!("set permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}
