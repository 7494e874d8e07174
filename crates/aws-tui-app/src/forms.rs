// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ObjectAcl, RecordChange, RecordSet, RecordType, Routing};

pub const DEFAULT_TTL: i64 = 300;
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Create,
    Update,
    Delete,
}

impl RecordMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => " Create Record ",
            Self::Update => " Update Record ",
            Self::Delete => " Delete Record - Confirm ",
        }
    }

    pub const fn button(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Create => "Failed to create record",
            Self::Update => "Failed to update record",
            Self::Delete => "Failed to delete record",
        }
    }
}

/// Raw text of the record editor fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormInput {
    pub name: String,
    pub kind: RecordType,
    pub ttl: String,
    pub value: String,
}

impl RecordFormInput {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            kind: RecordType::A,
            ttl: DEFAULT_TTL.to_string(),
            value: String::new(),
        }
    }

    /// Pre-fills from an existing record, showing the name relative to the zone.
    pub fn from_record(record: &RecordSet, zone_name: &str) -> Self {
        let value = match &record.alias_target {
            Some(target) => target.clone(),
            None => record.values.join("\n"),
        };
        Self {
            name: relative_record_name(&record.name, zone_name),
            kind: record.kind,
            ttl: record.ttl.unwrap_or(DEFAULT_TTL).to_string(),
            value,
        }
    }

    /// Messages match what the record editor shows in its error modal.
    pub fn validate(&self, zone_name: &str) -> Result<RecordSet> {
        let Ok(ttl) = self.ttl.trim().parse::<i64>() else {
            bail!("Invalid TTL value");
        };
        if self.value.is_empty() {
            bail!("Value is required");
        }
        let values = parse_record_values(&self.value);
        if values.is_empty() {
            bail!("At least one value is required");
        }
        Ok(RecordSet {
            name: qualify_record_name(&self.name, zone_name),
            kind: self.kind,
            ttl: Some(ttl),
            values,
            alias_target: None,
            routing: Routing::default(),
        })
    }
}

/// Change batch for a submitted record editor.
pub fn record_changes(
    mode: RecordMode,
    existing: Option<&RecordSet>,
    submitted: Option<RecordSet>,
) -> Result<Vec<RecordChange>> {
    match (mode, existing, submitted) {
        (RecordMode::Create, _, Some(record)) => Ok(vec![RecordChange::Create(record)]),
        (RecordMode::Update, Some(old), Some(record)) => Ok(vec![
            RecordChange::Delete(old.clone()),
            RecordChange::Create(record),
        ]),
        (RecordMode::Delete, Some(old), _) => Ok(vec![RecordChange::Delete(old.clone())]),
        (RecordMode::Update | RecordMode::Delete, None, _) => {
            bail!("No existing record to {}", mode.button().to_lowercase())
        }
        (_, _, None) => bail!("record fields are missing -- fill in the form and retry"),
    }
}

/// Builds the fully qualified record name inside `zone_name`.
///
/// A dotted name that already ends with the zone text is kept as typed, so
/// `foo.notexample.com` in zone `example.com` is not re-qualified.
pub fn qualify_record_name(name: &str, zone_name: &str) -> String {
    let zone = zone_name.trim_end_matches('.');
    let name = name.trim();
    if name.is_empty() || name == "@" {
        return format!("{zone}.");
    }
    let mut full = if name.contains('.') && name.trim_end_matches('.').ends_with(zone) {
        name.to_owned()
    } else {
        format!("{name}.{zone}")
    };
    if !full.ends_with('.') {
        full.push('.');
    }
    full
}

/// Record name as typed into the editor: zone suffix removed, apex as `@`.
pub fn relative_record_name(full_name: &str, zone_name: &str) -> String {
    let zone = zone_name.trim_end_matches('.');
    let full = full_name.trim_end_matches('.');
    if full == zone {
        return "@".to_owned();
    }
    match full.strip_suffix(&format!(".{zone}")) {
        Some(relative) => relative.to_owned(),
        None => full.to_owned(),
    }
}

/// One value per non-blank line, trimmed.
pub fn parse_record_values(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Expands a leading `~` against `home`.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    let trimmed = raw.trim();
    match (trimmed.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(trimmed),
    }
}

/// Resolves and checks the directory picker input.
pub fn validate_directory(raw: &str, home: Option<&Path>) -> Result<PathBuf> {
    let path = expand_home(raw, home);
    let Ok(metadata) = fs::metadata(&path) else {
        bail!("Directory not found: {}", path.display());
    };
    if !metadata.is_dir() {
        bail!("Path is not a directory");
    }
    Ok(path)
}

/// Content type guessed from the file extension. Text types carry an
/// explicit UTF-8 charset.
pub fn content_type_for(file_name: &str) -> String {
    let Some(guess) = mime_guess::from_path(file_name).first() else {
        return DEFAULT_CONTENT_TYPE.to_owned();
    };
    if guess.type_() == mime_guess::mime::TEXT && guess.get_param(mime_guess::mime::CHARSET).is_none() {
        format!("{}; charset=utf-8", guess.essence_str())
    } else {
        guess.essence_str().to_owned()
    }
}

/// Last `/`-separated segment of an object key.
pub fn object_base_name(key: &str) -> &str {
    key.trim_end_matches('/').rsplit('/').next().unwrap_or(key)
}

/// Prefix of the directory holding `key`, with its trailing `/`.
pub fn parent_prefix(key: &str) -> &str {
    match key.rfind('/') {
        Some(index) => &key[..=index],
        None => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bucket: String,
    pub key: String,
    pub local_path: PathBuf,
    pub content_type: String,
    pub acl: ObjectAcl,
}

impl UploadRequest {
    /// Defaults for uploading `local_path` under `prefix`.
    pub fn for_file(bucket: &str, prefix: &str, local_path: &Path) -> Self {
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            bucket: bucket.to_owned(),
            key: format!("{prefix}{file_name}"),
            content_type: content_type_for(&file_name),
            local_path: local_path.to_path_buf(),
            acl: ObjectAcl::Private,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            bail!("S3 key is required -- enter a key and retry");
        }
        if self.key.starts_with('/') {
            bail!("S3 key must not start with '/'");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub bucket: String,
    pub key: String,
    pub directory: PathBuf,
    pub file_name: String,
}

impl DownloadRequest {
    pub fn new(bucket: &str, key: &str, directory: &Path) -> Self {
        Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            directory: directory.to_path_buf(),
            file_name: object_base_name(key).to_owned(),
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.file_name.trim();
        if name.is_empty() {
            bail!("Filename is required");
        }
        if name.contains('/') || name == "." || name == ".." {
            bail!("Filename must not contain a path");
        }
        Ok(())
    }
}

/// `N B` below one kibibyte, otherwise one decimal in the largest unit.
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let units = ["KB", "MB", "GB", "TB"];
    let mut divisor = UNIT;
    let mut exponent = 0;
    while bytes / divisor >= UNIT && exponent < units.len() - 1 {
        divisor *= UNIT;
        exponent += 1;
    }
    format!("{:.1} {}", bytes as f64 / divisor as f64, units[exponent])
}
