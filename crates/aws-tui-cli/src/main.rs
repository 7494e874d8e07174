// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, bail};
use aws_tui_app::SettingsStore;
use aws_tui_sandbox::Store;
use aws_tui_tui::{App, UiOptions};
use config::Config;
use runtime::SandboxRuntime;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1))?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    let config_path = Config::default_path()?;
    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; fix the file or point AWS_TUI_CONFIG_PATH at a valid one",
            config_path.display()
        )
    })?;
    init_logging(&config)?;
    tracing::info!(config = %config_path.display(), "starting aws-tui");

    let session = config
        .session()
        .context("resolve aws session; check [aws].profile and AWS_PROFILE")?;
    tracing::info!(
        profile = %session.profile,
        region = session.region.as_deref().unwrap_or("unknown"),
        "resolved session"
    );

    let store = open_sandbox(&config)?;
    let (settings, settings_problem) = load_settings(SettingsStore::default_path());
    let ui = UiOptions {
        type_ahead_timeout: config.type_ahead_timeout()?,
        status_timeout: config.status_timeout()?,
    };

    let mut app = App::new(
        SandboxRuntime::new(store, session),
        settings,
        dirs::home_dir(),
        ui,
    );
    if let Some(message) = settings_problem {
        app.emit_status(message);
    }
    let result = aws_tui_tui::run_app(&mut app);
    tracing::info!(clean = result.is_ok(), "aws-tui exiting");
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let log_path = config.log_file()?;
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].file to a writable path",
                log_path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level().into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

fn open_sandbox(config: &Config) -> Result<Store> {
    let store = match config.db_path() {
        Some(path) => open_sandbox_file(&path)?,
        None => Store::open_memory()?,
    };
    store.bootstrap()?;
    if config.seed_demo_data() {
        store.seed_demo_data()?;
    }
    Ok(store)
}

fn open_sandbox_file(path: &Path) -> Result<Store> {
    Store::open(path).with_context(|| {
        format!(
            "open sandbox {} -- if this path is wrong, fix [sandbox].db_path",
            path.display()
        )
    })
}

/// A corrupt settings file is replaced by defaults for the session; the
/// returned message tells the user why their favorites are gone.
fn load_settings(path: Option<PathBuf>) -> (SettingsStore, Option<String>) {
    let Some(path) = path else {
        tracing::warn!("no home directory; settings will not persist");
        return (SettingsStore::in_memory(), None);
    };
    match SettingsStore::open(&path) {
        Ok(settings) => (settings, None),
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %format!("{error:#}"), "ignoring unreadable settings");
            (
                SettingsStore::fresh(path),
                Some(format!("Settings reset: {error:#}")),
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions { show_help: false };
    for arg in args {
        match arg.as_ref() {
            "--help" | "-h" => options.show_help = true,
            unknown => {
                bail!("aws-tui takes no arguments, got {unknown:?}; run with --help for usage")
            }
        }
    }
    Ok(options)
}

fn print_help() {
    println!("aws-tui: browse AWS services in the terminal");
    println!();
    println!("Usage: aws-tui");
    println!();
    println!("Config:   ~/.aws-tui/config.toml (override with AWS_TUI_CONFIG_PATH)");
    println!("Settings: ~/.aws-tui/settings.json");
    println!("Keys:     Esc back, Enter select, / filter, Ctrl-R refresh, Ctrl-T top, Ctrl-Q quit");
}
