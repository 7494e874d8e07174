// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chrome;
pub mod forms;
pub mod pages;
pub mod picker;
pub mod view;
pub mod views;
mod widgets;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use aws_tui_app::{
    AppCommand, AppEvent, AppState, Bucket, CallerIdentity, Chord, DownloadRequest, Endpoint,
    HostedZone, Key, ObjectListing, RecordChange, RecordSet, ResourceListing, SettingsStore, Tag,
    UploadRequest,
};
use chrome::{draw_footer, page_title};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use pages::{Pages, Signal};
use picker::ServicePicker;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders};
use ratatui::{Frame, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use view::ViewContext;
use widgets::draw_modal;

/// Everything the views need from the cloud account. Calls are blocking and
/// run on the UI thread.
pub trait AppRuntime {
    fn caller_identity(&mut self) -> Result<CallerIdentity>;
    fn account_aliases(&mut self) -> Result<Vec<String>>;
    fn region(&self) -> Option<String>;
    fn list_buckets(&mut self) -> Result<Vec<Bucket>>;
    fn list_objects(&mut self, bucket: &str, prefix: &str) -> Result<ObjectListing>;
    fn get_object(&mut self, bucket: &str, key: &str) -> Result<Vec<u8>>;
    fn object_metadata(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>>;
    fn object_tags(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>>;
    fn upload_object(&mut self, request: &UploadRequest) -> Result<()>;
    fn download_object(&mut self, request: &DownloadRequest) -> Result<()>;
    fn list_hosted_zones(&mut self) -> Result<Vec<HostedZone>>;
    fn list_records(&mut self, zone_id: &str) -> Result<Vec<RecordSet>>;
    fn change_records(&mut self, zone_id: &str, changes: &[RecordChange]) -> Result<()>;
    fn list_resources(&mut self, endpoint: Endpoint) -> Result<ResourceListing>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub type_ahead_timeout: Duration,
    pub status_timeout: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            type_ahead_timeout: Duration::from_secs(1),
            status_timeout: Duration::from_secs(4),
        }
    }
}

/// Posted by timer threads and drained before each draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    ClearSearch { page: u64, token: u64 },
}

pub struct App<R: AppRuntime> {
    runtime: R,
    settings: SettingsStore,
    home: Option<PathBuf>,
    state: AppState,
    pages: Pages,
    options: UiOptions,
    internal_tx: Sender<InternalEvent>,
    internal_rx: Receiver<InternalEvent>,
}

impl<R: AppRuntime> App<R> {
    /// Builds the picker root page and renders the chrome once.
    pub fn new(
        mut runtime: R,
        mut settings: SettingsStore,
        home: Option<PathBuf>,
        options: UiOptions,
    ) -> Self {
        let picker = Box::new(ServicePicker::new(&settings));
        let pages = {
            let mut cx = ViewContext {
                runtime: &mut runtime,
                settings: &mut settings,
                home: home.as_deref(),
            };
            Pages::new(picker, &mut cx)
        };
        let (internal_tx, internal_rx) = mpsc::channel();
        Self {
            runtime,
            settings,
            home,
            state: AppState::default(),
            pages,
            options,
            internal_tx,
            internal_rx,
        }
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Returns true when the chord asks to quit.
    pub fn handle_chord(&mut self, chord: Chord) -> bool {
        if chord == Chord::ctrl('q') || chord == Chord::ctrl('c') {
            self.state.dispatch(AppCommand::Quit);
            tracing::debug!("quit requested");
            return true;
        }
        {
            let mut cx = ViewContext {
                runtime: &mut self.runtime,
                settings: &mut self.settings,
                home: self.home.as_deref(),
            };
            self.pages.handle_key(chord, &mut cx);
        }
        for signal in self.pages.take_signals() {
            match signal {
                Signal::Status(message) => self.emit_status(message),
                Signal::SearchPending { page, token } => schedule(
                    &self.internal_tx,
                    self.options.type_ahead_timeout,
                    InternalEvent::ClearSearch { page, token },
                ),
            }
        }
        false
    }

    pub fn emit_status(&mut self, message: impl Into<String>) {
        for event in self.state.dispatch(AppCommand::SetStatus(message.into())) {
            if let AppEvent::StatusUpdated { token, .. } = event {
                schedule(
                    &self.internal_tx,
                    self.options.status_timeout,
                    InternalEvent::ClearStatus { token },
                );
            }
        }
    }

    pub fn process_internal_events(&mut self) {
        while let Ok(event) = self.internal_rx.try_recv() {
            match event {
                InternalEvent::ClearStatus { token } => {
                    self.state.dispatch(AppCommand::ClearStatus { token });
                }
                InternalEvent::ClearSearch { page, token } => {
                    self.pages.expire_search(page, token);
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        if let Some(chrome) = self.pages.chrome() {
            chrome.draw_header(frame, layout[0]);
        }

        if let Some(view) = self.pages.active() {
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Line::styled(
                    page_title(view),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            if let Some(search) = view.search_title() {
                block = block.title_top(
                    Line::styled(search, Style::default().fg(Color::Yellow)).right_aligned(),
                );
            }
            let inner = block.inner(layout[1]);
            frame.render_widget(block, layout[1]);
            view.draw(frame, inner);
        }

        draw_footer(frame, layout[2], self.state.status_line.as_deref());

        if let Some(message) = self.pages.modal() {
            draw_modal(frame, message);
        }
    }
}

fn schedule(internal_tx: &Sender<InternalEvent>, delay: Duration, event: InternalEvent) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(event);
    });
}

/// Translates a terminal key press. Releases and unmapped keys yield `None`.
pub fn chord_from_event(key: KeyEvent) -> Option<Chord> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let mapped = match key.code {
        KeyCode::Char(value) => Key::Char(value),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab if shift => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(Chord::new(
        mapped,
        key.modifiers.contains(KeyModifiers::CONTROL),
        key.modifiers.contains(KeyModifiers::ALT),
    ))
}

pub fn run_app<R: AppRuntime>(app: &mut App<R>) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = event_loop(app, &mut terminal);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<R: AppRuntime>(
    app: &mut App<R>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        app.process_internal_events();
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && let Some(chord) = chord_from_event(key)
            && app.handle_chord(chord)
        {
            return Ok(());
        }
    }
}
