// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::AppRuntime;
use anyhow::Result;
use aws_tui_app::{Chord, KeyAction, SettingsStore};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a view may touch while rendering or handling input.
pub struct ViewContext<'a> {
    pub runtime: &'a mut dyn AppRuntime,
    pub settings: &'a mut SettingsStore,
    pub home: Option<&'a Path>,
}

/// Value handed to the page underneath when a child completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    RecordsChanged { message: String },
    ObjectUploaded { key: String },
    ObjectDownloaded(PathBuf),
    DirectoryChanged(PathBuf),
    FileChosen(PathBuf),
}

/// Requests a view makes of the page stack.
pub enum Intent {
    Push(Box<dyn View>),
    Close,
    /// Close the active page and pass the value to the page below it.
    Complete(Completion),
    Error(String),
    Status(String),
    /// The type-ahead buffer changed; clear it later unless it changes again.
    SearchPending { token: u64 },
}

impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(view) => f.debug_tuple("Push").field(&view.service()).finish(),
            Self::Close => f.write_str("Close"),
            Self::Complete(completion) => f.debug_tuple("Complete").field(completion).finish(),
            Self::Error(message) => f.debug_tuple("Error").field(message).finish(),
            Self::Status(message) => f.debug_tuple("Status").field(message).finish(),
            Self::SearchPending { token } => {
                f.debug_struct("SearchPending").field("token", token).finish()
            }
        }
    }
}

pub trait View {
    /// Shown in the page title and used in the page name.
    fn service(&self) -> &str;

    /// Breadcrumb labels below the service.
    fn labels(&self) -> Vec<String>;

    fn key_actions(&self) -> Vec<KeyAction> {
        Vec::new()
    }

    /// Fetches and projects data. Calling it twice with the same backing
    /// data leaves the view in the same state.
    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()>;

    fn handle_key(&mut self, chord: Chord, cx: &mut ViewContext<'_>) -> Vec<Intent>;

    fn on_action(&mut self, _id: &'static str, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        Vec::new()
    }

    fn on_complete(&mut self, _completion: Completion, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        Vec::new()
    }

    /// True while typed characters belong to the view rather than to key
    /// actions.
    fn captures_text(&self) -> bool {
        false
    }

    fn expire_search(&mut self, _token: u64) -> bool {
        false
    }

    /// Extra title drawn on the right edge of the page border.
    fn search_title(&self) -> Option<String> {
        None
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect);
}

/// Re-renders a view after a completion, turning a fetch failure into an
/// error modal.
pub(crate) fn rerender(view: &mut dyn View, cx: &mut ViewContext<'_>) -> Vec<Intent> {
    match view.render(cx) {
        Ok(()) => Vec::new(),
        Err(error) => {
            tracing::warn!(service = view.service(), error = %error, "refresh failed");
            vec![Intent::Error(format!("{error:#}"))]
        }
    }
}
