// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{Form, FormEvent};
use crate::view::{Completion, Intent, View, ViewContext};
use anyhow::Result;
use aws_tui_app::{Chord, validate_directory};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::path::Path;

pub struct ChangeDirectoryForm {
    form: Form,
}

impl ChangeDirectoryForm {
    pub fn new(current: &Path) -> Self {
        Self {
            form: Form::new(" Change Local Directory ", "Save")
                .input("Directory", current.display().to_string()),
        }
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    fn submit(&self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let path = match validate_directory(self.form.value(0), cx.home) {
            Ok(path) => path,
            Err(error) => return vec![Intent::Error(error.to_string())],
        };
        if let Err(error) = cx.settings.set_local_directory(&path) {
            tracing::warn!(path = %path.display(), error = %error, "save local directory failed");
            return vec![Intent::Error(format!("Failed to save: {error:#}"))];
        }
        tracing::info!(path = %path.display(), "local directory changed");
        vec![Intent::Complete(Completion::DirectoryChanged(path))]
    }
}

impl View for ChangeDirectoryForm {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec!["Change Local Directory".to_owned()]
    }

    fn render(&mut self, _cx: &mut ViewContext<'_>) -> Result<()> {
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.form.handle_key(chord) {
            FormEvent::Submit => self.submit(cx),
            FormEvent::Cancel => vec![Intent::Close],
            FormEvent::Ignored | FormEvent::Edited => Vec::new(),
        }
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        self.form.draw(frame, area);
    }
}
