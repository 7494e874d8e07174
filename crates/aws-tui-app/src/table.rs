// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::keys::{Chord, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    Browsing,
    Editing,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    Ignored,
    Updated,
    /// Enter on a displayed row; carries the index into the full row set.
    Selected(usize),
    /// Backspace/Delete on a displayed row; index into the full row set.
    DeleteRequested(usize),
}

/// Fixed-header table with a substring filter over every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    displayed: Vec<usize>,
    input: String,
    committed: String,
    phase: FilterPhase,
    selected: Option<usize>,
}

impl FilterTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            displayed: Vec::new(),
            input: String::new(),
            committed: String::new(),
            phase: FilterPhase::Browsing,
            selected: None,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Replaces the data and re-applies the committed filter.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.refilter();
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    pub fn is_editing(&self) -> bool {
        self.phase == FilterPhase::Editing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn committed_filter(&self) -> &str {
        &self.committed
    }

    /// `Filter: <text>` while a committed filter is in effect.
    pub fn filter_label(&self) -> Option<String> {
        (self.phase == FilterPhase::Committed).then(|| format!("Filter: {}", self.committed))
    }

    pub fn displayed_rows(&self) -> impl Iterator<Item = &[String]> {
        self.displayed.iter().map(|index| self.rows[*index].as_slice())
    }

    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// Selected position within the displayed rows.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Index of the selected row within the full row set.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .and_then(|position| self.displayed.get(position))
            .copied()
    }

    pub fn selected_row(&self) -> Option<&[String]> {
        self.selected_index().map(|index| self.rows[index].as_slice())
    }

    /// Cell of the selected row under `header`.
    pub fn selected_value(&self, header: &str) -> Option<&str> {
        let column = self.headers.iter().position(|name| name == header)?;
        self.selected_row()?.get(column).map(String::as_str)
    }

    pub fn begin_filter(&mut self) {
        self.phase = FilterPhase::Editing;
        self.input = self.committed.clone();
        self.refilter();
    }

    pub fn commit_filter(&mut self) {
        self.committed = self.input.clone();
        self.phase = if self.committed.is_empty() {
            FilterPhase::Browsing
        } else {
            FilterPhase::Committed
        };
        self.refilter();
    }

    pub fn set_filter_input(&mut self, text: &str) {
        self.input = text.to_owned();
        self.refilter();
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.displayed.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.displayed.len() - 1;
        let current = self.selected.unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.selected = Some(next);
    }

    pub fn select_first(&mut self) {
        self.selected = (!self.displayed.is_empty()).then_some(0);
    }

    pub fn select_last(&mut self) {
        self.selected = self.displayed.len().checked_sub(1);
    }

    pub fn handle_key(&mut self, chord: Chord) -> TableEvent {
        if self.phase == FilterPhase::Editing {
            return self.handle_filter_key(chord);
        }

        match chord.key {
            Key::Char('/') | Key::Tab if !chord.ctrl && !chord.alt => {
                self.begin_filter();
                TableEvent::Updated
            }
            Key::Up | Key::Char('k') => {
                self.move_selection(-1);
                TableEvent::Updated
            }
            Key::Down | Key::Char('j') => {
                self.move_selection(1);
                TableEvent::Updated
            }
            Key::PageUp => {
                self.move_selection(-10);
                TableEvent::Updated
            }
            Key::PageDown => {
                self.move_selection(10);
                TableEvent::Updated
            }
            Key::Home | Key::Char('g') => {
                self.select_first();
                TableEvent::Updated
            }
            Key::End | Key::Char('G') => {
                self.select_last();
                TableEvent::Updated
            }
            Key::Enter => self
                .selected_index()
                .map_or(TableEvent::Ignored, TableEvent::Selected),
            Key::Backspace | Key::Delete => self
                .selected_index()
                .map_or(TableEvent::Ignored, TableEvent::DeleteRequested),
            _ => TableEvent::Ignored,
        }
    }

    fn handle_filter_key(&mut self, chord: Chord) -> TableEvent {
        if let Some(value) = chord.rune() {
            self.input.push(value);
            self.refilter();
            return TableEvent::Updated;
        }
        match chord.key {
            Key::Backspace => {
                self.input.pop();
                self.refilter();
                TableEvent::Updated
            }
            Key::Enter | Key::Tab => {
                self.commit_filter();
                TableEvent::Updated
            }
            _ => TableEvent::Ignored,
        }
    }

    fn active_filter(&self) -> &str {
        match self.phase {
            FilterPhase::Browsing => "",
            FilterPhase::Editing => &self.input,
            FilterPhase::Committed => &self.committed,
        }
    }

    fn refilter(&mut self) {
        let needle = self.active_filter().to_lowercase();
        self.displayed = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &needle))
            .map(|(index, _)| index)
            .collect();
        self.select_first();
    }
}

/// Case-insensitive substring match against any cell; empty matches all.
pub fn row_matches(row: &[String], needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || row
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle_lower))
}
