// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

/// Number of rows in the header keybinding grid.
pub const KEY_GRID_ROWS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    const fn name(self) -> &'static str {
        match self {
            Self::Char(_) => "Rune",
            Self::Enter => "Enter",
            Self::Esc => "Esc",
            Self::Tab => "Tab",
            Self::BackTab => "Backtab",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PgUp",
            Self::PageDown => "PgDn",
        }
    }
}

/// A key plus modifiers. Control chords are normalized to lowercase
/// letters so `Ctrl+r` and `Ctrl+R` are the same chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
}

impl Chord {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    pub const fn ch(value: char) -> Self {
        Self::plain(Key::Char(value))
    }

    pub const fn ctrl(value: char) -> Self {
        Self {
            key: Key::Char(value.to_ascii_lowercase()),
            ctrl: true,
            alt: false,
        }
    }

    pub fn new(key: Key, ctrl: bool, alt: bool) -> Self {
        let key = match key {
            Key::Char(value) if ctrl => Key::Char(value.to_ascii_lowercase()),
            other => other,
        };
        Self { key, ctrl, alt }
    }

    /// Printable character carried by an unmodified chord.
    pub fn rune(self) -> Option<char> {
        match self.key {
            Key::Char(value) if !self.ctrl && !self.alt => Some(value),
            _ => None,
        }
    }

    /// Canonical name used for key action lookup.
    pub fn name(self) -> String {
        let mut name = String::new();
        if self.ctrl {
            name.push_str("Ctrl+");
        }
        if self.alt {
            name.push_str("Alt+");
        }
        match self.key {
            Key::Char(value) if self.ctrl => name.push(value.to_ascii_uppercase()),
            Key::Char(value) => {
                name.push_str("Rune[");
                name.push(value);
                name.push(']');
            }
            other => name.push_str(other.name()),
        }
        name
    }

    /// Short form shown in the header grid.
    pub fn label(self) -> String {
        match self.key {
            Key::Char(value) if !self.ctrl && !self.alt => value.to_string(),
            Key::Char(value) => {
                let mut label = String::new();
                if self.ctrl {
                    label.push_str("Ctrl-");
                }
                if self.alt {
                    label.push_str("Alt-");
                }
                label.push(if self.ctrl {
                    value.to_ascii_uppercase()
                } else {
                    value
                });
                label
            }
            other => {
                let mut label = String::new();
                if self.ctrl {
                    label.push_str("Ctrl-");
                }
                if self.alt {
                    label.push_str("Alt-");
                }
                label.push_str(other.name());
                label
            }
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    ReturnToTop,
    /// Interpreted by the view that contributed the key action.
    Local(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct KeyAction {
    pub chord: Chord,
    pub description: &'static str,
    pub action: Action,
}

impl KeyAction {
    pub const fn new(chord: Chord, description: &'static str, action: Action) -> Self {
        Self {
            chord,
            description,
            action,
        }
    }

    pub const fn local(chord: Chord, description: &'static str, id: &'static str) -> Self {
        Self::new(chord, description, Action::Local(id))
    }

    pub fn matches(&self, chord: Chord) -> bool {
        self.chord.name() == chord.name()
    }
}

impl PartialEq for KeyAction {
    fn eq(&self, other: &Self) -> bool {
        self.chord.name() == other.chord.name()
    }
}

impl Eq for KeyAction {}

pub const REFRESH: KeyAction = KeyAction::new(Chord::ctrl('r'), "Refresh", Action::Refresh);
pub const RETURN_TO_TOP: KeyAction = KeyAction::new(Chord::ctrl('t'), "Top", Action::ReturnToTop);

pub fn global_key_actions() -> [KeyAction; 2] {
    [REFRESH, RETURN_TO_TOP]
}

/// Local actions first, then the globals.
pub fn active_key_actions(local: &[KeyAction]) -> Vec<KeyAction> {
    let mut actions = local.to_vec();
    actions.extend(global_key_actions());
    actions
}

pub fn find_key_action(actions: &[KeyAction], chord: Chord) -> Option<KeyAction> {
    actions.iter().find(|action| action.matches(chord)).copied()
}

/// Lays actions out column-major into `KEY_GRID_ROWS` lines, padding each
/// column to its widest entry.
pub fn key_grid_lines(actions: &[KeyAction]) -> Vec<String> {
    let entries = actions
        .iter()
        .map(|action| format!("<{}> {}", action.chord.label(), action.description))
        .collect::<Vec<_>>();
    let mut lines = vec![String::new(); KEY_GRID_ROWS];
    for column in entries.chunks(KEY_GRID_ROWS) {
        let width = column
            .iter()
            .map(|entry| entry.chars().count())
            .max()
            .unwrap_or(0);
        for (row, entry) in column.iter().enumerate() {
            let line = &mut lines[row];
            if !line.is_empty() {
                line.push_str("  ");
            }
            line.push_str(&format!("{entry:<width$}"));
        }
    }
    lines
        .into_iter()
        .map(|line| line.trim_end().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        Action, Chord, Key, KeyAction, active_key_actions, find_key_action, key_grid_lines,
    };
    use std::collections::BTreeSet;

    #[test]
    fn chord_names_follow_terminal_conventions() {
        assert_eq!(Chord::ch('d').name(), "Rune[d]");
        assert_eq!(Chord::ctrl('r').name(), "Ctrl+R");
        assert_eq!(Chord::new(Key::Char('R'), true, false).name(), "Ctrl+R");
        assert_eq!(Chord::plain(Key::Enter).name(), "Enter");
        assert_eq!(Chord::plain(Key::Delete).label(), "Delete");
        assert_eq!(Chord::ctrl('t').label(), "Ctrl-T");
        assert_eq!(Chord::ch('T').label(), "T");
    }

    #[test]
    fn key_actions_compare_by_chord_name() {
        let a = KeyAction::local(Chord::ch('d'), "Add", "add");
        let b = KeyAction::local(Chord::ch('d'), "Download", "download");
        let c = KeyAction::local(Chord::ch('D'), "Add", "add");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn active_actions_end_with_globals_and_have_unique_names() {
        let local = [
            KeyAction::local(Chord::ch('d'), "Add to Favorites", "add"),
            KeyAction::local(Chord::ch('x'), "Remove from Favorites", "remove"),
        ];
        let actions = active_key_actions(&local);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[2].action, Action::Refresh);
        assert_eq!(actions[3].action, Action::ReturnToTop);

        let names = actions
            .iter()
            .map(|action| action.chord.name())
            .collect::<BTreeSet<_>>();
        assert_eq!(names.len(), actions.len());
    }

    #[test]
    fn find_key_action_matches_on_name() {
        let actions = active_key_actions(&[KeyAction::local(Chord::ch('v'), "View", "view")]);
        let found = find_key_action(&actions, Chord::new(Key::Char('R'), true, false));
        assert_eq!(found.map(|action| action.action), Some(Action::Refresh));
        assert!(find_key_action(&actions, Chord::ch('q')).is_none());
    }

    #[test]
    fn key_grid_wraps_into_new_columns_after_four_rows() {
        let local = [
            KeyAction::local(Chord::ch('v'), "View Object", "view"),
            KeyAction::local(Chord::ch('u'), "Upload", "upload"),
            KeyAction::local(Chord::ch('d'), "Download", "download"),
        ];
        let lines = key_grid_lines(&active_key_actions(&local));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "<v> View Object   <Ctrl-T> Top");
        assert_eq!(lines[1], "<u> Upload");
        assert_eq!(lines[3], "<Ctrl-R> Refresh");
    }
}
