// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod directory;
mod record;
mod transfer;

pub use directory::ChangeDirectoryForm;
pub use record::RecordForm;
pub use transfer::{DownloadForm, UploadForm};

use aws_tui_app::{Chord, Key};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldKind {
    Input,
    TextArea,
    ReadOnly,
    Choice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    label: String,
    kind: FieldKind,
    value: String,
    choice: usize,
}

impl Field {
    fn editable(&self) -> bool {
        matches!(self.kind, FieldKind::Input | FieldKind::TextArea)
    }

    fn display(&self) -> String {
        match &self.kind {
            FieldKind::Choice(options) => options
                .get(self.choice)
                .map(|option| format!("< {option} >"))
                .unwrap_or_default(),
            _ => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Ignored,
    Edited,
    Submit,
    Cancel,
}

/// Labeled fields followed by an action button and `Cancel`. Focus walks
/// the fields, then the two buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    title: String,
    fields: Vec<Field>,
    action: String,
    focus: usize,
}

impl Form {
    pub fn new(title: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            action: action.into(),
            focus: 0,
        }
    }

    pub fn input(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(label, FieldKind::Input, value.into(), 0)
    }

    pub fn text_area(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(label, FieldKind::TextArea, value.into(), 0)
    }

    pub fn read_only(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(label, FieldKind::ReadOnly, value.into(), 0)
    }

    pub fn choice<I, S>(self, label: impl Into<String>, options: I, selected: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect::<Vec<_>>();
        let selected = selected.min(options.len().saturating_sub(1));
        self.field(label, FieldKind::Choice(options), String::new(), selected)
    }

    fn field(
        mut self,
        label: impl Into<String>,
        kind: FieldKind,
        value: String,
        choice: usize,
    ) -> Self {
        self.fields.push(Field {
            label: label.into(),
            kind,
            value,
            choice,
        });
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map_or("", |field| field.value.as_str())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn choice_index(&self, index: usize) -> usize {
        self.fields.get(index).map_or(0, |field| field.choice)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_on(&mut self, index: usize) {
        self.focus = index.min(self.slots() - 1);
    }

    fn slots(&self) -> usize {
        self.fields.len() + 2
    }

    fn action_slot(&self) -> usize {
        self.fields.len()
    }

    fn cancel_slot(&self) -> usize {
        self.fields.len() + 1
    }

    fn step(&mut self, forward: bool) {
        let slots = self.slots();
        self.focus = if forward {
            (self.focus + 1) % slots
        } else {
            (self.focus + slots - 1) % slots
        };
    }

    pub fn handle_key(&mut self, chord: Chord) -> FormEvent {
        match chord.key {
            Key::Tab | Key::Down => {
                self.step(true);
                return FormEvent::Ignored;
            }
            Key::BackTab | Key::Up => {
                self.step(false);
                return FormEvent::Ignored;
            }
            _ => {}
        }

        if self.focus == self.action_slot() {
            return match chord.key {
                Key::Enter => FormEvent::Submit,
                Key::Right | Key::Left => {
                    self.focus = self.cancel_slot();
                    FormEvent::Ignored
                }
                _ => FormEvent::Ignored,
            };
        }
        if self.focus == self.cancel_slot() {
            return match chord.key {
                Key::Enter => FormEvent::Cancel,
                Key::Right | Key::Left => {
                    self.focus = self.action_slot();
                    FormEvent::Ignored
                }
                _ => FormEvent::Ignored,
            };
        }

        let focus = self.focus;
        if chord.key == Key::Enter && self.fields[focus].kind != FieldKind::TextArea {
            self.step(true);
            return FormEvent::Ignored;
        }
        let field = &mut self.fields[focus];
        match (&field.kind, chord.key) {
            (FieldKind::TextArea, Key::Enter) => {
                field.value.push('\n');
                FormEvent::Edited
            }
            (FieldKind::Choice(options), Key::Right) if !options.is_empty() => {
                field.choice = (field.choice + 1) % options.len();
                FormEvent::Edited
            }
            (FieldKind::Choice(options), Key::Left) if !options.is_empty() => {
                field.choice = (field.choice + options.len() - 1) % options.len();
                FormEvent::Edited
            }
            (_, Key::Backspace) if field.editable() => {
                field.value.pop();
                FormEvent::Edited
            }
            _ => match chord.rune() {
                Some(value) if field.editable() => {
                    field.value.push(value);
                    FormEvent::Edited
                }
                _ => FormEvent::Ignored,
            },
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        let label_width = self
            .fields
            .iter()
            .map(|field| field.label.chars().count())
            .max()
            .unwrap_or(0);
        let focused = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                self.title.trim().to_owned(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (index, field) in self.fields.iter().enumerate() {
            let label = Span::styled(
                format!("{:>label_width$}: ", field.label),
                Style::default().fg(Color::Yellow),
            );
            let value_style = match (index == self.focus, &field.kind) {
                (true, _) => focused,
                (false, FieldKind::ReadOnly) => Style::default().fg(Color::DarkGray),
                (false, _) => Style::default(),
            };
            let display = field.display();
            let mut value_lines = display.split('\n');
            let first = value_lines.next().unwrap_or_default().to_owned();
            lines.push(Line::from(vec![label, Span::styled(first, value_style)]));
            for extra in value_lines {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(label_width + 2)),
                    Span::styled(extra.to_owned(), value_style),
                ]));
            }
        }
        lines.push(Line::from(""));

        let button = |text: &str, slot: usize| {
            let style = if self.focus == slot {
                focused
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!("[ {text} ]"), style)
        };
        lines.push(Line::from(vec![
            button(&self.action, self.action_slot()),
            Span::raw("  "),
            button("Cancel", self.cancel_slot()),
        ]));

        frame.render_widget(Paragraph::new(lines), area);
    }
}
