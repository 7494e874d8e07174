// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Session-wide state that outlives any single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub status_line: Option<String>,
    pub status_token: u64,
    pub quit_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetStatus(String),
    ClearStatus { token: u64 },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    StatusUpdated { message: String, token: u64 },
    StatusCleared,
    QuitRequested,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SetStatus(message) => {
                self.status_token = self.status_token.wrapping_add(1);
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated {
                    message,
                    token: self.status_token,
                }]
            }
            AppCommand::ClearStatus { token } => {
                if token != self.status_token || self.status_line.is_none() {
                    return Vec::new();
                }
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
            AppCommand::Quit => {
                self.quit_requested = true;
                vec![AppEvent::QuitRequested]
            }
        }
    }
}
