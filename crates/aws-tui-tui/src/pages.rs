// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::chrome::Chrome;
use crate::view::{Completion, Intent, View, ViewContext};
use aws_tui_app::{
    Action, Chord, Key, KeyAction, REFRESH, RETURN_TO_TOP, active_key_actions, find_key_action,
};

struct Page {
    serial: u64,
    name: String,
    view: Box<dyn View>,
}

/// Things the stack cannot act on by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Status(String),
    SearchPending { page: u64, token: u64 },
}

/// The page stack. The root page is never removed.
pub struct Pages {
    pages: Vec<Page>,
    modal: Option<String>,
    chrome: Option<Chrome>,
    chrome_renders: u64,
    next_serial: u64,
    signals: Vec<Signal>,
}

impl Pages {
    pub fn new(root: Box<dyn View>, cx: &mut ViewContext<'_>) -> Self {
        let mut pages = Self {
            pages: Vec::new(),
            modal: None,
            chrome: None,
            chrome_renders: 0,
            next_serial: 0,
            signals: Vec::new(),
        };
        pages.push_and_switch(root, cx);
        pages
    }

    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.name.as_str()).collect()
    }

    pub fn active_name(&self) -> &str {
        self.pages.last().map_or("", |page| page.name.as_str())
    }

    pub fn active(&self) -> Option<&dyn View> {
        self.pages.last().map(|page| page.view.as_ref())
    }

    pub fn modal(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    pub fn chrome(&self) -> Option<&Chrome> {
        self.chrome.as_ref()
    }

    pub fn chrome_renders(&self) -> u64 {
        self.chrome_renders
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Local actions of the active view followed by the globals.
    pub fn active_key_actions(&self) -> Vec<KeyAction> {
        let local = self
            .pages
            .last()
            .map(|page| page.view.key_actions())
            .unwrap_or_default();
        active_key_actions(&local)
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.modal = Some(message.into());
    }

    pub fn push_and_switch(&mut self, mut view: Box<dyn View>, cx: &mut ViewContext<'_>) {
        if let Err(error) = view.render(cx) {
            tracing::warn!(service = view.service(), error = %error, "render failed");
            self.show_error(format!("{error:#}"));
        }
        let name = format!(
            "{} | {} | {}",
            self.pages.len(),
            view.service(),
            view.labels().join(" > ")
        );
        tracing::debug!(page = %name, "push page");
        self.pages.push(Page {
            serial: self.next_serial,
            name,
            view,
        });
        self.next_serial += 1;
        self.render_chrome(cx);
    }

    pub fn close(&mut self, cx: &mut ViewContext<'_>) {
        if self.pages.len() <= 1 {
            return;
        }
        if let Some(page) = self.pages.pop() {
            tracing::debug!(page = %page.name, "close page");
        }
        self.render_chrome(cx);
    }

    pub fn return_to_top(&mut self, cx: &mut ViewContext<'_>) {
        if self.pages.len() <= 1 {
            return;
        }
        self.pages.truncate(1);
        tracing::debug!("return to top");
        self.render_chrome(cx);
    }

    pub fn refresh(&mut self, cx: &mut ViewContext<'_>) {
        if let Some(page) = self.pages.last_mut()
            && let Err(error) = page.view.render(cx)
        {
            tracing::warn!(page = %page.name, error = %error, "refresh failed");
            self.modal = Some(format!("{error:#}"));
        }
        self.render_chrome(cx);
    }

    /// Routes one chord: modal, then stack navigation, then key actions,
    /// then the active view.
    pub fn handle_key(&mut self, chord: Chord, cx: &mut ViewContext<'_>) {
        if self.modal.is_some() {
            if matches!(chord.key, Key::Enter | Key::Esc) {
                self.modal = None;
            }
            return;
        }

        if chord.key == Key::Esc && self.pages.len() > 1 {
            self.close(cx);
            return;
        }
        if REFRESH.matches(chord) {
            self.refresh(cx);
            return;
        }
        if RETURN_TO_TOP.matches(chord) {
            self.return_to_top(cx);
            return;
        }
        if chord.key != Key::Enter && chord.key != Key::Esc {
            let capturing = self
                .pages
                .last()
                .is_some_and(|page| page.view.captures_text());
            if !capturing
                && let Some(action) = find_key_action(&self.active_key_actions(), chord)
            {
                self.invoke(action, cx);
                return;
            }
        }

        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let serial = page.serial;
        let intents = page.view.handle_key(chord, cx);
        self.apply(serial, intents, cx);
    }

    /// Clears the type-ahead buffer of `page` if `token` is still current.
    pub fn expire_search(&mut self, page: u64, token: u64) -> bool {
        self.pages
            .iter_mut()
            .find(|entry| entry.serial == page)
            .is_some_and(|entry| entry.view.expire_search(token))
    }

    fn invoke(&mut self, action: KeyAction, cx: &mut ViewContext<'_>) {
        match action.action {
            Action::Refresh => self.refresh(cx),
            Action::ReturnToTop => self.return_to_top(cx),
            Action::Local(id) => {
                let Some(page) = self.pages.last_mut() else {
                    return;
                };
                let serial = page.serial;
                let intents = page.view.on_action(id, cx);
                self.apply(serial, intents, cx);
            }
        }
    }

    fn apply(&mut self, source: u64, intents: Vec<Intent>, cx: &mut ViewContext<'_>) {
        for intent in intents {
            match intent {
                Intent::Push(view) => self.push_and_switch(view, cx),
                Intent::Close => self.close(cx),
                Intent::Complete(completion) => self.complete(completion, cx),
                Intent::Error(message) => self.show_error(message),
                Intent::Status(message) => self.signals.push(Signal::Status(message)),
                Intent::SearchPending { token } => self.signals.push(Signal::SearchPending {
                    page: source,
                    token,
                }),
            }
        }
    }

    fn complete(&mut self, completion: Completion, cx: &mut ViewContext<'_>) {
        if self.pages.len() > 1 {
            self.pages.pop();
        }
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let serial = page.serial;
        let intents = page.view.on_complete(completion, cx);
        self.render_chrome(cx);
        self.apply(serial, intents, cx);
    }

    fn render_chrome(&mut self, cx: &mut ViewContext<'_>) {
        let actions = self.active_key_actions();
        self.chrome = Some(Chrome::build(&mut *cx.runtime, &actions));
        self.chrome_renders += 1;
    }
}
