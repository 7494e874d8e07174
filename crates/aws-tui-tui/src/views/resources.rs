// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::view::{Intent, View, ViewContext};
use crate::widgets::draw_filter_table;
use anyhow::Result;
use aws_tui_app::{Chord, Endpoint, FilterTable};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Read-only table for catalog endpoints without a dedicated screen.
pub struct ResourceListView {
    endpoint: Endpoint,
    table: FilterTable,
}

impl ResourceListView {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            table: FilterTable::new(["NAME"]),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }
}

impl View for ResourceListView {
    fn service(&self) -> &str {
        self.endpoint.service()
    }

    fn labels(&self) -> Vec<String> {
        vec![self.endpoint.view().to_owned()]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        let listing = cx.runtime.list_resources(self.endpoint)?;
        if listing.headers != self.table.headers() {
            self.table = FilterTable::new(listing.headers);
        }
        self.table.set_rows(listing.rows);
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        self.table.handle_key(chord);
        Vec::new()
    }

    fn captures_text(&self) -> bool {
        self.table.is_editing()
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        draw_filter_table(frame, area, &self.table);
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceListView;
    use crate::testing::{TestRuntime, context};
    use crate::view::View;
    use anyhow::Result;
    use aws_tui_app::{Chord, Endpoint, Key, SettingsStore};
    use aws_tui_testkit::row;

    fn instances() -> Endpoint {
        Endpoint::lookup("EC2", "Instances").unwrap_or_else(|| panic!("EC2 Instances in catalog"))
    }

    #[test]
    fn headers_follow_the_listing() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = ResourceListView::new(instances());
        view.render(&mut cx)?;
        assert_eq!(view.table().headers(), ["ID", "NAME", "STATE"]);
        assert_eq!(view.table().rows().len(), 2);

        view.render(&mut cx)?;
        assert_eq!(view.table().rows().len(), 2);
        assert_eq!(view.table().selected(), Some(0));
        Ok(())
    }

    #[test]
    fn filter_keeps_matching_rows() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = ResourceListView::new(instances());
        view.render(&mut cx)?;

        view.handle_key(Chord::ch('/'), &mut cx);
        assert!(view.captures_text());
        for rune in "STOPPED".chars() {
            view.handle_key(Chord::ch(rune), &mut cx);
        }
        view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(!view.captures_text());
        assert_eq!(
            view.table().displayed_rows().collect::<Vec<_>>(),
            [row(&["i-0bbb", "batch", "stopped"])]
        );
        Ok(())
    }

    #[test]
    fn unknown_endpoints_render_empty() -> Result<()> {
        let mut runtime = TestRuntime::default();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = ResourceListView::new(instances());
        view.render(&mut cx)?;
        assert_eq!(view.table().headers(), ["NAME"]);
        assert_eq!(view.table().displayed_len(), 0);
        Ok(())
    }
}
