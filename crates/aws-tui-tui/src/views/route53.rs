// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::RecordForm;
use crate::view::{Completion, Intent, View, ViewContext, rerender};
use crate::widgets::draw_filter_table;
use anyhow::Result;
use aws_tui_app::{
    Chord, FilterTable, HOSTED_ZONE_HEADERS, HostedZone, KeyAction, RECORD_HEADERS, RecordSet,
    TableEvent,
};
use ratatui::Frame;
use ratatui::layout::Rect;

const CREATE_RECORD: &str = "create-record";

pub struct HostedZonesView {
    table: FilterTable,
    zones: Vec<HostedZone>,
}

impl HostedZonesView {
    pub fn new() -> Self {
        Self {
            table: FilterTable::new(HOSTED_ZONE_HEADERS),
            zones: Vec::new(),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }
}

impl Default for HostedZonesView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for HostedZonesView {
    fn service(&self) -> &str {
        "Route 53"
    }

    fn labels(&self) -> Vec<String> {
        vec!["Hosted Zones".to_owned()]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.zones = cx.runtime.list_hosted_zones()?;
        self.table.set_rows(
            self.zones
                .iter()
                .map(|zone| {
                    vec![
                        zone.short_id().to_owned(),
                        zone.name.clone(),
                        zone.record_count.to_string(),
                        zone.visibility().to_owned(),
                        zone.comment.clone(),
                    ]
                })
                .collect(),
        );
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.table.handle_key(chord) {
            TableEvent::Selected(index) => match self.zones.get(index) {
                Some(zone) => vec![Intent::Push(Box::new(RecordsView::new(zone.clone())))],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn captures_text(&self) -> bool {
        self.table.is_editing()
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        draw_filter_table(frame, area, &self.table);
    }
}

/// Record sets of one zone. Row indexes from the table always point into
/// `records`, filtered or not.
pub struct RecordsView {
    zone: HostedZone,
    records: Vec<RecordSet>,
    table: FilterTable,
}

impl RecordsView {
    pub fn new(zone: HostedZone) -> Self {
        Self {
            zone,
            records: Vec::new(),
            table: FilterTable::new(RECORD_HEADERS),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }

    pub fn records(&self) -> &[RecordSet] {
        &self.records
    }
}

impl View for RecordsView {
    fn service(&self) -> &str {
        "Route 53"
    }

    fn labels(&self) -> Vec<String> {
        vec![
            "Hosted Zones".to_owned(),
            self.zone.name.trim_end_matches('.').to_owned(),
        ]
    }

    fn key_actions(&self) -> Vec<KeyAction> {
        vec![KeyAction::local(
            Chord::ch('c'),
            "Create Record",
            CREATE_RECORD,
        )]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.records = cx.runtime.list_records(&self.zone.id)?;
        self.table
            .set_rows(self.records.iter().map(RecordSet::table_row).collect());
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let zone = self.zone.clone();
        match self.table.handle_key(chord) {
            TableEvent::Selected(index) => self
                .records
                .get(index)
                .map(|record| {
                    vec![Intent::Push(Box::new(RecordForm::update(
                        zone,
                        record.clone(),
                    )))]
                })
                .unwrap_or_default(),
            TableEvent::DeleteRequested(index) => self
                .records
                .get(index)
                .map(|record| {
                    vec![Intent::Push(Box::new(RecordForm::delete(
                        zone,
                        record.clone(),
                    )))]
                })
                .unwrap_or_default(),
            TableEvent::Ignored | TableEvent::Updated => Vec::new(),
        }
    }

    fn on_action(&mut self, id: &'static str, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match id {
            CREATE_RECORD => vec![Intent::Push(Box::new(RecordForm::create(
                self.zone.clone(),
            )))],
            _ => Vec::new(),
        }
    }

    fn on_complete(&mut self, completion: Completion, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let Completion::RecordsChanged { message } = completion else {
            return Vec::new();
        };
        let mut intents = rerender(self, cx);
        intents.push(Intent::Status(message));
        intents
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
    use super::{HostedZonesView, RecordsView};
    use crate::testing::{TestRuntime, context, sample_zone};
    use crate::view::{Completion, Intent, View};
    use anyhow::Result;
    use aws_tui_app::{Chord, Key, RecordChange, SettingsStore};
    use aws_tui_testkit::row;

    #[test]
    fn default_zones_view_starts_empty() {
        let view = HostedZonesView::default();
        assert_eq!(view.table().headers(), ["ID", "NAME", "RECORDS", "VISIBILITY", "DESCRIPTION"]);
        assert!(view.table().rows().is_empty());
    }

    #[test]
    fn zones_show_counts_and_visibility() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = HostedZonesView::new();
        view.render(&mut cx)?;
        assert_eq!(
            view.table().rows()[0],
            row(&["Z0DEMO", "example.com.", "3", "Public", "demo zone"])
        );
        let intents = view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Push(records)] if records.labels() == ["Hosted Zones", "example.com"]
        ));
        Ok(())
    }

    #[test]
    fn filtered_delete_targets_the_displayed_record() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = RecordsView::new(sample_zone());
        view.render(&mut cx)?;

        view.handle_key(Chord::ch('/'), &mut cx);
        for rune in "mail".chars() {
            view.handle_key(Chord::ch(rune), &mut cx);
        }
        view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert_eq!(view.table().displayed_len(), 1);

        let mut intents = view.handle_key(Chord::plain(Key::Delete), &mut cx);
        let Some(Intent::Push(mut form)) = intents.pop() else {
            panic!("expected a delete form");
        };
        form.handle_key(Chord::plain(Key::BackTab), &mut cx);
        form.handle_key(Chord::plain(Key::Left), &mut cx);
        let intents = form.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Complete(Completion::RecordsChanged { message })]
                if message == "Record deleted: mail.example.com."
        ));
        let [RecordChange::Delete(deleted)] = runtime.changes[0].as_slice() else {
            panic!("expected one delete, got {:?}", runtime.changes);
        };
        assert_eq!(deleted.name, "mail.example.com.");
        Ok(())
    }

    #[test]
    fn completion_refreshes_and_reports() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = RecordsView::new(sample_zone());
        view.render(&mut cx)?;
        let before = view.records().len();

        let intents = view.on_action("create-record", &mut cx);
        let [Intent::Push(form)] = intents.as_slice() else {
            panic!("expected a create form, got {intents:?}");
        };
        assert_eq!(form.labels()[2], "Create");

        cx.runtime.change_records(
            "/hostedzone/Z0DEMO",
            &[RecordChange::Delete(view.records()[0].clone())],
        )?;
        let intents = view.on_complete(
            Completion::RecordsChanged {
                message: "Record deleted: www.example.com.".to_owned(),
            },
            &mut cx,
        );
        assert!(matches!(intents.as_slice(), [Intent::Status(_)]));
        assert_eq!(view.records().len(), before - 1);
        Ok(())
    }
}
