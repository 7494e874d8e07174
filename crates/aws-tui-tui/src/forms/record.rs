// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{Form, FormEvent};
use crate::view::{Completion, Intent, View, ViewContext};
use anyhow::Result;
use aws_tui_app::{
    Chord, HostedZone, RecordFormInput, RecordMode, RecordSet, RecordType, record_changes,
};
use ratatui::Frame;
use ratatui::layout::Rect;

const NAME: usize = 0;
const TYPE: usize = 1;
const TTL: usize = 2;
const VALUE: usize = 3;

/// Create, update or delete one record set in a hosted zone.
pub struct RecordForm {
    mode: RecordMode,
    zone: HostedZone,
    existing: Option<RecordSet>,
    form: Form,
}

impl RecordForm {
    pub fn create(zone: HostedZone) -> Self {
        Self::build(RecordMode::Create, zone, None)
    }

    pub fn update(zone: HostedZone, record: RecordSet) -> Self {
        Self::build(RecordMode::Update, zone, Some(record))
    }

    pub fn delete(zone: HostedZone, record: RecordSet) -> Self {
        Self::build(RecordMode::Delete, zone, Some(record))
    }

    fn build(mode: RecordMode, zone: HostedZone, existing: Option<RecordSet>) -> Self {
        let input = existing
            .as_ref()
            .map_or_else(RecordFormInput::blank, |record| {
                RecordFormInput::from_record(record, &zone.name)
            });
        let kind_index = RecordType::ALL
            .iter()
            .position(|kind| *kind == input.kind)
            .unwrap_or(0);
        let name_label = format!("Name (.{})", zone.name.trim_end_matches('.'));

        let form = Form::new(mode.title(), mode.button());
        let form = match mode {
            RecordMode::Delete => form
                .read_only(name_label, input.name)
                .read_only("Type", input.kind.as_str())
                .read_only("TTL", input.ttl)
                .read_only("Value", input.value),
            RecordMode::Create | RecordMode::Update => form
                .input(name_label, input.name)
                .choice("Type", RecordType::ALL.map(RecordType::as_str), kind_index)
                .input("TTL", input.ttl)
                .text_area("Value", input.value),
        };
        Self {
            mode,
            zone,
            existing,
            form,
        }
    }

    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    fn submitted(&self) -> Result<Option<RecordSet>> {
        if self.mode == RecordMode::Delete {
            return Ok(None);
        }
        let input = RecordFormInput {
            name: self.form.value(NAME).to_owned(),
            kind: RecordType::ALL
                .get(self.form.choice_index(TYPE))
                .copied()
                .unwrap_or(RecordType::A),
            ttl: self.form.value(TTL).to_owned(),
            value: self.form.value(VALUE).to_owned(),
        };
        input.validate(&self.zone.name).map(Some)
    }

    fn submit(&self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let submitted = match self.submitted() {
            Ok(record) => record,
            Err(error) => return vec![Intent::Error(error.to_string())],
        };
        let name = submitted
            .as_ref()
            .or(self.existing.as_ref())
            .map(|record| record.name.clone())
            .unwrap_or_default();
        let changes = match record_changes(self.mode, self.existing.as_ref(), submitted) {
            Ok(changes) => changes,
            Err(error) => return vec![Intent::Error(error.to_string())],
        };
        if let Err(error) = cx.runtime.change_records(&self.zone.id, &changes) {
            tracing::warn!(zone = %self.zone.id, error = %error, "record change failed");
            return vec![Intent::Error(format!(
                "{}: {error:#}",
                self.mode.failure_prefix()
            ))];
        }
        let verb = match self.mode {
            RecordMode::Create => "created",
            RecordMode::Update => "updated",
            RecordMode::Delete => "deleted",
        };
        tracing::info!(zone = %self.zone.id, record = %name, verb, "record change applied");
        vec![Intent::Complete(Completion::RecordsChanged {
            message: format!("Record {verb}: {name}"),
        })]
    }
}

impl View for RecordForm {
    fn service(&self) -> &str {
        "Route 53"
    }

    fn labels(&self) -> Vec<String> {
        vec![
            "Hosted Zones".to_owned(),
            self.zone.name.trim_end_matches('.').to_owned(),
            self.mode.button().to_owned(),
        ]
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

#[cfg(test)]
mod tests {
    use super::RecordForm;
    use crate::testing::{TestRuntime, context, sample_zone};
    use crate::view::{Completion, Intent, View};
    use aws_tui_app::{Chord, Key, RecordChange, RecordMode, RecordSet, RecordType, SettingsStore};

    fn submit(form: &mut RecordForm, runtime: &mut TestRuntime) -> Vec<Intent> {
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(runtime, &mut settings, None);
        form.form_mut().focus_on(4);
        form.handle_key(Chord::plain(Key::Enter), &mut cx)
    }

    fn existing() -> RecordSet {
        RecordSet::simple(
            "www.example.com.",
            RecordType::Cname,
            60,
            vec!["lb.example.net.".to_owned()],
        )
    }

    #[test]
    fn create_submits_a_single_change() {
        let mut runtime = TestRuntime::default();
        let mut form = RecordForm::create(sample_zone());
        form.form_mut().set_value(0, "api");
        form.form_mut().set_value(3, "10.0.0.1\n\n 10.0.0.2 ");

        let intents = submit(&mut form, &mut runtime);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Complete(Completion::RecordsChanged { message })]
                if message == "Record created: api.example.com."
        ));
        let [RecordChange::Create(record)] = runtime.changes[0].as_slice() else {
            panic!("expected one create, got {:?}", runtime.changes);
        };
        assert_eq!(record.ttl, Some(300));
        assert_eq!(record.values, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn update_prefills_relative_name() {
        let form = RecordForm::update(sample_zone(), existing());
        assert_eq!(form.form().value(0), "www");
        assert_eq!(form.form().choice_index(1), 2);
        assert_eq!(form.form().value(2), "60");
        assert_eq!(form.form().value(3), "lb.example.net.");
    }

    #[test]
    fn update_is_delete_then_create() {
        let mut runtime = TestRuntime::default();
        let mut form = RecordForm::update(sample_zone(), existing());
        form.form_mut().set_value(2, "120");
        submit(&mut form, &mut runtime);
        let batch = &runtime.changes[0];
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], RecordChange::Delete(existing()));
        let RecordChange::Create(created) = &batch[1] else {
            panic!("expected create, got {batch:?}");
        };
        assert_eq!(created.ttl, Some(120));
    }

    #[test]
    fn validation_errors_use_form_messages() {
        let mut runtime = TestRuntime::default();
        let mut form = RecordForm::create(sample_zone());
        form.form_mut().set_value(2, "soon");
        form.form_mut().set_value(3, "1.1.1.1");
        let intents = submit(&mut form, &mut runtime);
        assert!(matches!(intents.as_slice(), [Intent::Error(message)] if message == "Invalid TTL value"));

        form.form_mut().set_value(2, "300");
        form.form_mut().set_value(3, "");
        let intents = submit(&mut form, &mut runtime);
        assert!(matches!(intents.as_slice(), [Intent::Error(message)] if message == "Value is required"));

        form.form_mut().set_value(3, "  \n ");
        let intents = submit(&mut form, &mut runtime);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Error(message)] if message == "At least one value is required"
        ));
        assert!(runtime.changes.is_empty());
    }

    #[test]
    fn delete_is_read_only_and_prefixes_failures() {
        let mut runtime = TestRuntime {
            fail_changes: Some("throttled".to_owned()),
            ..TestRuntime::default()
        };
        let mut form = RecordForm::delete(sample_zone(), existing());
        assert_eq!(form.mode(), RecordMode::Delete);
        form.form_mut().focus_on(0);
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        form.handle_key(Chord::ch('x'), &mut cx);
        assert_eq!(form.form().value(0), "www");

        let intents = submit(&mut form, &mut runtime);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Error(message)] if message == "Failed to delete record: throttled"
        ));
    }

    #[test]
    fn cancel_closes_the_form() {
        let mut runtime = TestRuntime::default();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut form = RecordForm::create(sample_zone());
        form.form_mut().focus_on(5);
        let intents = form.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(matches!(intents.as_slice(), [Intent::Close]));
    }
}
