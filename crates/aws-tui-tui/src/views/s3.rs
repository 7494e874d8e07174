// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::{ChangeDirectoryForm, DownloadForm, UploadForm};
use crate::view::{Completion, Intent, View, ViewContext, rerender};
use crate::widgets::{draw_filter_table, draw_tree};
use anyhow::{Context, Result};
use aws_tui_app::{
    Bucket, Chord, FilterTable, Key, KeyAction, NodeId, TableEvent, TreeEvent, TreeModel,
    TypeAhead, format_size, object_base_name, parent_prefix,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};
use std::fs;
use std::path::{Path, PathBuf};

const VIEW_OBJECT: &str = "view-object";
const SHOW_METADATA: &str = "show-metadata";
const SHOW_TAGS: &str = "show-tags";
const UPLOAD: &str = "upload";
const DOWNLOAD: &str = "download";
const CHANGE_DIRECTORY: &str = "change-directory";

pub struct BucketsView {
    table: FilterTable,
    buckets: Vec<Bucket>,
}

impl BucketsView {
    pub fn new() -> Self {
        Self {
            table: FilterTable::new(["NAME", "CREATED"]),
            buckets: Vec::new(),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }
}

impl Default for BucketsView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for BucketsView {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec!["Buckets".to_owned()]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.buckets = cx.runtime.list_buckets()?;
        self.table.set_rows(
            self.buckets
                .iter()
                .map(|bucket| vec![bucket.name.clone(), bucket.created_label()])
                .collect(),
        );
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.table.handle_key(chord) {
            TableEvent::Selected(index) => match self.buckets.get(index) {
                Some(bucket) => vec![Intent::Push(Box::new(ObjectsView::new(&bucket.name)))],
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

/// What an objects tree node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectNode {
    Prefix(String),
    Object(String),
}

/// Lazily expanded prefix tree of one bucket.
pub struct ObjectsView {
    bucket: String,
    tree: TreeModel<ObjectNode>,
    search: TypeAhead,
    upload_prefix: String,
}

impl ObjectsView {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_owned(),
            tree: Self::fresh_tree(bucket),
            search: TypeAhead::default(),
            upload_prefix: String::new(),
        }
    }

    fn fresh_tree(bucket: &str) -> TreeModel<ObjectNode> {
        let mut tree = TreeModel::new(format!("{bucket}/"), true);
        let root = tree.root();
        tree.node_mut(root).reference = Some(ObjectNode::Prefix(String::new()));
        tree.select(root);
        tree
    }

    pub fn tree(&self) -> &TreeModel<ObjectNode> {
        &self.tree
    }

    fn selected(&self) -> Option<&ObjectNode> {
        self.tree
            .selected_node()
            .and_then(|node| node.reference.as_ref())
    }

    fn selected_key(&self) -> Option<&str> {
        match self.selected() {
            Some(ObjectNode::Object(key)) => Some(key),
            _ => None,
        }
    }

    /// The focused directory, or the directory holding the focused object.
    pub fn upload_prefix(&self) -> String {
        match self.selected() {
            Some(ObjectNode::Prefix(prefix)) => prefix.clone(),
            Some(ObjectNode::Object(key)) => parent_prefix(key).to_owned(),
            None => String::new(),
        }
    }

    fn load(&mut self, node: NodeId, prefix: &str, cx: &mut ViewContext<'_>) -> Result<()> {
        let listing = cx.runtime.list_objects(&self.bucket, prefix)?;
        self.tree.clear_children(node);
        for child in listing.prefixes {
            let label = child.strip_prefix(prefix).unwrap_or(&child).to_owned();
            self.tree
                .add_child(node, label, Some(ObjectNode::Prefix(child)), true);
        }
        for key in listing.keys {
            let label = object_base_name(&key).to_owned();
            self.tree
                .add_child(node, label, Some(ObjectNode::Object(key)), true);
        }
        self.tree.set_expanded(node, true);
        Ok(())
    }

    fn activate(&mut self, id: NodeId, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.tree.node(id).reference.clone() {
            Some(ObjectNode::Prefix(prefix)) => match self.load(id, &prefix, cx) {
                Ok(()) => Vec::new(),
                Err(error) => {
                    tracing::warn!(bucket = %self.bucket, prefix = %prefix, error = %error, "list objects failed");
                    vec![Intent::Error(format!("{error:#}"))]
                }
            },
            Some(ObjectNode::Object(key)) => {
                vec![Intent::Push(Box::new(ObjectView::new(&self.bucket, &key)))]
            }
            None => Vec::new(),
        }
    }

    /// Re-lists the directory an uploaded key landed in, or the whole
    /// bucket when that directory was never opened.
    fn reload_for(&mut self, key: &str, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let prefix = parent_prefix(key);
        let loaded = self.tree.find(|node| {
            node.reference == Some(ObjectNode::Prefix(prefix.to_owned())) && node.expanded
        });
        let Some(node) = loaded else {
            return rerender(self, cx);
        };
        match self.load(node, prefix, cx) {
            Ok(()) => Vec::new(),
            Err(error) => {
                tracing::warn!(bucket = %self.bucket, prefix, error = %error, "list objects failed");
                vec![Intent::Error(format!("{error:#}"))]
            }
        }
    }
}

impl View for ObjectsView {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec!["Buckets".to_owned(), self.bucket.clone()]
    }

    fn key_actions(&self) -> Vec<KeyAction> {
        vec![
            KeyAction::local(Chord::ch('v'), "View Object", VIEW_OBJECT),
            KeyAction::local(Chord::ch('m'), "Metadata", SHOW_METADATA),
            KeyAction::local(Chord::ch('T'), "Tags", SHOW_TAGS),
            KeyAction::local(Chord::ch('u'), "Upload", UPLOAD),
            KeyAction::local(Chord::ch('d'), "Download", DOWNLOAD),
            KeyAction::local(Chord::ch('c'), "Change Local Dir", CHANGE_DIRECTORY),
        ]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.tree = Self::fresh_tree(&self.bucket);
        self.search.clear();
        let root = self.tree.root();
        self.load(root, "", cx)
    }

    fn handle_key(&mut self, chord: Chord, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.tree.handle_key(chord, &mut self.search) {
            TreeEvent::SearchChanged { token } => vec![Intent::SearchPending { token }],
            TreeEvent::Activated(id) => self.activate(id, cx),
            TreeEvent::Ignored | TreeEvent::Moved | TreeEvent::Toggled { .. } => Vec::new(),
        }
    }

    fn on_action(&mut self, id: &'static str, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match id {
            UPLOAD => {
                self.upload_prefix = self.upload_prefix();
                return vec![Intent::Push(Box::new(FileSelectorView::new(
                    cx.settings.local_directory(),
                )))];
            }
            CHANGE_DIRECTORY => {
                return vec![Intent::Push(Box::new(ChangeDirectoryForm::new(
                    &cx.settings.local_directory(),
                )))];
            }
            _ => {}
        }

        let Some(key) = self.selected_key() else {
            return vec![Intent::Status("Select an object first".to_owned())];
        };
        let bucket = self.bucket.as_str();
        let view: Box<dyn View> = match id {
            VIEW_OBJECT => Box::new(ObjectView::new(bucket, key)),
            SHOW_METADATA => Box::new(ObjectPropertiesView::metadata(bucket, key)),
            SHOW_TAGS => Box::new(ObjectPropertiesView::tags(bucket, key)),
            DOWNLOAD => Box::new(DownloadForm::new(
                bucket,
                key,
                &cx.settings.local_directory(),
            )),
            _ => return Vec::new(),
        };
        vec![Intent::Push(view)]
    }

    fn on_complete(&mut self, completion: Completion, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match completion {
            Completion::FileChosen(path) => vec![Intent::Push(Box::new(UploadForm::new(
                &self.bucket,
                &self.upload_prefix,
                &path,
            )))],
            Completion::ObjectUploaded { key } => {
                let mut intents = self.reload_for(&key, cx);
                intents.push(Intent::Status(format!("Uploaded s3://{}/{key}", self.bucket)));
                intents
            }
            Completion::ObjectDownloaded(path) => {
                vec![Intent::Status(format!("Downloaded to {}", path.display()))]
            }
            Completion::DirectoryChanged(path) => {
                vec![Intent::Status(format!("Local directory: {}", path.display()))]
            }
            Completion::RecordsChanged { .. } => Vec::new(),
        }
    }

    fn captures_text(&self) -> bool {
        self.search.is_active()
    }

    fn expire_search(&mut self, token: u64) -> bool {
        self.search.expire(token)
    }

    fn search_title(&self) -> Option<String> {
        self.search.title()
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        draw_tree(frame, area, &self.tree, |node| match node.reference {
            Some(ObjectNode::Prefix(_)) => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::White),
        });
    }
}

/// Object body as text.
pub struct ObjectView {
    bucket: String,
    key: String,
    body: String,
    scroll: u16,
}

impl ObjectView {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            body: String::new(),
            scroll: 0,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn line_count(&self) -> u16 {
        u16::try_from(self.body.lines().count()).unwrap_or(u16::MAX)
    }
}

impl View for ObjectView {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec![
            "Buckets".to_owned(),
            self.bucket.clone(),
            self.key.clone(),
        ]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        let body = cx.runtime.get_object(&self.bucket, &self.key)?;
        self.body = String::from_utf8_lossy(&body).into_owned();
        self.scroll = 0;
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let last = self.line_count().saturating_sub(1);
        self.scroll = match chord.key {
            Key::Up | Key::Char('k') => self.scroll.saturating_sub(1),
            Key::Down | Key::Char('j') => self.scroll.saturating_add(1).min(last),
            Key::PageUp => self.scroll.saturating_sub(10),
            Key::PageDown => self.scroll.saturating_add(10).min(last),
            Key::Home => 0,
            Key::End => last,
            _ => return Vec::new(),
        };
        Vec::new()
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        let body = Paragraph::new(self.body.as_str())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(body, area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyKind {
    Metadata,
    Tags,
}

/// KEY/VALUE table of an object's metadata or tags.
pub struct ObjectPropertiesView {
    bucket: String,
    key: String,
    kind: PropertyKind,
    table: FilterTable,
}

impl ObjectPropertiesView {
    pub fn metadata(bucket: &str, key: &str) -> Self {
        Self::new(bucket, key, PropertyKind::Metadata)
    }

    pub fn tags(bucket: &str, key: &str) -> Self {
        Self::new(bucket, key, PropertyKind::Tags)
    }

    fn new(bucket: &str, key: &str, kind: PropertyKind) -> Self {
        Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            kind,
            table: FilterTable::new(["KEY", "VALUE"]),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }
}

impl View for ObjectPropertiesView {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        let last = match self.kind {
            PropertyKind::Metadata => "Metadata",
            PropertyKind::Tags => "Tags",
        };
        vec![
            "Buckets".to_owned(),
            self.bucket.clone(),
            self.key.clone(),
            last.to_owned(),
        ]
    }

    fn render(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        let entries = match self.kind {
            PropertyKind::Metadata => cx.runtime.object_metadata(&self.bucket, &self.key)?,
            PropertyKind::Tags => cx.runtime.object_tags(&self.bucket, &self.key)?,
        };
        self.table.set_rows(
            entries
                .into_iter()
                .map(|entry| vec![entry.key, entry.value])
                .collect(),
        );
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

/// Regular, non-hidden files of the local directory.
pub struct FileSelectorView {
    directory: PathBuf,
    files: Vec<PathBuf>,
    table: FilterTable,
}

impl FileSelectorView {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            files: Vec::new(),
            table: FilterTable::new(["FILE NAME", "SIZE"]),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }
}

fn list_local_files(directory: &Path) -> Result<Vec<(String, u64)>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("read directory {}", directory.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", directory.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let metadata = entry
            .metadata()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if metadata.is_file() {
            files.push((name, metadata.len()));
        }
    }
    files.sort();
    Ok(files)
}

impl View for FileSelectorView {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec![
            "Select File".to_owned(),
            self.directory.display().to_string(),
        ]
    }

    fn render(&mut self, _cx: &mut ViewContext<'_>) -> Result<()> {
        let files = list_local_files(&self.directory)?;
        self.files = files
            .iter()
            .map(|(name, _)| self.directory.join(name))
            .collect();
        self.table.set_rows(
            files
                .into_iter()
                .map(|(name, size)| vec![name, format_size(size)])
                .collect(),
        );
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.table.handle_key(chord) {
            TableEvent::Selected(index) => match self.files.get(index) {
                Some(path) => vec![Intent::Complete(Completion::FileChosen(path.clone()))],
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

#[cfg(test)]
mod tests {
    use super::{BucketsView, FileSelectorView, ObjectNode, ObjectPropertiesView, ObjectView, ObjectsView};
    use crate::testing::{TestRuntime, context};
    use crate::view::{Completion, Intent, View};
    use anyhow::Result;
    use aws_tui_app::{Chord, Key, SettingsStore};
    use aws_tui_testkit::{TempHome, row};

    fn labels_of(view: &ObjectsView) -> Vec<String> {
        view.tree()
            .visible_rows()
            .into_iter()
            .map(|(id, _)| view.tree().node(id).label.clone())
            .collect()
    }

    fn select(view: &mut ObjectsView, runtime: &mut TestRuntime, query: &str) {
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(runtime, &mut settings, None);
        for rune in query.chars() {
            view.handle_key(Chord::ch(rune), &mut cx);
        }
        view.handle_key(Chord::plain(Key::Esc), &mut cx);
    }

    #[test]
    fn default_buckets_view_starts_empty() {
        let view = BucketsView::default();
        assert_eq!(view.table().headers(), ["NAME", "CREATED"]);
        assert!(view.table().rows().is_empty());
    }

    #[test]
    fn buckets_open_their_objects() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = BucketsView::new();
        view.render(&mut cx)?;
        assert_eq!(view.table().rows()[0], row(&["demo-assets", "2026-01-15 09:30:00"]));

        view.handle_key(Chord::plain(Key::Down), &mut cx);
        let intents = view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Push(objects)] if objects.labels() == ["Buckets", "demo-logs"]
        ));
        Ok(())
    }

    #[test]
    fn directories_load_on_enter() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut view = ObjectsView::new("demo-assets");
        {
            let mut settings = SettingsStore::in_memory();
            let mut cx = context(&mut runtime, &mut settings, None);
            view.render(&mut cx)?;
        }
        assert_eq!(labels_of(&view), ["demo-assets/", "css/", "index.html"]);

        select(&mut view, &mut runtime, "css");
        assert_eq!(view.upload_prefix(), "css/");
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert_eq!(
            labels_of(&view),
            ["demo-assets/", "css/", "site.css", "index.html"]
        );
        Ok(())
    }

    #[test]
    fn unrelated_prefixes_keep_their_full_name() -> Result<()> {
        let mut runtime = TestRuntime {
            stray_prefixes: vec!["zz/".to_owned()],
            ..TestRuntime::with_sample_data()
        };
        let mut view = ObjectsView::new("demo-assets");
        {
            let mut settings = SettingsStore::in_memory();
            let mut cx = context(&mut runtime, &mut settings, None);
            view.render(&mut cx)?;
        }
        select(&mut view, &mut runtime, "css");
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert_eq!(
            labels_of(&view),
            ["demo-assets/", "css/", "zz/", "site.css", "zz/", "index.html"]
        );
        Ok(())
    }

    #[test]
    fn upload_prefix_follows_the_focused_object() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut view = ObjectsView::new("demo-assets");
        let mut settings = SettingsStore::in_memory();
        {
            let mut cx = context(&mut runtime, &mut settings, None);
            view.render(&mut cx)?;
            view.handle_key(Chord::plain(Key::Down), &mut cx);
            view.handle_key(Chord::plain(Key::Enter), &mut cx);
            view.handle_key(Chord::plain(Key::Down), &mut cx);
        }
        assert_eq!(
            view.tree().selected_node().and_then(|node| node.reference.clone()),
            Some(ObjectNode::Object("css/site.css".to_owned()))
        );
        assert_eq!(view.upload_prefix(), "css/");

        let mut cx = context(&mut runtime, &mut settings, None);
        let intents = view.on_action("upload", &mut cx);
        assert!(matches!(intents.as_slice(), [Intent::Push(selector)] if selector.labels()[0] == "Select File"));
        let intents = view.on_complete(
            Completion::FileChosen("/tmp/new.css".into()),
            &mut cx,
        );
        assert!(matches!(
            intents.as_slice(),
            [Intent::Push(form)] if form.labels() == ["demo-assets", "Upload"]
        ));
        Ok(())
    }

    #[test]
    fn object_actions_need_an_object() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = ObjectsView::new("demo-assets");
        view.render(&mut cx)?;
        let intents = view.on_action("view-object", &mut cx);
        assert!(matches!(intents.as_slice(), [Intent::Status(_)]));
        Ok(())
    }

    #[test]
    fn uploaded_keys_reload_their_directory() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut view = ObjectsView::new("demo-assets");
        {
            let mut settings = SettingsStore::in_memory();
            let mut cx = context(&mut runtime, &mut settings, None);
            view.render(&mut cx)?;
        }
        runtime.add_object("demo-assets", "robots.txt", "User-agent: *");
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let intents = view.on_complete(
            Completion::ObjectUploaded {
                key: "robots.txt".to_owned(),
            },
            &mut cx,
        );
        assert!(matches!(
            intents.as_slice(),
            [Intent::Status(message)] if message == "Uploaded s3://demo-assets/robots.txt"
        ));
        assert!(labels_of(&view).contains(&"robots.txt".to_owned()));
        Ok(())
    }

    #[test]
    fn object_body_scrolls_within_bounds() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = ObjectView::new("demo-assets", "index.html");
        view.render(&mut cx)?;
        assert!(view.body().starts_with("<html>"));
        view.handle_key(Chord::plain(Key::PageDown), &mut cx);
        assert_eq!(view.scroll(), 1);
        view.handle_key(Chord::plain(Key::Home), &mut cx);
        assert_eq!(view.scroll(), 0);
        Ok(())
    }

    #[test]
    fn properties_list_metadata_and_tags() -> Result<()> {
        let mut runtime = TestRuntime::with_sample_data();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut tags = ObjectPropertiesView::tags("demo-assets", "index.html");
        tags.render(&mut cx)?;
        assert_eq!(tags.table().rows(), [row(&["team", "web"])]);

        let mut metadata = ObjectPropertiesView::metadata("demo-assets", "index.html");
        metadata.render(&mut cx)?;
        assert_eq!(metadata.table().headers(), ["KEY", "VALUE"]);
        assert_eq!(metadata.table().rows()[0][0], "Content-Type");
        Ok(())
    }

    #[test]
    fn file_selector_skips_hidden_and_directories() -> Result<()> {
        let home = TempHome::new()?;
        home.write_file("b.txt", vec![b'x'; 2048])?;
        home.write_file("a.txt", "hello")?;
        home.write_file(".hidden", "secret")?;
        home.dir("nested")?;

        let mut runtime = TestRuntime::default();
        let mut settings = SettingsStore::in_memory();
        let mut cx = context(&mut runtime, &mut settings, None);
        let mut view = FileSelectorView::new(home.path().to_path_buf());
        view.render(&mut cx)?;
        assert_eq!(
            view.table().rows(),
            [row(&["a.txt", "5 B"]), row(&["b.txt", "2.0 KB"])]
        );

        view.handle_key(Chord::plain(Key::Down), &mut cx);
        let intents = view.handle_key(Chord::plain(Key::Enter), &mut cx);
        assert!(matches!(
            intents.as_slice(),
            [Intent::Complete(Completion::FileChosen(path))] if *path == home.path().join("b.txt")
        ));
        Ok(())
    }
}
