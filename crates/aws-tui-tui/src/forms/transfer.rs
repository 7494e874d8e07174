// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{Form, FormEvent};
use crate::view::{Completion, Intent, View, ViewContext};
use anyhow::Result;
use aws_tui_app::{Chord, DownloadRequest, ObjectAcl, UploadRequest};
use ratatui::Frame;
use ratatui::layout::Rect;
use std::path::Path;

const UPLOAD_KEY: usize = 1;
const UPLOAD_CONTENT_TYPE: usize = 2;
const UPLOAD_ACL: usize = 3;
const DOWNLOAD_FILE_NAME: usize = 2;

/// Sends one local file to a bucket.
pub struct UploadForm {
    defaults: UploadRequest,
    form: Form,
}

impl UploadForm {
    pub fn new(bucket: &str, prefix: &str, local_path: &Path) -> Self {
        let defaults = UploadRequest::for_file(bucket, prefix, local_path);
        let acl_index = ObjectAcl::ALL
            .iter()
            .position(|acl| *acl == defaults.acl)
            .unwrap_or(0);
        let form = Form::new(" Upload Object ", "Upload")
            .read_only("Local File", local_path.display().to_string())
            .input("Key", defaults.key.clone())
            .input("Content Type", defaults.content_type.clone())
            .choice("ACL", ObjectAcl::ALL.map(ObjectAcl::as_str), acl_index);
        Self { defaults, form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn request(&self) -> UploadRequest {
        UploadRequest {
            key: self.form.value(UPLOAD_KEY).trim().to_owned(),
            content_type: self.form.value(UPLOAD_CONTENT_TYPE).trim().to_owned(),
            acl: ObjectAcl::ALL
                .get(self.form.choice_index(UPLOAD_ACL))
                .copied()
                .unwrap_or(ObjectAcl::Private),
            ..self.defaults.clone()
        }
    }

    fn submit(&self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let request = self.request();
        if let Err(error) = request.validate() {
            return vec![Intent::Error(error.to_string())];
        }
        if let Err(error) = cx.runtime.upload_object(&request) {
            tracing::warn!(bucket = %request.bucket, key = %request.key, error = %error, "upload failed");
            return vec![Intent::Error(format!("Upload failed: {error:#}"))];
        }
        tracing::info!(bucket = %request.bucket, key = %request.key, "object uploaded");
        vec![Intent::Complete(Completion::ObjectUploaded { key: request.key })]
    }
}

impl View for UploadForm {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec![self.defaults.bucket.clone(), "Upload".to_owned()]
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

/// Saves one object into the local directory.
pub struct DownloadForm {
    defaults: DownloadRequest,
    form: Form,
}

impl DownloadForm {
    pub fn new(bucket: &str, key: &str, directory: &Path) -> Self {
        let defaults = DownloadRequest::new(bucket, key, directory);
        let form = Form::new(" Download Object ", "Download")
            .read_only("Key", key)
            .read_only("Local Directory", directory.display().to_string())
            .input("File Name", defaults.file_name.clone());
        Self { defaults, form }
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn request(&self) -> DownloadRequest {
        DownloadRequest {
            file_name: self.form.value(DOWNLOAD_FILE_NAME).trim().to_owned(),
            ..self.defaults.clone()
        }
    }

    fn submit(&self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let request = self.request();
        if let Err(error) = request.validate() {
            return vec![Intent::Error(error.to_string())];
        }
        let destination = request.destination();
        if let Err(error) = cx.runtime.download_object(&request) {
            tracing::warn!(key = %request.key, path = %destination.display(), error = %error, "download failed");
            return vec![Intent::Error(format!("Download failed: {error:#}"))];
        }
        tracing::info!(key = %request.key, path = %destination.display(), "object downloaded");
        vec![Intent::Complete(Completion::ObjectDownloaded(destination))]
    }
}

impl View for DownloadForm {
    fn service(&self) -> &str {
        "S3"
    }

    fn labels(&self) -> Vec<String> {
        vec![self.defaults.bucket.clone(), "Download".to_owned()]
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
