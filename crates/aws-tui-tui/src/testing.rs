// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::AppRuntime;
use crate::view::ViewContext;
use anyhow::{Result, anyhow, bail};
use aws_tui_app::{
    Bucket, CallerIdentity, DownloadRequest, Endpoint, HostedZone, ObjectListing, RecordChange,
    RecordSet, RecordType, ResourceListing, SettingsStore, Tag, UploadRequest,
};
use aws_tui_testkit::{SAMPLE_ZONE, fixed_timestamp, row};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub const SAMPLE_ZONE_ID: &str = "/hostedzone/Z0DEMO";

pub fn sample_zone() -> HostedZone {
    HostedZone {
        id: SAMPLE_ZONE_ID.to_owned(),
        name: SAMPLE_ZONE.to_owned(),
        record_count: 3,
        private: false,
        comment: "demo zone".to_owned(),
    }
}

/// In-memory runtime that records every mutation it is asked for.
#[derive(Debug, Default)]
pub struct TestRuntime {
    pub identity: Option<CallerIdentity>,
    pub aliases: Vec<String>,
    pub region: Option<String>,
    pub buckets: Vec<Bucket>,
    pub objects: BTreeMap<(String, String), Vec<u8>>,
    pub tags: BTreeMap<(String, String), Vec<Tag>>,
    pub zones: Vec<HostedZone>,
    pub records: BTreeMap<String, Vec<RecordSet>>,
    pub resources: BTreeMap<Endpoint, ResourceListing>,
    pub changes: Vec<Vec<RecordChange>>,
    pub uploads: Vec<UploadRequest>,
    pub downloads: Vec<DownloadRequest>,
    pub identity_calls: usize,
    pub list_calls: usize,
    pub fail_listing: Option<String>,
    pub fail_changes: Option<String>,
    pub fail_transfers: Option<String>,
    /// Prefixes appended to every listing regardless of the requested prefix.
    pub stray_prefixes: Vec<String>,
}

impl TestRuntime {
    pub fn with_sample_data() -> Self {
        let mut runtime = Self {
            identity: Some(CallerIdentity {
                account: "123456789012".to_owned(),
                arn: "arn:aws:iam::123456789012:user/demo".to_owned(),
                user_id: "AIDADEMO".to_owned(),
            }),
            aliases: vec!["demo".to_owned()],
            region: Some("us-east-1".to_owned()),
            ..Self::default()
        };
        for name in ["demo-assets", "demo-logs"] {
            runtime.buckets.push(Bucket {
                name: name.to_owned(),
                created_at: fixed_timestamp(),
            });
        }
        runtime.add_object("demo-assets", "css/site.css", "body {}");
        runtime.add_object("demo-assets", "index.html", "<html>\n</html>");
        runtime.add_object("demo-logs", "2026/01/app.log", "started");
        runtime.tags.insert(
            ("demo-assets".to_owned(), "index.html".to_owned()),
            vec![Tag::new("team", "web")],
        );

        runtime.zones.push(sample_zone());
        runtime.records.insert(
            SAMPLE_ZONE_ID.to_owned(),
            vec![
                RecordSet::simple(
                    "www.example.com.",
                    RecordType::A,
                    300,
                    vec!["192.0.2.10".to_owned()],
                ),
                RecordSet::simple(
                    "mail.example.com.",
                    RecordType::Mx,
                    300,
                    vec!["10 mx.example.net.".to_owned()],
                ),
                RecordSet::simple(
                    "api.example.com.",
                    RecordType::Cname,
                    60,
                    vec!["lb.example.net.".to_owned()],
                ),
            ],
        );

        if let Some(instances) = Endpoint::lookup("EC2", "Instances") {
            runtime.resources.insert(
                instances,
                ResourceListing {
                    headers: row(&["ID", "NAME", "STATE"]),
                    rows: vec![
                        row(&["i-0aaa", "web", "running"]),
                        row(&["i-0bbb", "batch", "stopped"]),
                    ],
                },
            );
        }
        runtime
    }

    pub fn add_object(&mut self, bucket: &str, key: &str, body: &str) {
        self.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            body.as_bytes().to_vec(),
        );
    }

    fn check_listing(&mut self) -> Result<()> {
        self.list_calls += 1;
        match &self.fail_listing {
            Some(message) => bail!("{message}"),
            None => Ok(()),
        }
    }
}

pub fn context<'a>(
    runtime: &'a mut TestRuntime,
    settings: &'a mut SettingsStore,
    home: Option<&'a Path>,
) -> ViewContext<'a> {
    ViewContext {
        runtime,
        settings,
        home,
    }
}

impl AppRuntime for TestRuntime {
    fn caller_identity(&mut self) -> Result<CallerIdentity> {
        self.identity_calls += 1;
        self.identity
            .clone()
            .ok_or_else(|| anyhow!("no credentials configured"))
    }

    fn account_aliases(&mut self) -> Result<Vec<String>> {
        Ok(self.aliases.clone())
    }

    fn region(&self) -> Option<String> {
        self.region.clone()
    }

    fn list_buckets(&mut self) -> Result<Vec<Bucket>> {
        self.check_listing()?;
        Ok(self.buckets.clone())
    }

    fn list_objects(&mut self, bucket: &str, prefix: &str) -> Result<ObjectListing> {
        self.check_listing()?;
        let mut prefixes = BTreeSet::new();
        let mut listing = ObjectListing::default();
        for (owner, key) in self.objects.keys() {
            let Some(remainder) = key.strip_prefix(prefix).filter(|_| owner == bucket) else {
                continue;
            };
            match remainder.find('/') {
                Some(index) => {
                    prefixes.insert(format!("{prefix}{}", &remainder[..=index]));
                }
                None => listing.keys.push(key.clone()),
            }
        }
        listing.prefixes = prefixes.into_iter().collect();
        listing.prefixes.extend(self.stray_prefixes.iter().cloned());
        Ok(listing)
    }

    fn get_object(&mut self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| anyhow!("object s3://{bucket}/{key} does not exist"))
    }

    fn object_metadata(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        let body = self.get_object(bucket, key)?;
        Ok(vec![
            Tag::new("Content-Type", "text/html"),
            Tag::new("Content-Length", body.len().to_string()),
        ])
    }

    fn object_tags(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        Ok(self
            .tags
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    fn upload_object(&mut self, request: &UploadRequest) -> Result<()> {
        if let Some(message) = &self.fail_transfers {
            bail!("{message}");
        }
        self.uploads.push(request.clone());
        self.add_object(&request.bucket, &request.key, "");
        Ok(())
    }

    fn download_object(&mut self, request: &DownloadRequest) -> Result<()> {
        if let Some(message) = &self.fail_transfers {
            bail!("{message}");
        }
        self.downloads.push(request.clone());
        Ok(())
    }

    fn list_hosted_zones(&mut self) -> Result<Vec<HostedZone>> {
        self.check_listing()?;
        Ok(self
            .zones
            .iter()
            .map(|zone| HostedZone {
                record_count: self
                    .records
                    .get(&zone.id)
                    .map_or(0, |records| records.len() as i64),
                ..zone.clone()
            })
            .collect())
    }

    fn list_records(&mut self, zone_id: &str) -> Result<Vec<RecordSet>> {
        self.check_listing()?;
        Ok(self.records.get(zone_id).cloned().unwrap_or_default())
    }

    fn change_records(&mut self, zone_id: &str, changes: &[RecordChange]) -> Result<()> {
        if let Some(message) = &self.fail_changes {
            bail!("{message}");
        }
        self.changes.push(changes.to_vec());
        let records = self.records.entry(zone_id.to_owned()).or_default();
        for change in changes {
            match change {
                RecordChange::Create(record) => records.push(record.clone()),
                RecordChange::Delete(record) => records.retain(|existing| existing != record),
            }
        }
        Ok(())
    }

    fn list_resources(&mut self, endpoint: Endpoint) -> Result<ResourceListing> {
        self.check_listing()?;
        Ok(self
            .resources
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| ResourceListing {
                headers: vec!["NAME".to_owned()],
                rows: Vec::new(),
            }))
    }
}
