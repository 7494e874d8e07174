// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Session;
use anyhow::Result;
use aws_tui_app::{
    Bucket, CallerIdentity, DownloadRequest, Endpoint, HostedZone, ObjectListing, RecordChange,
    RecordSet, ResourceListing, Tag, UploadRequest,
};
use aws_tui_sandbox::Store;

/// Serves every UI call from the sandbox store under one session.
pub struct SandboxRuntime {
    store: Store,
    session: Session,
}

impl SandboxRuntime {
    pub fn new(store: Store, session: Session) -> Self {
        Self { store, session }
    }
}

impl aws_tui_tui::AppRuntime for SandboxRuntime {
    fn caller_identity(&mut self) -> Result<CallerIdentity> {
        tracing::debug!(profile = %self.session.profile, "resolving caller identity");
        self.store.caller_identity()
    }

    fn account_aliases(&mut self) -> Result<Vec<String>> {
        self.store.account_aliases()
    }

    fn region(&self) -> Option<String> {
        self.session.region.clone()
    }

    fn list_buckets(&mut self) -> Result<Vec<Bucket>> {
        self.store.list_buckets()
    }

    fn list_objects(&mut self, bucket: &str, prefix: &str) -> Result<ObjectListing> {
        self.store.list_objects(bucket, prefix)
    }

    fn get_object(&mut self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.store.get_object(bucket, key)
    }

    fn object_metadata(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        self.store.object_metadata(bucket, key)
    }

    fn object_tags(&mut self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        self.store.object_tags(bucket, key)
    }

    fn upload_object(&mut self, request: &UploadRequest) -> Result<()> {
        self.store.upload_file(request)?;
        tracing::info!(bucket = %request.bucket, key = %request.key, "uploaded object");
        Ok(())
    }

    fn download_object(&mut self, request: &DownloadRequest) -> Result<()> {
        request.validate()?;
        let destination = request.destination();
        self.store
            .download_object(&request.bucket, &request.key, &destination)?;
        tracing::info!(
            bucket = %request.bucket,
            key = %request.key,
            destination = %destination.display(),
            "downloaded object"
        );
        Ok(())
    }

    fn list_hosted_zones(&mut self) -> Result<Vec<HostedZone>> {
        self.store.list_hosted_zones()
    }

    fn list_records(&mut self, zone_id: &str) -> Result<Vec<RecordSet>> {
        self.store.list_records(zone_id)
    }

    fn change_records(&mut self, zone_id: &str, changes: &[RecordChange]) -> Result<()> {
        self.store.change_records(zone_id, changes)?;
        tracing::info!(zone_id, changes = changes.len(), "changed record sets");
        Ok(())
    }

    fn list_resources(&mut self, endpoint: Endpoint) -> Result<ResourceListing> {
        self.store.list_resources(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::SandboxRuntime;
    use crate::config::Session;
    use anyhow::Result;
    use aws_tui_app::{DownloadRequest, ObjectAcl, UploadRequest};
    use aws_tui_sandbox::Store;
    use aws_tui_testkit::TempHome;
    use aws_tui_tui::AppRuntime;

    fn seeded(region: Option<&str>) -> Result<SandboxRuntime> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        store.seed_demo_data()?;
        Ok(SandboxRuntime::new(
            store,
            Session {
                profile: "default".to_owned(),
                region: region.map(str::to_owned),
            },
        ))
    }

    #[test]
    fn identity_and_region_come_from_the_session() -> Result<()> {
        let mut runtime = seeded(Some("eu-central-1"))?;
        assert_eq!(runtime.caller_identity()?.account, "123456789012");
        assert_eq!(runtime.account_aliases()?, ["demo-sandbox"]);
        assert_eq!(runtime.region().as_deref(), Some("eu-central-1"));
        Ok(())
    }

    #[test]
    fn empty_sandbox_reports_missing_credentials() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        let mut runtime = SandboxRuntime::new(
            store,
            Session {
                profile: "default".to_owned(),
                region: None,
            },
        );
        let error = runtime
            .caller_identity()
            .expect_err("unseeded sandbox has no identity");
        assert!(error.to_string().contains("no credentials"));
        assert!(runtime.list_buckets()?.is_empty());
        Ok(())
    }

    #[test]
    fn upload_then_download_round_trips_through_the_filesystem() -> Result<()> {
        let home = TempHome::new()?;
        let source = home.write_file("notes.txt", "remember the milk\n")?;
        let mut runtime = seeded(None)?;

        let mut upload = UploadRequest::for_file("demo-assets", "docs/", &source);
        upload.acl = ObjectAcl::PublicRead;
        runtime.upload_object(&upload)?;
        let listing = runtime.list_objects("demo-assets", "docs/")?;
        assert_eq!(listing.keys, ["docs/notes.txt"]);

        let target = home.dir("downloads")?;
        runtime.download_object(&DownloadRequest::new(
            "demo-assets",
            "docs/notes.txt",
            &target,
        ))?;
        assert_eq!(
            std::fs::read_to_string(target.join("notes.txt"))?,
            "remember the milk\n"
        );
        Ok(())
    }
}
