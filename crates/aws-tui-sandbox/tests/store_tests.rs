// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use aws_tui_app::{
    Endpoint, ObjectAcl, RecordChange, RecordFormInput, RecordMode, RecordSet, RecordType,
    UploadRequest, record_changes,
};
use aws_tui_sandbox::{Store, validate_db_path};
use aws_tui_testkit::{SAMPLE_ZONE, TempHome, fixed_timestamp};

const ZONE_ID: &str = "/hostedzone/ZTEST";

fn store_with_zone() -> Result<Store> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_hosted_zone(ZONE_ID, SAMPLE_ZONE, false, "tests")?;
    Ok(store)
}

fn a_record(name: &str, value: &str) -> RecordSet {
    RecordSet::simple(name, RecordType::A, 300, vec![value.to_owned()])
}

#[test]
fn demo_seed_populates_every_surface_once() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.seed_demo_data()?;
    store.seed_demo_data()?;

    let identity = store.caller_identity()?;
    assert_eq!(identity.account, "123456789012");
    assert_eq!(store.account_aliases()?, vec!["demo-sandbox"]);
    assert_eq!(store.list_buckets()?.len(), 2);

    let zones = store.list_hosted_zones()?;
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[1].name, "example.com.");
    assert_eq!(zones[1].record_count, 7);

    let instances = Endpoint::lookup("EC2", "Instances").expect("catalog endpoint");
    let listing = store.list_resources(instances)?;
    assert_eq!(listing.headers[0], "INSTANCE ID");
    assert_eq!(listing.rows.len(), 2);
    Ok(())
}

#[test]
fn missing_identity_is_actionable() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let error = store.caller_identity().expect_err("no identity yet");
    assert!(error.to_string().contains("seed_demo_data"));
    Ok(())
}

#[test]
fn object_listing_groups_by_delimiter() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_bucket("assets", fixed_timestamp())?;
    for key in ["a.txt", "css/site.css", "css/print.css", "img/x/y.png", "b.txt"] {
        store.put_object("assets", key, b"x", "text/plain", ObjectAcl::Private)?;
    }

    let root = store.list_objects("assets", "")?;
    assert_eq!(root.prefixes, vec!["css/", "img/"]);
    assert_eq!(root.keys, vec!["a.txt", "b.txt"]);

    let img = store.list_objects("assets", "img/")?;
    assert_eq!(img.prefixes, vec!["img/x/"]);
    assert!(img.keys.is_empty());

    let css = store.list_objects("assets", "css/")?;
    assert_eq!(css.keys, vec!["css/print.css", "css/site.css"]);

    assert!(store.list_objects("nope", "").is_err());
    Ok(())
}

#[test]
fn prefix_match_treats_wildcards_literally() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_bucket("b", fixed_timestamp())?;
    store.put_object("b", "100%/a", b"x", "text/plain", ObjectAcl::Private)?;
    store.put_object("b", "100x/b", b"x", "text/plain", ObjectAcl::Private)?;
    let listing = store.list_objects("b", "100%/")?;
    assert_eq!(listing.keys, vec!["100%/a"]);
    Ok(())
}

#[test]
fn upload_and_download_round_trip_through_files() -> Result<()> {
    let home = TempHome::new()?;
    let source = home.write_file("work/report.csv", "a,b\n1,2\n")?;
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_bucket("reports", fixed_timestamp())?;

    let request = UploadRequest::for_file("reports", "2026/", &source);
    assert_eq!(request.key, "2026/report.csv");
    assert_eq!(request.content_type, "text/csv; charset=utf-8");
    store.upload_file(&request)?;

    let metadata = store.object_metadata("reports", "2026/report.csv")?;
    assert_eq!(metadata[0].value, "text/csv; charset=utf-8");
    assert_eq!(metadata[1].value, "8");

    let destination = home.dir("downloads")?.join("copy.csv");
    store.download_object("reports", "2026/report.csv", &destination)?;
    assert_eq!(std::fs::read_to_string(destination)?, "a,b\n1,2\n");
    Ok(())
}

#[test]
fn object_tags_are_sorted_and_upserted() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.create_bucket("b", fixed_timestamp())?;
    store.put_object("b", "k", b"x", "text/plain", ObjectAcl::PublicRead)?;
    store.put_object_tag("b", "k", &aws_tui_app::Tag::new("team", "web"))?;
    store.put_object_tag("b", "k", &aws_tui_app::Tag::new("env", "dev"))?;
    store.put_object_tag("b", "k", &aws_tui_app::Tag::new("team", "infra"))?;

    let tags = store.object_tags("b", "k")?;
    let pairs: Vec<_> = tags.iter().map(|tag| (tag.key.as_str(), tag.value.as_str())).collect();
    assert_eq!(pairs, vec![("env", "dev"), ("team", "infra")]);
    assert_eq!(store.object_metadata("b", "k")?[2].value, "public-read");
    Ok(())
}

#[test]
fn create_form_adds_a_record() -> Result<()> {
    let store = store_with_zone()?;
    let input = RecordFormInput {
        name: "www".to_owned(),
        kind: RecordType::A,
        ttl: "300".to_owned(),
        value: "1.2.3.4".to_owned(),
    };
    let submitted = input.validate(SAMPLE_ZONE)?;
    let changes = record_changes(RecordMode::Create, None, Some(submitted))?;
    store.change_records(ZONE_ID, &changes)?;

    let records = store.list_records(ZONE_ID)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "www.example.com.");
    assert_eq!(records[0].values, vec!["1.2.3.4"]);
    assert_eq!(store.list_hosted_zones()?[0].record_count, 1);
    Ok(())
}

#[test]
fn update_replaces_the_record() -> Result<()> {
    let store = store_with_zone()?;
    let original = a_record("www.example.com.", "1.2.3.4");
    store.change_records(ZONE_ID, &[RecordChange::Create(original.clone())])?;

    let mut input = RecordFormInput::from_record(&original, SAMPLE_ZONE);
    input.value = "5.6.7.8".to_owned();
    let submitted = input.validate(SAMPLE_ZONE)?;
    let changes = record_changes(RecordMode::Update, Some(&original), Some(submitted))?;
    store.change_records(ZONE_ID, &changes)?;

    let records = store.list_records(ZONE_ID)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].values, vec!["5.6.7.8"]);
    Ok(())
}

#[test]
fn failed_batch_leaves_records_untouched() -> Result<()> {
    let store = store_with_zone()?;
    let existing = a_record("www.example.com.", "1.2.3.4");
    store.change_records(ZONE_ID, &[RecordChange::Create(existing.clone())])?;

    let error = store
        .change_records(
            ZONE_ID,
            &[
                RecordChange::Delete(existing.clone()),
                RecordChange::Create(a_record("www.example.com.", "9.9.9.9")),
                RecordChange::Create(a_record("www.example.com.", "8.8.8.8")),
            ],
        )
        .expect_err("duplicate create");
    assert!(format!("{error:#}").contains("already exists"));
    assert_eq!(store.list_records(ZONE_ID)?, vec![existing]);
    Ok(())
}

#[test]
fn records_outside_the_zone_are_rejected() -> Result<()> {
    let store = store_with_zone()?;
    let error = store
        .change_records(ZONE_ID, &[RecordChange::Create(a_record("www.other.org.", "1.1.1.1"))])
        .expect_err("foreign name");
    assert!(error.to_string().contains("is not in zone"));

    let error = store
        .change_records(ZONE_ID, &[RecordChange::Delete(a_record("gone.example.com.", "1.1.1.1"))])
        .expect_err("missing record");
    assert!(error.to_string().contains("was not found"));
    Ok(())
}

#[test]
fn unknown_endpoints_list_empty() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let endpoint = Endpoint::lookup("KMS", "Keys").expect("catalog endpoint");
    let listing = store.list_resources(endpoint)?;
    assert_eq!(listing.headers, vec!["NAME"]);
    assert!(listing.rows.is_empty());
    Ok(())
}

#[test]
fn file_backed_store_persists_between_opens() -> Result<()> {
    let home = TempHome::new()?;
    let path = home.dir(".aws-tui")?.join("sandbox.db");
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.create_bucket("kept", fixed_timestamp())?;
    }
    let store = Store::open(&path)?;
    store.bootstrap()?;
    let buckets = store.list_buckets()?;
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].created_label(), "2026-01-15 09:30:00");
    Ok(())
}

#[test]
fn db_path_rejects_uri_forms() {
    assert!(validate_db_path("/tmp/sandbox.db").is_ok());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("https://example.com/db").is_err());
    assert!(validate_db_path("file:sandbox.db?mode=ro").is_err());
}
