// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::Store;
use anyhow::{Context, Result, anyhow};
use aws_tui_app::{
    CallerIdentity, Endpoint, GeoLocation, ObjectAcl, RecordChange, RecordSet, RecordType, Routing,
    Tag,
};
use rusqlite::params;
use time::{Date, Month, OffsetDateTime, Time};

pub(crate) const DEMO_ACCOUNT: &str = "123456789012";
pub(crate) const DEMO_ZONE_ID: &str = "/hostedzone/Z0DEMO1234567";

/// Populates an empty sandbox with a small account. A sandbox that already
/// has an identity is left alone.
pub(crate) fn seed_demo_data(store: &Store) -> Result<()> {
    let seeded: bool = store
        .raw_connection()
        .query_row("SELECT EXISTS (SELECT 1 FROM identity)", params![], |row| {
            row.get(0)
        })
        .context("check for existing sandbox data")?;
    if seeded {
        return Ok(());
    }

    store.set_identity(&CallerIdentity {
        account: DEMO_ACCOUNT.to_owned(),
        arn: format!("arn:aws:iam::{DEMO_ACCOUNT}:user/demo"),
        user_id: "AIDADEMO0000000000001".to_owned(),
    })?;
    store.add_account_alias("demo-sandbox")?;

    seed_buckets(store)?;
    seed_zones(store)?;
    seed_resources(store)?;
    tracing::info!(account = DEMO_ACCOUNT, "seeded sandbox demo data");
    Ok(())
}

fn day(year: i32, month: Month, day: u8) -> Result<OffsetDateTime> {
    let date = Date::from_calendar_date(year, month, day)
        .map_err(|error| anyhow!("invalid seed date: {error}"))?;
    Ok(date.with_time(Time::MIDNIGHT).assume_utc())
}

fn seed_buckets(store: &Store) -> Result<()> {
    store.create_bucket("demo-assets", day(2024, Month::March, 2)?)?;
    store.create_bucket("demo-logs", day(2025, Month::July, 19)?)?;

    let objects: [(&str, &str, &[u8], &str); 5] = [
        ("demo-assets", "index.html", b"<h1>hello</h1>\n", "text/html"),
        ("demo-assets", "css/site.css", b"body { margin: 0; }\n", "text/css"),
        ("demo-assets", "img/logo.png", &[0x89, b'P', b'N', b'G'], "image/png"),
        ("demo-assets", "reports/2025/q1.csv", b"month,total\njan,10\n", "text/csv"),
        ("demo-logs", "app/2025-07-19.log", b"started\nstopped\n", "text/plain"),
    ];
    for (bucket, key, body, content_type) in objects {
        store.put_object(bucket, key, body, content_type, ObjectAcl::Private)?;
    }
    store.put_object_tag("demo-assets", "index.html", &Tag::new("team", "web"))?;
    store.put_object_tag("demo-assets", "index.html", &Tag::new("env", "demo"))?;
    Ok(())
}

fn seed_zones(store: &Store) -> Result<()> {
    store.create_hosted_zone(DEMO_ZONE_ID, "example.com", false, "demo public zone")?;
    store.create_hosted_zone("/hostedzone/Z0INTERNAL9876", "corp.internal", true, "")?;

    let values = |items: &[&str]| -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    };
    let mut weighted_blue = RecordSet::simple(
        "api.example.com.",
        RecordType::A,
        60,
        values(&["10.0.1.10"]),
    );
    weighted_blue.routing = Routing {
        set_identifier: Some("blue".to_owned()),
        weight: Some(80),
        ..Routing::default()
    };
    let mut weighted_green = weighted_blue.clone();
    weighted_green.values = values(&["10.0.2.10"]);
    weighted_green.routing.set_identifier = Some("green".to_owned());
    weighted_green.routing.weight = Some(20);

    let mut geo = RecordSet::simple("eu.example.com.", RecordType::A, 300, values(&["10.0.3.10"]));
    geo.routing = Routing {
        set_identifier: Some("europe".to_owned()),
        geo: Some(GeoLocation {
            continent: Some("EU".to_owned()),
            ..GeoLocation::default()
        }),
        ..Routing::default()
    };

    let cdn = RecordSet {
        name: "cdn.example.com.".to_owned(),
        kind: RecordType::A,
        ttl: None,
        values: Vec::new(),
        alias_target: Some("d111111abcdef8.cloudfront.net.".to_owned()),
        routing: Routing::default(),
    };

    let changes = vec![
        RecordChange::Create(RecordSet::simple(
            "example.com.",
            RecordType::Ns,
            172_800,
            values(&["ns-1.awsdns-00.com.", "ns-2.awsdns-00.net."]),
        )),
        RecordChange::Create(RecordSet::simple(
            "www.example.com.",
            RecordType::A,
            300,
            values(&["192.0.2.10", "192.0.2.11"]),
        )),
        RecordChange::Create(RecordSet::simple(
            "example.com.",
            RecordType::Txt,
            300,
            values(&["\"v=spf1 -all\""]),
        )),
        RecordChange::Create(weighted_blue),
        RecordChange::Create(weighted_green),
        RecordChange::Create(geo),
        RecordChange::Create(cdn),
    ];
    store.change_records(DEMO_ZONE_ID, &changes)?;

    store.change_records(
        "/hostedzone/Z0INTERNAL9876",
        &[RecordChange::Create(RecordSet::simple(
            "db.corp.internal.",
            RecordType::Cname,
            60,
            values(&["primary.db.corp.internal."]),
        ))],
    )
}

fn seed_resources(store: &Store) -> Result<()> {
    let tables: [(&str, &str, &[&str], &[&[&str]]); 4] = [
        (
            "EC2",
            "Instances",
            &["INSTANCE ID", "NAME", "STATE", "TYPE"],
            &[
                &["i-0a1b2c3d4e5f60001", "web-1", "running", "t3.small"],
                &["i-0a1b2c3d4e5f60002", "web-2", "stopped", "t3.small"],
            ],
        ),
        (
            "Lambda",
            "Functions",
            &["NAME", "RUNTIME", "MEMORY"],
            &[&["resize-images", "python3.12", "512"]],
        ),
        (
            "SQS",
            "Queues",
            &["NAME", "TYPE", "MESSAGES"],
            &[&["jobs", "Standard", "4"], &["jobs.fifo", "FIFO", "0"]],
        ),
        (
            "RDS",
            "Clusters",
            &["IDENTIFIER", "ENGINE", "STATUS"],
            &[&["orders", "aurora-postgresql", "available"]],
        ),
    ];
    for (service, view, headers, rows) in tables {
        let endpoint = Endpoint::lookup(service, view)
            .ok_or_else(|| anyhow!("unknown catalog endpoint {service}.{view}"))?;
        store.define_resource_table(endpoint, headers)?;
        for row in rows {
            store.add_resource(endpoint, row)?;
        }
    }
    Ok(())
}
