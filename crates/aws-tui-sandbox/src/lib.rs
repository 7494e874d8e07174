// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod seed;

use anyhow::{Context, Result, anyhow, bail};
use aws_tui_app::{
    Bucket, CallerIdentity, Endpoint, GeoLocation, HostedZone, ObjectAcl, ObjectListing,
    RecordChange, RecordSet, RecordType, ResourceListing, Routing, Tag, UploadRequest,
};
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const CELL_SEPARATOR: char = '\u{1f}';

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS identity (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  account TEXT NOT NULL,
  arn TEXT NOT NULL,
  user_id TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS account_aliases (
  alias TEXT PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS buckets (
  name TEXT PRIMARY KEY,
  created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS objects (
  bucket TEXT NOT NULL REFERENCES buckets(name) ON DELETE CASCADE,
  key TEXT NOT NULL,
  body BLOB NOT NULL,
  content_type TEXT NOT NULL,
  acl TEXT NOT NULL,
  etag TEXT NOT NULL,
  modified_at TEXT NOT NULL,
  PRIMARY KEY (bucket, key)
);
CREATE TABLE IF NOT EXISTS object_tags (
  bucket TEXT NOT NULL,
  key TEXT NOT NULL,
  tag_key TEXT NOT NULL,
  tag_value TEXT NOT NULL,
  PRIMARY KEY (bucket, key, tag_key),
  FOREIGN KEY (bucket, key) REFERENCES objects(bucket, key) ON DELETE CASCADE
);
CREATE TABLE IF NOT EXISTS hosted_zones (
  id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  private INTEGER NOT NULL DEFAULT 0,
  comment TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS record_sets (
  id INTEGER PRIMARY KEY,
  zone_id TEXT NOT NULL REFERENCES hosted_zones(id) ON DELETE CASCADE,
  name TEXT NOT NULL,
  type TEXT NOT NULL,
  set_identifier TEXT NOT NULL DEFAULT '',
  ttl INTEGER,
  record_values TEXT NOT NULL DEFAULT '',
  alias_target TEXT,
  failover TEXT,
  region TEXT,
  geo_continent TEXT,
  geo_country TEXT,
  geo_subdivision TEXT,
  multi_value INTEGER NOT NULL DEFAULT 0,
  weight INTEGER,
  UNIQUE (zone_id, name, type, set_identifier)
);
CREATE TABLE IF NOT EXISTS resource_headers (
  endpoint TEXT PRIMARY KEY,
  headers TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS resources (
  id INTEGER PRIMARY KEY,
  endpoint TEXT NOT NULL REFERENCES resource_headers(endpoint) ON DELETE CASCADE,
  cells TEXT NOT NULL
);
";

/// A local stand-in for a cloud account, backed by SQLite.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        validate_db_path(&path.to_string_lossy())?;
        let conn = Connection::open(path)
            .with_context(|| format!("open sandbox database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sandbox")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("create sandbox schema")
    }

    pub fn seed_demo_data(&self) -> Result<()> {
        seed::seed_demo_data(self)
    }

    pub fn set_identity(&self, identity: &CallerIdentity) -> Result<()> {
        self.conn
            .execute(
                "
                INSERT INTO identity (id, account, arn, user_id) VALUES (1, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                  account = excluded.account,
                  arn = excluded.arn,
                  user_id = excluded.user_id
                ",
                params![identity.account, identity.arn, identity.user_id],
            )
            .context("store caller identity")?;
        Ok(())
    }

    pub fn caller_identity(&self) -> Result<CallerIdentity> {
        self.conn
            .query_row(
                "SELECT account, arn, user_id FROM identity WHERE id = 1",
                [],
                |row| {
                    Ok(CallerIdentity {
                        account: row.get(0)?,
                        arn: row.get(1)?,
                        user_id: row.get(2)?,
                    })
                },
            )
            .optional()
            .context("load caller identity")?
            .ok_or_else(|| {
                anyhow!(
                    "no credentials found in the sandbox -- set [sandbox].seed_demo_data = true or point db_path at a seeded database"
                )
            })
    }

    pub fn add_account_alias(&self, alias: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO account_aliases (alias) VALUES (?)",
                params![alias],
            )
            .with_context(|| format!("insert account alias {alias}"))?;
        Ok(())
    }

    pub fn account_aliases(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT alias FROM account_aliases ORDER BY alias ASC")
            .context("prepare account aliases query")?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .context("query account aliases")?;
        rows.collect::<rusqlite::Result<Vec<String>>>()
            .context("collect account aliases")
    }

    pub fn create_bucket(&self, name: &str, created_at: OffsetDateTime) -> Result<()> {
        if name.trim().is_empty() {
            bail!("bucket name must not be empty");
        }
        let created = created_at.format(&Rfc3339).context("format bucket timestamp")?;
        self.conn
            .execute(
                "INSERT INTO buckets (name, created_at) VALUES (?, ?)",
                params![name, created],
            )
            .with_context(|| format!("create bucket {name}"))?;
        Ok(())
    }

    pub fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, created_at FROM buckets ORDER BY name ASC")
            .context("prepare buckets query")?;
        let rows = stmt
            .query_map([], |row| {
                let created_raw: String = row.get(1)?;
                Ok(Bucket {
                    name: row.get(0)?,
                    created_at: parse_datetime(&created_raw).map_err(to_sql_error)?,
                })
            })
            .context("query buckets")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect buckets")
    }

    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
        acl: ObjectAcl,
    ) -> Result<()> {
        self.require_bucket(bucket)?;
        if key.is_empty() {
            bail!("object key must not be empty");
        }
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO objects (bucket, key, body, content_type, acl, etag, modified_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (bucket, key) DO UPDATE SET
                  body = excluded.body,
                  content_type = excluded.content_type,
                  acl = excluded.acl,
                  etag = excluded.etag,
                  modified_at = excluded.modified_at
                ",
                params![
                    bucket,
                    key,
                    body,
                    content_type,
                    acl.as_str(),
                    checksum_sha256(body),
                    now,
                ],
            )
            .with_context(|| format!("put object s3://{bucket}/{key}"))?;
        Ok(())
    }

    /// One level of keys under `prefix`, grouping deeper keys into common
    /// prefixes the way a `/` delimiter does.
    pub fn list_objects(&self, bucket: &str, prefix: &str) -> Result<ObjectListing> {
        self.require_bucket(bucket)?;
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT key FROM objects
                WHERE bucket = ?1 AND substr(key, 1, length(?2)) = ?2
                ORDER BY key ASC
                ",
            )
            .context("prepare objects query")?;
        let keys = stmt
            .query_map(params![bucket, prefix], |row| row.get::<_, String>(0))
            .context("query objects")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("collect objects")?;

        let mut prefixes = BTreeSet::new();
        let mut listing = ObjectListing::default();
        for key in keys {
            let remainder = &key[prefix.len()..];
            match remainder.find('/') {
                Some(index) => {
                    prefixes.insert(format!("{prefix}{}", &remainder[..=index]));
                }
                None => listing.keys.push(key),
            }
        }
        listing.prefixes = prefixes.into_iter().collect();
        Ok(listing)
    }

    pub fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT body FROM objects WHERE bucket = ? AND key = ?",
                params![bucket, key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("load object s3://{bucket}/{key}"))?
            .ok_or_else(|| anyhow!("object s3://{bucket}/{key} does not exist"))
    }

    pub fn object_metadata(&self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        let row = self
            .conn
            .query_row(
                "
                SELECT content_type, acl, length(body), etag, modified_at
                FROM objects WHERE bucket = ? AND key = ?
                ",
                params![bucket, key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .with_context(|| format!("load metadata for s3://{bucket}/{key}"))?;
        let Some((content_type, acl, length, etag, modified_at)) = row else {
            bail!("object s3://{bucket}/{key} does not exist");
        };
        Ok(vec![
            Tag::new("Content-Type", content_type),
            Tag::new("Content-Length", length.to_string()),
            Tag::new("ACL", acl),
            Tag::new("ETag", etag),
            Tag::new("Last-Modified", modified_at),
        ])
    }

    pub fn put_object_tag(&self, bucket: &str, key: &str, tag: &Tag) -> Result<()> {
        self.conn
            .execute(
                "
                INSERT INTO object_tags (bucket, key, tag_key, tag_value) VALUES (?, ?, ?, ?)
                ON CONFLICT (bucket, key, tag_key) DO UPDATE SET tag_value = excluded.tag_value
                ",
                params![bucket, key, tag.key, tag.value],
            )
            .with_context(|| format!("tag s3://{bucket}/{key}"))?;
        Ok(())
    }

    pub fn object_tags(&self, bucket: &str, key: &str) -> Result<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT tag_key, tag_value FROM object_tags
                WHERE bucket = ? AND key = ?
                ORDER BY tag_key ASC
                ",
            )
            .context("prepare object tags query")?;
        let rows = stmt
            .query_map(params![bucket, key], |row| {
                Ok(Tag {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            })
            .context("query object tags")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect object tags")
    }

    pub fn upload_file(&self, request: &UploadRequest) -> Result<()> {
        request.validate()?;
        let body = fs::read(&request.local_path)
            .with_context(|| format!("read {}", request.local_path.display()))?;
        self.put_object(
            &request.bucket,
            &request.key,
            &body,
            &request.content_type,
            request.acl,
        )
    }

    pub fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let body = self.get_object(bucket, key)?;
        fs::write(destination, body)
            .with_context(|| format!("write {}", destination.display()))?;
        Ok(())
    }

    pub fn create_hosted_zone(
        &self,
        id: &str,
        name: &str,
        private: bool,
        comment: &str,
    ) -> Result<()> {
        let name = if name.ends_with('.') {
            name.to_owned()
        } else {
            format!("{name}.")
        };
        self.conn
            .execute(
                "INSERT INTO hosted_zones (id, name, private, comment) VALUES (?, ?, ?, ?)",
                params![id, name, private, comment],
            )
            .with_context(|| format!("create hosted zone {name}"))?;
        Ok(())
    }

    pub fn list_hosted_zones(&self) -> Result<Vec<HostedZone>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT z.id, z.name, z.private, z.comment, COUNT(r.id)
                FROM hosted_zones z
                LEFT JOIN record_sets r ON r.zone_id = z.id
                GROUP BY z.id
                ORDER BY z.name ASC, z.id ASC
                ",
            )
            .context("prepare hosted zones query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(HostedZone {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    private: row.get(2)?,
                    comment: row.get(3)?,
                    record_count: row.get(4)?,
                })
            })
            .context("query hosted zones")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect hosted zones")
    }

    pub fn list_records(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        self.zone_name(zone_id)?;
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT
                  name, type, set_identifier, ttl, record_values, alias_target,
                  failover, region, geo_continent, geo_country, geo_subdivision,
                  multi_value, weight
                FROM record_sets
                WHERE zone_id = ?
                ORDER BY name ASC, type ASC, set_identifier ASC
                ",
            )
            .context("prepare records query")?;
        let rows = stmt
            .query_map(params![zone_id], |row| {
                let kind_raw: String = row.get(1)?;
                let set_identifier: String = row.get(2)?;
                let values_raw: String = row.get(4)?;
                let continent: Option<String> = row.get(8)?;
                let country: Option<String> = row.get(9)?;
                let subdivision: Option<String> = row.get(10)?;
                let geo = (continent.is_some() || country.is_some() || subdivision.is_some())
                    .then_some(GeoLocation {
                        continent,
                        country,
                        subdivision,
                    });
                Ok(RecordSet {
                    name: row.get(0)?,
                    kind: RecordType::parse(&kind_raw)
                        .ok_or_else(|| anyhow!("unknown record type {kind_raw:?}"))
                        .map_err(to_sql_error)?,
                    ttl: row.get(3)?,
                    values: values_raw
                        .split('\n')
                        .filter(|value| !value.is_empty())
                        .map(str::to_owned)
                        .collect(),
                    alias_target: row.get(5)?,
                    routing: Routing {
                        set_identifier: (!set_identifier.is_empty()).then_some(set_identifier),
                        failover: row.get(6)?,
                        region: row.get(7)?,
                        geo,
                        multi_value: row.get(11)?,
                        weight: row.get(12)?,
                    },
                })
            })
            .context("query records")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect records")
    }

    /// Applies a change batch atomically: every change lands or none do.
    pub fn change_records(&self, zone_id: &str, changes: &[RecordChange]) -> Result<()> {
        let zone_name = self.zone_name(zone_id)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin record change batch")?;
        for change in changes {
            match change {
                RecordChange::Create(record) => insert_record(&tx, zone_id, &zone_name, record)?,
                RecordChange::Delete(record) => delete_record(&tx, zone_id, record)?,
            }
        }
        tx.commit().context("commit record change batch")
    }

    pub fn define_resource_table(&self, endpoint: Endpoint, headers: &[&str]) -> Result<()> {
        self.conn
            .execute(
                "
                INSERT INTO resource_headers (endpoint, headers) VALUES (?, ?)
                ON CONFLICT (endpoint) DO UPDATE SET headers = excluded.headers
                ",
                params![endpoint.reference(), join_cells(headers)],
            )
            .with_context(|| format!("define resource table {endpoint}"))?;
        Ok(())
    }

    pub fn add_resource(&self, endpoint: Endpoint, cells: &[&str]) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO resources (endpoint, cells) VALUES (?, ?)",
                params![endpoint.reference(), join_cells(cells)],
            )
            .with_context(|| format!("add resource to {endpoint}"))?;
        Ok(())
    }

    /// Generic listing for an endpoint. Endpoints never populated list as a
    /// single `NAME` column with no rows.
    pub fn list_resources(&self, endpoint: Endpoint) -> Result<ResourceListing> {
        let reference = endpoint.reference();
        let headers = self
            .conn
            .query_row(
                "SELECT headers FROM resource_headers WHERE endpoint = ?",
                params![reference],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("load headers for {endpoint}"))?;
        let Some(headers) = headers else {
            return Ok(ResourceListing {
                headers: vec!["NAME".to_owned()],
                rows: Vec::new(),
            });
        };

        let mut stmt = self
            .conn
            .prepare("SELECT cells FROM resources WHERE endpoint = ? ORDER BY id ASC")
            .context("prepare resources query")?;
        let rows = stmt
            .query_map(params![reference], |row| row.get::<_, String>(0))
            .context("query resources")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("collect resources")?;

        Ok(ResourceListing {
            headers: split_cells(&headers),
            rows: rows.iter().map(|cells| split_cells(cells)).collect(),
        })
    }

    fn require_bucket(&self, bucket: &str) -> Result<()> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM buckets WHERE name = ?)",
                params![bucket],
                |row| row.get(0),
            )
            .with_context(|| format!("look up bucket {bucket}"))?;
        if !exists {
            bail!("bucket {bucket} does not exist");
        }
        Ok(())
    }

    fn zone_name(&self, zone_id: &str) -> Result<String> {
        self.conn
            .query_row(
                "SELECT name FROM hosted_zones WHERE id = ?",
                params![zone_id],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("look up hosted zone {zone_id}"))?
            .ok_or_else(|| anyhow!("hosted zone {zone_id} does not exist"))
    }
}

fn insert_record(conn: &Connection, zone_id: &str, zone_name: &str, record: &RecordSet) -> Result<()> {
    let zone = zone_name.trim_end_matches('.');
    let name = record.name.trim_end_matches('.');
    if name != zone && !name.ends_with(&format!(".{zone}")) {
        bail!("record {} is not in zone {zone_name}", record.name);
    }
    if record.alias_target.is_none() && record.values.is_empty() {
        bail!("record {} {} has no values", record.name, record.kind);
    }
    let geo = record.routing.geo.clone().unwrap_or_default();
    let inserted = conn
        .execute(
            "
            INSERT OR IGNORE INTO record_sets (
              zone_id, name, type, set_identifier, ttl, record_values, alias_target,
              failover, region, geo_continent, geo_country, geo_subdivision,
              multi_value, weight
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                zone_id,
                record.name,
                record.kind.as_str(),
                record.routing.set_identifier.as_deref().unwrap_or(""),
                record.ttl,
                record.values.join("\n"),
                record.alias_target,
                record.routing.failover,
                record.routing.region,
                geo.continent,
                geo.country,
                geo.subdivision,
                record.routing.multi_value,
                record.routing.weight,
            ],
        )
        .with_context(|| format!("create record {} {}", record.name, record.kind))?;
    if inserted == 0 {
        bail!(
            "record {} {} already exists -- update it instead",
            record.name,
            record.kind
        );
    }
    Ok(())
}

fn delete_record(conn: &Connection, zone_id: &str, record: &RecordSet) -> Result<()> {
    let deleted = conn
        .execute(
            "
            DELETE FROM record_sets
            WHERE zone_id = ? AND name = ? AND type = ? AND set_identifier = ?
            ",
            params![
                zone_id,
                record.name,
                record.kind.as_str(),
                record.routing.set_identifier.as_deref().unwrap_or(""),
            ],
        )
        .with_context(|| format!("delete record {} {}", record.name, record.kind))?;
    if deleted == 0 {
        bail!("record {} {} was not found", record.name, record.kind);
    }
    Ok(())
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("sandbox database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }
    if let Some(index) = path.find("://")
        && index > 0
        && path[..index].chars().all(char::is_alphabetic)
    {
        bail!("sandbox path {path:?} looks like a URI; pass a filesystem path instead");
    }
    if path.starts_with("file:") || path.contains('?') {
        bail!("sandbox path {path:?} uses URI syntax; pass a plain filesystem path");
    }
    Ok(())
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn join_cells(cells: &[&str]) -> String {
    let mut joined = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            joined.push(CELL_SEPARATOR);
        }
        joined.push_str(cell);
    }
    joined
}

fn split_cells(raw: &str) -> Vec<String> {
    raw.split(CELL_SEPARATOR).map(str::to_owned).collect()
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).with_context(|| format!("unsupported datetime {raw:?}"))
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

fn checksum_sha256(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut output = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
