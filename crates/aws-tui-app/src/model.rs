// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use time::macros::format_description;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl Bucket {
    pub fn created_label(&self) -> String {
        self.created_at
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_default()
    }
}

/// One level of a bucket listing with `/` as the delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    pub prefixes: Vec<String>,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectAcl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    AwsExecRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
}

impl ObjectAcl {
    pub const ALL: [Self; 7] = [
        Self::Private,
        Self::PublicRead,
        Self::PublicReadWrite,
        Self::AuthenticatedRead,
        Self::AwsExecRead,
        Self::BucketOwnerRead,
        Self::BucketOwnerFullControl,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::AwsExecRead => "aws-exec-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|acl| acl.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Full identifier, for example `/hostedzone/Z123`.
    pub id: String,
    /// Fully qualified, with the trailing dot.
    pub name: String,
    pub record_count: i64,
    pub private: bool,
    pub comment: String,
}

impl HostedZone {
    /// Last path segment of the identifier.
    pub fn short_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }

    pub const fn visibility(&self) -> &'static str {
        if self.private { "Private" } else { "Public" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Soa,
    Srv,
    Ptr,
    Caa,
}

impl RecordType {
    pub const ALL: [Self; 10] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Soa,
        Self::Srv,
        Self::Ptr,
        Self::Caa,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Caa => "CAA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoLocation {
    pub continent: Option<String>,
    pub country: Option<String>,
    pub subdivision: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Routing {
    pub set_identifier: Option<String>,
    pub failover: Option<String>,
    pub region: Option<String>,
    pub geo: Option<GeoLocation>,
    pub multi_value: bool,
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// Fully qualified, with the trailing dot.
    pub name: String,
    pub kind: RecordType,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
    pub alias_target: Option<String>,
    pub routing: Routing,
}

impl RecordSet {
    pub fn simple(name: impl Into<String>, kind: RecordType, ttl: i64, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            ttl: Some(ttl),
            values,
            alias_target: None,
            routing: Routing::default(),
        }
    }

    /// Routing policy name and its differentiator. Later policies win when
    /// several fields are set.
    pub fn routing_policy(&self) -> (&'static str, String) {
        let routing = &self.routing;
        let mut policy = "Simple";
        let mut differentiator = "-".to_owned();

        if let Some(failover) = &routing.failover {
            policy = "Failover";
            differentiator = failover.clone();
        }
        if let Some(region) = &routing.region {
            policy = "Latency";
            differentiator = region.clone();
        }
        if let Some(geo) = &routing.geo {
            policy = "Geolocation";
            if let Some(code) = geo
                .continent
                .as_ref()
                .or(geo.country.as_ref())
                .or(geo.subdivision.as_ref())
            {
                differentiator = code.clone();
            }
        }
        if routing.multi_value {
            policy = "MultiValue";
        }
        if let Some(weight) = routing.weight {
            policy = "Weighted";
            differentiator = weight.to_string();
        }
        (policy, differentiator)
    }

    /// Table row: RECORD NAME, TYPE, ROUTING, DIFF, LABEL, TTL, ALIAS, VALUE.
    pub fn table_row(&self) -> Vec<String> {
        let (policy, differentiator) = self.routing_policy();
        let label = match (&self.routing.set_identifier, policy) {
            (Some(identifier), policy) if policy != "Simple" => identifier.clone(),
            _ => "-".to_owned(),
        };
        let name = self.name.trim_end_matches('.').to_owned();
        match &self.alias_target {
            Some(target) => vec![
                name,
                self.kind.to_string(),
                policy.to_owned(),
                differentiator,
                label,
                "-".to_owned(),
                "Yes".to_owned(),
                target.clone(),
            ],
            None => vec![
                name,
                self.kind.to_string(),
                policy.to_owned(),
                differentiator,
                label,
                self.ttl.map(|ttl| ttl.to_string()).unwrap_or_default(),
                "No".to_owned(),
                self.values.join(", "),
            ],
        }
    }
}

pub const RECORD_HEADERS: [&str; 8] = [
    "RECORD NAME",
    "TYPE",
    "ROUTING",
    "DIFF",
    "LABEL",
    "TTL",
    "ALIAS",
    "VALUE",
];

pub const HOSTED_ZONE_HEADERS: [&str; 5] = ["ID", "NAME", "RECORDS", "VISIBILITY", "DESCRIPTION"];

/// Route 53 change batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordChange {
    Create(RecordSet),
    Delete(RecordSet),
}

/// Generic table for catalog endpoints without a dedicated screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceListing {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
