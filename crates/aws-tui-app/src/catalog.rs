// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

const CATALOG: &[(&str, &[&str])] = &[
    ("ACM", &["Certificates"]),
    ("ACM PCA", &["Certificate Authorities"]),
    ("CloudFront", &["Distributions", "Functions"]),
    ("CloudWatch", &["Log Groups"]),
    ("DynamoDB", &["Tables"]),
    ("EBS", &["Volumes"]),
    (
        "EC2",
        &[
            "Instances",
            "Availability Zones",
            "Security Groups",
            "AMIs",
            "Key Pairs",
            "Reserved Instances",
        ],
    ),
    ("ECS", &["Clusters", "Task Definitions"]),
    ("EKS", &["Clusters"]),
    ("ELB", &["Load Balancers", "Target Groups", "Trust Stores"]),
    (
        "ElastiCache",
        &[
            "Clusters",
            "Users",
            "Groups",
            "Parameter Groups",
            "Subnet Groups",
            "Reserved Nodes",
            "Snapshots",
            "Events",
            "Service Updates",
        ],
    ),
    ("Global Accelerator", &["Accelerators"]),
    ("IAM", &["Users", "Roles", "Groups", "Managed Policies"]),
    ("KMS", &["Keys", "Custom Key Stores"]),
    ("Lambda", &["Functions"]),
    ("MQ", &["Brokers"]),
    ("MSK", &["Clusters"]),
    (
        "RDS",
        &[
            "Clusters",
            "Global Clusters",
            "Parameter Groups",
            "Subnet Groups",
            "Reserved Instances",
        ],
    ),
    ("Route 53", &["Hosted Zones", "Health Checks"]),
    ("S3", &["Buckets"]),
    ("SNS", &["Topics"]),
    ("SQS", &["Queues"]),
    ("Secrets Manager", &["Secrets"]),
    ("Service Quotas", &["Services"]),
    ("Systems Manager", &["Parameters"]),
    ("VPC", &["VPCs", "Subnets", "Internet Gateways"]),
];

/// Which concrete screen a catalog endpoint opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    S3Buckets,
    Route53HostedZones,
    ResourceList,
}

/// One launchable `<service>.<view>` entry. Values only come from the
/// catalog, so every endpoint is known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    service: &'static str,
    view: &'static str,
}

impl Endpoint {
    pub fn lookup(service: &str, view: &str) -> Option<Self> {
        let &(service, views) = CATALOG.iter().find(|(name, _)| *name == service)?;
        let view = *views.iter().find(|name| **name == view)?;
        Some(Self { service, view })
    }

    /// Parses a favorite reference, splitting on the first `.`.
    pub fn parse_reference(reference: &str) -> Option<Self> {
        let (service, view) = reference.split_once('.')?;
        Self::lookup(service, view)
    }

    pub const fn service(self) -> &'static str {
        self.service
    }

    pub const fn view(self) -> &'static str {
        self.view
    }

    pub fn reference(self) -> String {
        format!("{}.{}", self.service, self.view)
    }

    /// Label used under the Favorites section.
    pub fn favorite_label(self) -> String {
        format!("{} > {}", self.service, self.view)
    }

    pub fn kind(self) -> EndpointKind {
        match (self.service, self.view) {
            ("S3", "Buckets") => EndpointKind::S3Buckets,
            ("Route 53", "Hosted Zones") => EndpointKind::Route53HostedZones,
            _ => EndpointKind::ResourceList,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.service, self.view)
    }
}

/// Service names in byte order.
pub fn services() -> Vec<&'static str> {
    let mut names = CATALOG.iter().map(|(name, _)| *name).collect::<Vec<_>>();
    names.sort_unstable();
    names
}

/// Endpoints of one service, in catalog order.
pub fn endpoints(service: &str) -> Vec<Endpoint> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == service)
        .map(|&(name, views)| {
            views
                .iter()
                .map(|&view| Endpoint {
                    service: name,
                    view,
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn all_endpoints() -> Vec<Endpoint> {
    services().into_iter().flat_map(endpoints).collect()
}
