// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod resources;
mod route53;
mod s3;

pub use resources::ResourceListView;
pub use route53::{HostedZonesView, RecordsView};
pub use s3::{BucketsView, FileSelectorView, ObjectPropertiesView, ObjectView, ObjectsView};

use crate::view::View;
use aws_tui_app::{Endpoint, EndpointKind};

/// The screen a catalog leaf opens.
pub fn view_for_endpoint(endpoint: Endpoint) -> Box<dyn View> {
    match endpoint.kind() {
        EndpointKind::S3Buckets => Box::<BucketsView>::default(),
        EndpointKind::Route53HostedZones => Box::<HostedZonesView>::default(),
        EndpointKind::ResourceList => Box::new(ResourceListView::new(endpoint)),
    }
}
