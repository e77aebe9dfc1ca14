//! # Discovery
//!
//! Resolves user-supplied resource tokens to the canonical resource names a
//! cluster actually serves, and validates that the requested verb is
//! supported.
//!
//! ## Sub-modules
//!
//! - `catalog` - preferred-version resource snapshot shared by resolver and mapper
//! - `client` - `Discovery` implementation backed by a kube `Client`
//! - `index` - resource name / short name lookup table
//! - `mapper` - REST mapping of bare tokens (`service` -> `services`)
//! - `resolver` - the resource identity resolver

pub mod catalog;
pub mod client;
pub mod index;
pub mod mapper;
pub mod resolver;

pub use catalog::DiscoveryCatalog;
pub use client::KubeDiscovery;
pub use index::{ApiResourceDescriptor, ResourceIndex};
pub use mapper::{DiscoveryRestMapper, RestMapper};
pub use resolver::{DiscoveryResourceResolver, ResourceResolver};

use crate::error::ResolveError;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroupList, APIResourceList};
use tracing::debug;

/// Read-only access to the API server's discovery endpoints
#[async_trait]
pub trait Discovery: Send + Sync {
    /// All API groups, including the legacy core group
    async fn server_groups(&self) -> Result<APIGroupList, kube::Error>;

    /// Resources served by one group version (`v1`, `apps/v1`, ...)
    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, kube::Error>;
}

/// Collect the resources of every group's preferred version
///
/// Non-preferred versions are skipped so a resource served by several
/// versions contributes exactly one verb set.
pub(crate) async fn preferred_resources(
    discovery: &dyn Discovery,
) -> Result<Vec<ApiResourceDescriptor>, ResolveError> {
    let groups = discovery
        .server_groups()
        .await
        .map_err(ResolveError::api_groups)?;

    let mut descriptors = Vec::new();
    for group in &groups.groups {
        let Some(preferred) = &group.preferred_version else {
            debug!(group = %group.name, "skipping API group without a preferred version");
            continue;
        };

        for version in &group.versions {
            if version.group_version != preferred.group_version {
                continue;
            }
            let resources = discovery
                .server_resources_for_group_version(&version.group_version)
                .await
                .map_err(ResolveError::group_resources)?;

            descriptors.extend(
                resources
                    .resources
                    .iter()
                    .map(ApiResourceDescriptor::from),
            );
        }
    }

    debug!(resources = descriptors.len(), "collected preferred-version resources");
    Ok(descriptors)
}
