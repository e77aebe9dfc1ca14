//! # REST Mapper
//!
//! Maps a bare resource token (`service`, `Deployment`, `pods`) to the plural
//! resource name the API server serves it under.

use super::{ApiResourceDescriptor, DiscoveryCatalog};
use crate::error::ResolveError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Maps bare resource tokens to canonical plural resource names
#[async_trait]
pub trait RestMapper: Send + Sync {
    /// Returns the plural resource name for `resource`, or
    /// [`ResolveError::Mapping`] when nothing matches
    async fn resource_for(&self, resource: &str) -> Result<String, ResolveError>;
}

/// REST mapper driven by the preferred-version discovery catalog
///
/// Tokens are matched case-insensitively against plural names, singular
/// names and kinds. The first match in discovery order wins.
#[derive(Debug)]
pub struct DiscoveryRestMapper {
    catalog: Arc<DiscoveryCatalog>,
}

impl DiscoveryRestMapper {
    pub fn new(catalog: Arc<DiscoveryCatalog>) -> Self {
        Self { catalog }
    }
}

fn matches_token(descriptor: &ApiResourceDescriptor, token: &str) -> bool {
    descriptor.name == token
        || (!descriptor.singular_name.is_empty() && descriptor.singular_name == token)
        || descriptor.kind.to_lowercase() == token
}

#[async_trait]
impl RestMapper for DiscoveryRestMapper {
    async fn resource_for(&self, resource: &str) -> Result<String, ResolveError> {
        let token = resource.trim().to_lowercase();
        let catalog = self.catalog.resources().await?;

        catalog
            .iter()
            .filter(|descriptor| !descriptor.is_sub_resource())
            .find(|descriptor| matches_token(descriptor, &token))
            .map(|descriptor| {
                debug!(resource, mapped = %descriptor.name, "mapped resource token");
                descriptor.name.clone()
            })
            .ok_or_else(|| ResolveError::Mapping {
                resource: resource.to_string(),
            })
    }
}
