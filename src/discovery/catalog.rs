//! # Discovery Catalog
//!
//! One point-in-time snapshot of the preferred-version resources, shared by
//! the resolver and the REST mapper so discovery is walked once per run.

use super::{preferred_resources, ApiResourceDescriptor, Discovery};
use crate::error::ResolveError;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily loaded preferred-version resource snapshot
pub struct DiscoveryCatalog {
    discovery: Arc<dyn Discovery>,
    resources: OnceCell<Vec<ApiResourceDescriptor>>,
}

impl std::fmt::Debug for DiscoveryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryCatalog")
            .field("loaded", &self.resources.initialized())
            .finish_non_exhaustive()
    }
}

impl DiscoveryCatalog {
    pub fn new(discovery: Arc<dyn Discovery>) -> Self {
        Self {
            discovery,
            resources: OnceCell::new(),
        }
    }

    /// Resources of every group's preferred version, in discovery order
    ///
    /// The first call walks discovery; later calls return the same snapshot.
    /// A failed walk is not cached.
    pub async fn resources(&self) -> Result<&[ApiResourceDescriptor], ResolveError> {
        let resources = self
            .resources
            .get_or_try_init(|| preferred_resources(self.discovery.as_ref()))
            .await?;
        Ok(resources.as_slice())
    }
}
