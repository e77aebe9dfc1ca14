//! # Resource Identity Resolver
//!
//! Turns a `(verb, resource, sub-resource)` triple into the canonical resource
//! name the cluster serves, rejecting unknown resources and unsupported
//! verbs.

use super::{
    ApiResourceDescriptor, Discovery, DiscoveryCatalog, DiscoveryRestMapper, ResourceIndex,
    RestMapper,
};
use crate::constants::{RESOURCE_ALL, VERB_ALL};
use crate::error::ResolveError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Resolves resource tokens to canonical resource names
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Resolve `resource` (plural, short name or bare token) and an optional
    /// `sub_resource`, then check `verb` against the resolved descriptor.
    ///
    /// The returned name is either a resource (`pods`) or a sub-resource
    /// (`pods/log`).
    async fn resolve(
        &self,
        verb: &str,
        resource: &str,
        sub_resource: Option<&str>,
    ) -> Result<String, ResolveError>;
}

/// Resolver backed by cluster discovery and a REST mapper
///
/// The resource index is built on first use from the shared catalog and
/// reused for the lifetime of the resolver, which represents one
/// point-in-time view of the cluster.
pub struct DiscoveryResourceResolver {
    catalog: Arc<DiscoveryCatalog>,
    mapper: Arc<dyn RestMapper>,
    index: OnceCell<ResourceIndex>,
}

impl std::fmt::Debug for DiscoveryResourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryResourceResolver")
            .field("index_built", &self.index.initialized())
            .finish_non_exhaustive()
    }
}

impl DiscoveryResourceResolver {
    pub fn new(catalog: Arc<DiscoveryCatalog>, mapper: Arc<dyn RestMapper>) -> Self {
        Self {
            catalog,
            mapper,
            index: OnceCell::new(),
        }
    }

    /// Resolver and REST mapper sharing one catalog over `discovery`
    pub fn from_discovery(discovery: Arc<dyn Discovery>) -> Self {
        let catalog = Arc::new(DiscoveryCatalog::new(discovery));
        let mapper = Arc::new(DiscoveryRestMapper::new(Arc::clone(&catalog)));
        Self::new(catalog, mapper)
    }

    async fn index(&self) -> Result<&ResourceIndex, ResolveError> {
        self.index
            .get_or_try_init(|| async {
                let descriptors = self.catalog.resources().await?;
                let index = ResourceIndex::new(descriptors.iter().cloned());
                debug!(keys = index.len(), "built resource index");
                Ok::<_, ResolveError>(index)
            })
            .await
    }

    async fn lookup_resource<'a>(
        &self,
        index: &'a ResourceIndex,
        resource: &str,
    ) -> Result<Option<&'a ApiResourceDescriptor>, ResolveError> {
        if let Some(descriptor) = index.get(resource) {
            return Ok(Some(descriptor));
        }

        match self.mapper.resource_for(resource).await {
            Ok(mapped) => Ok(index.get(&mapped)),
            Err(ResolveError::Mapping { .. }) => {
                debug!(resource, "REST mapper has no match");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn resource_for(
        &self,
        resource: &str,
        sub_resource: Option<&str>,
    ) -> Result<ApiResourceDescriptor, ResolveError> {
        let index = self.index().await?;

        let descriptor = self
            .lookup_resource(index, resource)
            .await?
            .ok_or_else(|| ResolveError::not_found(resource, sub_resource))?;

        let Some(sub) = sub_resource else {
            return Ok(descriptor.clone());
        };

        index
            .get(&format!("{}/{sub}", descriptor.name))
            .cloned()
            .ok_or_else(|| ResolveError::not_found(resource, Some(sub)))
    }
}

#[async_trait]
impl ResourceResolver for DiscoveryResourceResolver {
    async fn resolve(
        &self,
        verb: &str,
        resource: &str,
        sub_resource: Option<&str>,
    ) -> Result<String, ResolveError> {
        if resource == RESOURCE_ALL {
            return Ok(resource.to_string());
        }
        let sub_resource = sub_resource.filter(|sub| !sub.is_empty());

        let descriptor = self.resource_for(resource, sub_resource).await?;

        if verb != VERB_ALL && !descriptor.supports_verb(verb) {
            return Err(ResolveError::VerbNotSupported {
                resource: descriptor.name,
                verb: verb.to_string(),
                supported: descriptor.verbs,
            });
        }

        debug!(resource, resolved = %descriptor.name, "resolved resource");
        Ok(descriptor.name)
    }
}
