//! # Namespaces
//!
//! Namespace listing and validation.

use crate::constants::NAMESPACE_ACTIVE_PHASE;
use crate::error::NamespaceError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::{api::ListParams, Api, Client};
use tracing::debug;

/// Lists the names of all namespaces in the cluster
#[async_trait]
pub trait NamespaceLister: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error>;
}

/// Checks that a namespace exists and is active
#[async_trait]
pub trait NamespaceValidator: Send + Sync {
    async fn validate(&self, name: &str) -> Result<(), NamespaceError>;
}

/// Namespace operations against a live cluster
#[derive(Clone)]
pub struct KubeNamespaces {
    client: Client,
}

impl std::fmt::Debug for KubeNamespaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeNamespaces").finish_non_exhaustive()
    }
}

impl KubeNamespaces {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl NamespaceLister for KubeNamespaces {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error> {
        let namespaces = self.api().list(&ListParams::default()).await?;
        Ok(namespaces
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }
}

#[async_trait]
impl NamespaceValidator for KubeNamespaces {
    async fn validate(&self, name: &str) -> Result<(), NamespaceError> {
        let namespace = self
            .api()
            .get_opt(name)
            .await
            .map_err(NamespaceError::Lookup)?
            .ok_or_else(|| NamespaceError::NotFound(name.to_string()))?;

        check_active(&namespace)?;
        debug!(namespace = name, "namespace is active");
        Ok(())
    }
}

/// A namespace is only valid while its phase is `Active`
pub fn check_active(namespace: &Namespace) -> Result<(), NamespaceError> {
    let phase = namespace
        .status
        .as_ref()
        .and_then(|status| status.phase.as_deref())
        .unwrap_or_default();

    if phase == NAMESPACE_ACTIVE_PHASE {
        Ok(())
    } else {
        Err(NamespaceError::InvalidStatus(phase.to_string()))
    }
}
