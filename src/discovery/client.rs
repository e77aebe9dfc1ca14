//! # Kubernetes Discovery Client
//!
//! `Discovery` implementation backed by the API server's `/api` and `/apis`
//! endpoints.

use super::Discovery;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIGroupList, APIResourceList, GroupVersionForDiscovery,
};
use kube::Client;
use tracing::debug;

/// Discovery over a live cluster
#[derive(Clone)]
pub struct KubeDiscovery {
    client: Client,
}

impl std::fmt::Debug for KubeDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeDiscovery").finish_non_exhaustive()
    }
}

impl KubeDiscovery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The legacy core group is served from `/api` and is not part of the
    /// `/apis` group list, so it is synthesised here with its first served
    /// version as the preferred one.
    async fn core_group(&self) -> Result<Option<APIGroup>, kube::Error> {
        let versions = self.client.list_core_api_versions().await?;
        let versions: Vec<GroupVersionForDiscovery> = versions
            .versions
            .into_iter()
            .map(|version| GroupVersionForDiscovery {
                group_version: version.clone(),
                version,
            })
            .collect();

        Ok(versions.first().cloned().map(|preferred| APIGroup {
            name: String::new(),
            preferred_version: Some(preferred),
            versions,
            ..Default::default()
        }))
    }
}

#[async_trait]
impl Discovery for KubeDiscovery {
    async fn server_groups(&self) -> Result<APIGroupList, kube::Error> {
        let mut groups = Vec::new();
        if let Some(core) = self.core_group().await? {
            groups.push(core);
        }
        groups.extend(self.client.list_api_groups().await?.groups);
        debug!(groups = groups.len(), "discovered API groups");
        Ok(APIGroupList { groups })
    }

    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList, kube::Error> {
        // Core group versions have no group prefix ("v1" rather than "apps/v1")
        if group_version.contains('/') {
            self.client.list_api_group_resources(group_version).await
        } else {
            self.client.list_core_api_resources(group_version).await
        }
    }
}
