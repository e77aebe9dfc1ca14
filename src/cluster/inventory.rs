//! # RBAC Inventory
//!
//! Fetches the Roles, ClusterRoles, RoleBindings and ClusterRoleBindings the
//! aggregator evaluates.

use crate::rbac::{compute_granting_bindings, Action, GrantingBindings};
use anyhow::{Context, Result};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use kube::{api::ListParams, Api, Client};
use tracing::{debug, info_span};

/// Snapshot of the RBAC objects in scope
#[derive(Debug, Clone, Default)]
pub struct RbacInventory {
    pub roles: Vec<Role>,
    pub cluster_roles: Vec<ClusterRole>,
    pub role_bindings: Vec<RoleBinding>,
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
}

impl RbacInventory {
    /// Fetch the inventory for one namespace, or for all namespaces when
    /// `namespace` is `None`. Cluster-scoped objects are always fetched.
    pub async fn fetch(client: &Client, namespace: Option<&str>) -> Result<Self> {
        let roles: Api<Role> = namespaced_or_all(client, namespace);
        let role_bindings: Api<RoleBinding> = namespaced_or_all(client, namespace);
        let cluster_roles: Api<ClusterRole> = Api::all(client.clone());
        let cluster_role_bindings: Api<ClusterRoleBinding> = Api::all(client.clone());
        let params = ListParams::default();

        let (roles, cluster_roles, role_bindings, cluster_role_bindings) = futures::try_join!(
            async { roles.list(&params).await.context("listing roles") },
            async { cluster_roles.list(&params).await.context("listing cluster roles") },
            async { role_bindings.list(&params).await.context("listing role bindings") },
            async {
                cluster_role_bindings
                    .list(&params)
                    .await
                    .context("listing cluster role bindings")
            },
        )?;

        let inventory = Self {
            roles: roles.items,
            cluster_roles: cluster_roles.items,
            role_bindings: role_bindings.items,
            cluster_role_bindings: cluster_role_bindings.items,
        };
        debug!(
            namespace = namespace.unwrap_or("<all>"),
            roles = inventory.roles.len(),
            cluster_roles = inventory.cluster_roles.len(),
            role_bindings = inventory.role_bindings.len(),
            cluster_role_bindings = inventory.cluster_role_bindings.len(),
            "fetched RBAC inventory"
        );
        Ok(inventory)
    }

    /// Bindings in this inventory that grant `action`
    pub fn granting_bindings(&self, action: &Action) -> GrantingBindings {
        let span = info_span!("rbac.aggregate", verb = %action.verb, target = %action.target());
        span.in_scope(|| {
            compute_granting_bindings(
                action,
                &self.roles,
                &self.cluster_roles,
                &self.role_bindings,
                &self.cluster_role_bindings,
            )
        })
    }
}

fn namespaced_or_all<K>(client: &Client, namespace: Option<&str>) -> Api<K>
where
    K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
    <K as kube::Resource>::DynamicType: Default,
{
    match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    }
}
