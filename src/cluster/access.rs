//! # API Access Checks
//!
//! Advisory pass run before the RBAC inventory is evaluated: asks the API
//! server, via `SelfSubjectAccessReview`, whether the caller may list the
//! objects the report is built from. Every denied check becomes a warning
//! that the report might be incomplete. The checks never influence matching.

use super::namespace::NamespaceLister;
use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::authorization::v1::{
    ResourceAttributes, SelfSubjectAccessReview, SelfSubjectAccessReviewSpec,
};
use kube::{api::PostParams, Api, Client};
use tracing::{debug, warn};

/// Answers "may the current user perform `verb` on `resource`?"
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// `namespace` of `None` checks across all namespaces
    async fn is_allowed_to(
        &self,
        verb: &str,
        resource: &str,
        namespace: Option<&str>,
    ) -> Result<bool, kube::Error>;
}

/// Access checker backed by `SelfSubjectAccessReview`
#[derive(Clone)]
pub struct KubeAccessChecker {
    client: Client,
}

impl std::fmt::Debug for KubeAccessChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeAccessChecker").finish_non_exhaustive()
    }
}

impl KubeAccessChecker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessChecker for KubeAccessChecker {
    async fn is_allowed_to(
        &self,
        verb: &str,
        resource: &str,
        namespace: Option<&str>,
    ) -> Result<bool, kube::Error> {
        let review = SelfSubjectAccessReview {
            spec: SelfSubjectAccessReviewSpec {
                resource_attributes: Some(ResourceAttributes {
                    verb: Some(verb.to_string()),
                    resource: Some(resource.to_string()),
                    namespace: namespace.map(ToString::to_string),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let api: Api<SelfSubjectAccessReview> = Api::all(self.client.clone());
        let response = api.create(&PostParams::default(), &review).await?;
        let allowed = response.status.is_some_and(|status| status.allowed);
        debug!(verb, resource, namespace = namespace.unwrap_or("<all>"), allowed, "access review");
        Ok(allowed)
    }
}

/// One list permission the report depends on
#[derive(Debug, Clone, PartialEq, Eq)]
struct AccessCheck {
    verb: &'static str,
    resource: &'static str,
    namespace: Option<String>,
}

impl AccessCheck {
    fn new(verb: &'static str, resource: &'static str, namespace: Option<String>) -> Self {
        Self {
            verb,
            resource,
            namespace,
        }
    }

    fn warning(&self) -> String {
        match &self.namespace {
            Some(ns) => format!(
                "The user is not allowed to {} {} in the {ns} namespace",
                self.verb, self.resource
            ),
            None => format!("The user is not allowed to {} {}", self.verb, self.resource),
        }
    }
}

/// Check the caller's permission to list the RBAC objects in scope
///
/// For all namespaces (`namespace` of `None`) this checks `list namespaces`
/// and then `list roles` / `list rolebindings` in every namespace; for a
/// single namespace only that namespace's roles and role bindings are
/// checked. Returns one warning per denied check, in check order.
pub async fn check_api_access(
    checker: &dyn AccessChecker,
    namespaces: &dyn NamespaceLister,
    namespace: Option<&str>,
) -> Result<Vec<String>> {
    let mut checks = Vec::new();
    match namespace {
        None => {
            checks.push(AccessCheck::new("list", "namespaces", None));
            let names = namespaces
                .list_namespaces()
                .await
                .context("listing namespaces")?;
            for name in names {
                checks.push(AccessCheck::new("list", "roles", Some(name.clone())));
                checks.push(AccessCheck::new("list", "rolebindings", Some(name)));
            }
        }
        Some(ns) => {
            checks.push(AccessCheck::new("list", "roles", Some(ns.to_string())));
            checks.push(AccessCheck::new("list", "rolebindings", Some(ns.to_string())));
        }
    }

    let mut warnings = Vec::new();
    for check in &checks {
        let allowed = checker
            .is_allowed_to(check.verb, check.resource, check.namespace.as_deref())
            .await?;
        if !allowed {
            let warning = check.warning();
            warn!("{}", warning);
            warnings.push(warning);
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_text_without_namespace() {
        let check = AccessCheck::new("list", "namespaces", None);
        assert_eq!(check.warning(), "The user is not allowed to list namespaces");
    }

    #[test]
    fn test_warning_text_with_namespace() {
        let check = AccessCheck::new("list", "rolebindings", Some("bar".to_string()));
        assert_eq!(
            check.warning(),
            "The user is not allowed to list rolebindings in the bar namespace"
        );
    }
}
