//! # Binding Aggregator
//!
//! Finds every RoleBinding and ClusterRoleBinding that grants an action.
//!
//! Matching roles and enumerating bindings are separate passes: the first
//! fills a [`RoleIndex`] with the identities of roles that have at least one
//! matching rule, the second keeps the bindings whose role reference is in
//! that index. Both passes are generic over role and binding kind.

use super::role_index::{RoleIdentity, RoleIndex};
use super::rule::Action;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, Role, RoleBinding};

/// A Role or ClusterRole: a named, scoped container of rules
pub trait RuleSource {
    fn identity(&self) -> RoleIdentity;
    fn rules(&self) -> &[PolicyRule];
}

/// A RoleBinding or ClusterRoleBinding: points at one role
pub trait BindingSource {
    fn role_identity(&self) -> RoleIdentity;
}

impl RuleSource for Role {
    fn identity(&self) -> RoleIdentity {
        RoleIdentity::role(self.metadata.name.clone().unwrap_or_default())
    }

    fn rules(&self) -> &[PolicyRule] {
        self.rules.as_deref().unwrap_or_default()
    }
}

impl RuleSource for ClusterRole {
    fn identity(&self) -> RoleIdentity {
        RoleIdentity::cluster_role(self.metadata.name.clone().unwrap_or_default())
    }

    fn rules(&self) -> &[PolicyRule] {
        self.rules.as_deref().unwrap_or_default()
    }
}

impl BindingSource for RoleBinding {
    /// May reference either a Role or a ClusterRole
    fn role_identity(&self) -> RoleIdentity {
        RoleIdentity::from(&self.role_ref)
    }
}

impl BindingSource for ClusterRoleBinding {
    /// Always references a ClusterRole
    fn role_identity(&self) -> RoleIdentity {
        RoleIdentity::cluster_role(self.role_ref.name.clone())
    }
}

/// Insert the identity of every role with at least one rule granting `action`
pub fn index_granting_roles<'a, R, I>(index: &mut RoleIndex, roles: I, action: &Action)
where
    R: RuleSource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    for role in roles {
        if role.rules().iter().any(|rule| action.matches(rule)) {
            index.insert(role.identity());
        }
    }
}

/// Keep the bindings whose role reference is indexed, in input order
pub fn granting_bindings<B>(index: &RoleIndex, bindings: &[B]) -> Vec<B>
where
    B: BindingSource + Clone,
{
    bindings
        .iter()
        .filter(|binding| index.contains(&binding.role_identity()))
        .cloned()
        .collect()
}

/// Bindings that grant the requested action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantingBindings {
    pub role_bindings: Vec<RoleBinding>,
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
}

impl GrantingBindings {
    pub fn is_empty(&self) -> bool {
        self.role_bindings.is_empty() && self.cluster_role_bindings.is_empty()
    }
}

/// Compute the RoleBindings and ClusterRoleBindings granting `action`
///
/// Pure and infallible: empty inventories yield empty results, meaning no
/// subject has the access.
pub fn compute_granting_bindings(
    action: &Action,
    roles: &[Role],
    cluster_roles: &[ClusterRole],
    role_bindings: &[RoleBinding],
    cluster_role_bindings: &[ClusterRoleBinding],
) -> GrantingBindings {
    let mut index = RoleIndex::new();
    index_granting_roles(&mut index, roles, action);
    index_granting_roles(&mut index, cluster_roles, action);

    GrantingBindings {
        role_bindings: granting_bindings(&index, role_bindings),
        cluster_role_bindings: granting_bindings(&index, cluster_role_bindings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::rbac::v1::RoleRef;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn role_ref(kind: &str, name: &str) -> RoleRef {
        RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    fn rule(verbs: &[&str], resources: &[&str]) -> PolicyRule {
        PolicyRule {
            verbs: verbs.iter().map(ToString::to_string).collect(),
            resources: Some(resources.iter().map(ToString::to_string).collect()),
            ..Default::default()
        }
    }

    fn role(name: &str, rules: Vec<PolicyRule>) -> Role {
        Role {
            metadata: meta(name),
            rules: Some(rules),
        }
    }

    fn cluster_role(name: &str, rules: Vec<PolicyRule>) -> ClusterRole {
        ClusterRole {
            metadata: meta(name),
            rules: Some(rules),
            ..Default::default()
        }
    }

    fn role_binding(name: &str, kind: &str, role: &str) -> RoleBinding {
        RoleBinding {
            metadata: meta(name),
            role_ref: role_ref(kind, role),
            subjects: None,
        }
    }

    fn cluster_role_binding(name: &str, role: &str) -> ClusterRoleBinding {
        ClusterRoleBinding {
            metadata: meta(name),
            role_ref: role_ref("ClusterRole", role),
            subjects: None,
        }
    }

    fn names<T: k8s_openapi::Metadata<Ty = ObjectMeta>>(items: &[T]) -> Vec<String> {
        items
            .iter()
            .map(|item| item.metadata().name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_empty_inventory_yields_no_bindings() {
        let result =
            compute_granting_bindings(&Action::resource("get", "pods", None), &[], &[], &[], &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_role_binding_can_reference_cluster_role() {
        let cluster_roles = vec![cluster_role("pod-reader", vec![rule(&["get"], &["pods"])])];
        let role_bindings = vec![
            role_binding("reads-pods", "ClusterRole", "pod-reader"),
            role_binding("wrong-scope", "Role", "pod-reader"),
        ];

        let result = compute_granting_bindings(
            &Action::resource("get", "pods", None),
            &[],
            &cluster_roles,
            &role_bindings,
            &[],
        );

        assert_eq!(names(&result.role_bindings), vec!["reads-pods"]);
    }

    #[test]
    fn test_role_without_matching_rules_contributes_nothing() {
        let roles = vec![
            role("writer", vec![rule(&["create"], &["pods"])]),
            role("empty", vec![]),
        ];
        let role_bindings = vec![
            role_binding("a", "Role", "writer"),
            role_binding("b", "Role", "empty"),
        ];

        let result = compute_granting_bindings(
            &Action::resource("get", "pods", None),
            &roles,
            &[],
            &role_bindings,
            &[],
        );

        assert!(result.is_empty());
    }

    #[test]
    fn test_any_matching_rule_is_enough() {
        let roles = vec![role(
            "mixed",
            vec![rule(&["create"], &["pods"]), rule(&["get"], &["pods"])],
        )];
        let role_bindings = vec![role_binding("mixed-binding", "Role", "mixed")];

        let result = compute_granting_bindings(
            &Action::resource("get", "pods", None),
            &roles,
            &[],
            &role_bindings,
            &[],
        );

        assert_eq!(names(&result.role_bindings), vec!["mixed-binding"]);
    }

    #[test]
    fn test_cluster_role_binding_ignores_same_named_role() {
        let roles = vec![role("edit", vec![rule(&["*"], &["*"])])];
        let cluster_role_bindings = vec![cluster_role_binding("edit-everywhere", "edit")];

        let result = compute_granting_bindings(
            &Action::resource("delete", "secrets", None),
            &roles,
            &[],
            &[],
            &cluster_role_bindings,
        );

        assert!(result.cluster_role_bindings.is_empty());
    }

    #[test]
    fn test_bindings_keep_inventory_order() {
        let cluster_roles = vec![
            cluster_role("b-role", vec![rule(&["list"], &["nodes"])]),
            cluster_role("a-role", vec![rule(&["*"], &["nodes"])]),
        ];
        let cluster_role_bindings = vec![
            cluster_role_binding("zeta", "a-role"),
            cluster_role_binding("unrelated", "c-role"),
            cluster_role_binding("alpha", "b-role"),
            cluster_role_binding("mid", "a-role"),
        ];

        let result = compute_granting_bindings(
            &Action::resource("list", "nodes", None),
            &[],
            &cluster_roles,
            &[],
            &cluster_role_bindings,
        );

        assert_eq!(
            names(&result.cluster_role_bindings),
            vec!["zeta", "alpha", "mid"]
        );
    }
}
