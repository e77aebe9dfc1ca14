//! # Role Reference Index
//!
//! Set of roles known to grant an action, keyed by name and scope. Binding
//! role references are joined against it.

use crate::constants::CLUSTER_ROLE_KIND;
use k8s_openapi::api::rbac::v1::RoleRef;
use std::collections::HashSet;

/// Identity of a Role or ClusterRole
///
/// A namespaced Role and a ClusterRole with the same name are different
/// identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleIdentity {
    pub name: String,
    pub is_cluster_role: bool,
}

impl RoleIdentity {
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_cluster_role: false,
        }
    }

    pub fn cluster_role(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_cluster_role: true,
        }
    }
}

impl From<&RoleRef> for RoleIdentity {
    /// Any kind other than `ClusterRole` is a namespaced Role reference
    fn from(role_ref: &RoleRef) -> Self {
        Self {
            name: role_ref.name.clone(),
            is_cluster_role: role_ref.kind == CLUSTER_ROLE_KIND,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleIndex {
    roles: HashSet<RoleIdentity>,
}

impl RoleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: RoleIdentity) -> bool {
        self.roles.insert(identity)
    }

    pub fn contains(&self, identity: &RoleIdentity) -> bool {
        self.roles.contains(identity)
    }

    /// Whether a binding's role reference points at an indexed role
    pub fn matches(&self, role_ref: &RoleRef) -> bool {
        self.contains(&RoleIdentity::from(role_ref))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<RoleIdentity> for RoleIndex {
    fn from_iter<I: IntoIterator<Item = RoleIdentity>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_ref(kind: &str, name: &str) -> RoleRef {
        RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_non_cluster_role_kind_matches_namespaced_role() {
        let index: RoleIndex = [RoleIdentity::role("hello")].into_iter().collect();

        assert!(index.matches(&role_ref("Something else", "hello")));
        assert!(!index.matches(&role_ref("ClusterRole", "hello")));
    }

    #[test]
    fn test_role_and_cluster_role_are_distinct() {
        let mut index = RoleIndex::new();
        index.insert(RoleIdentity::cluster_role("edit"));

        assert!(index.matches(&role_ref("ClusterRole", "edit")));
        assert!(!index.matches(&role_ref("Role", "edit")));
        assert!(!index.contains(&RoleIdentity::role("edit")));
    }

    #[test]
    fn test_membership_independent_of_insertion_order() {
        let identities = vec![
            RoleIdentity::role("view"),
            RoleIdentity::cluster_role("admin"),
            RoleIdentity::role("edit"),
            RoleIdentity::cluster_role("edit"),
        ];
        let forward: RoleIndex = identities.iter().cloned().collect();
        let backward: RoleIndex = identities.iter().rev().cloned().collect();

        for probe in [
            role_ref("Role", "view"),
            role_ref("ClusterRole", "view"),
            role_ref("ClusterRole", "admin"),
            role_ref("Role", "edit"),
            role_ref("ClusterRole", "edit"),
            role_ref("Role", "missing"),
        ] {
            assert_eq!(forward.matches(&probe), backward.matches(&probe));
        }
        assert_eq!(forward.len(), 4);
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut index = RoleIndex::new();
        assert!(index.insert(RoleIdentity::role("view")));
        assert!(!index.insert(RoleIdentity::role("view")));
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }
}
