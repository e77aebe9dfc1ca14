//! # Cluster Collaborators
//!
//! Everything that reads from the API server apart from discovery: the RBAC
//! inventory, namespaces, and self-access reviews.

pub mod access;
pub mod inventory;
pub mod namespace;

pub use access::{check_api_access, AccessChecker, KubeAccessChecker};
pub use inventory::RbacInventory;
pub use namespace::{KubeNamespaces, NamespaceLister, NamespaceValidator};
