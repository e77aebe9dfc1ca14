//! # Constants
//!
//! Shared constants for RBAC matching, discovery and runtime defaults.

/// Wildcard matching every verb in a policy rule
pub const VERB_ALL: &str = "*";

/// Wildcard matching every resource in a policy rule
pub const RESOURCE_ALL: &str = "*";

/// Wildcard matching every non-resource URL in a policy rule
pub const NON_RESOURCE_ALL: &str = "*";

/// `roleRef.kind` value identifying a cluster-scoped role
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

/// Namespace phase required for a namespace to be considered valid
pub const NAMESPACE_ACTIVE_PHASE: &str = "Active";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "who_can=warn";

/// Default kube client read timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Run the self-access-review pass by default
pub const DEFAULT_CHECK_API_ACCESS: bool = true;

/// Column padding used by the tabular report
pub const TABLE_PADDING: usize = 2;
