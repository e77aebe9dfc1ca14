//! # kubectl-who-can
//!
//! Answers "which subjects can perform VERB on TYPE (or NAME, or a
//! non-resource URL)?" from the cluster's RBAC objects.
//!
//! ## Overview
//!
//! 1. **Resolve** the resource argument against API discovery
//!    ([`discovery`]), turning `po` or `service` into the canonical plural.
//! 2. **Match** every Role and ClusterRole rule against the requested
//!    action ([`rbac`]).
//! 3. **Aggregate** the RoleBindings and ClusterRoleBindings referencing a
//!    granting role ([`rbac::compute_granting_bindings`]).
//! 4. **Report** the bindings as tables ([`cli::output`]).
//!
//! The cluster is reached through small traits ([`discovery::Discovery`],
//! [`cluster::AccessChecker`], [`cluster::NamespaceValidator`], ...) with
//! kube-backed implementations.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod rbac;
pub mod runtime;
