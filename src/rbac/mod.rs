//! # RBAC Evaluation
//!
//! Pure evaluation of RBAC objects against a requested action.
//!
//! ## Sub-modules
//!
//! - `rule` - policy rule matcher and the [`Action`] being evaluated
//! - `role_index` - role identities known to grant the action
//! - `aggregator` - joins matching roles to the bindings that reference them

pub mod aggregator;
pub mod role_index;
pub mod rule;

pub use aggregator::{
    compute_granting_bindings, granting_bindings, index_granting_roles, BindingSource,
    GrantingBindings, RuleSource,
};
pub use role_index::{RoleIdentity, RoleIndex};
pub use rule::{policy_rule_matches, Action};
