//! # Runtime Module
//!
//! Process-level setup and the top-level `kubectl who-can` flow.

pub mod initialization;
pub mod run;

pub use initialization::{initialize, kube_config};
pub use run::run;
