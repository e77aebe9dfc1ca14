//! # Error Types
//!
//! Typed errors for resource resolution, namespace validation and CLI option
//! handling. The runtime wraps these with `anyhow` context.

use thiserror::Error;

/// Errors produced while resolving a resource token against discovery
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No descriptor matches the token, even after REST mapping
    #[error("the server doesn't have a resource type \"{name}\"")]
    ResourceNotFound { name: String },

    /// The resource exists but does not advertise the verb
    #[error(
        "the \"{resource}\" resource does not support the \"{verb}\" verb, only [{}]",
        .supported.join(" ")
    )]
    VerbNotSupported {
        resource: String,
        verb: String,
        supported: Vec<String>,
    },

    /// Transport failure while reading the discovery endpoints
    #[error("{context}: {source}")]
    Discovery {
        context: String,
        #[source]
        source: kube::Error,
    },

    /// The REST mapper has no resource for the bare token
    #[error("no matches for resource \"{resource}\"")]
    Mapping { resource: String },
}

impl ResolveError {
    pub(crate) fn not_found(resource: &str, sub_resource: Option<&str>) -> Self {
        let name = match sub_resource {
            Some(sub) => format!("{resource}/{sub}"),
            None => resource.to_string(),
        };
        Self::ResourceNotFound { name }
    }

    pub(crate) fn api_groups(source: kube::Error) -> Self {
        Self::Discovery {
            context: "getting API groups".to_string(),
            source,
        }
    }

    pub(crate) fn group_resources(source: kube::Error) -> Self {
        Self::Discovery {
            context: "getting resources for API group".to_string(),
            source,
        }
    }

    /// Short machine-friendly label, used in structured log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveError::ResourceNotFound { .. } => "resource_not_found",
            ResolveError::VerbNotSupported { .. } => "verb_not_supported",
            ResolveError::Discovery { .. } => "discovery_failure",
            ResolveError::Mapping { .. } => "mapping_failure",
        }
    }
}

/// Errors produced while validating a namespace
#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("\"{0}\" not found")]
    NotFound(String),

    #[error("getting namespace: {0}")]
    Lookup(#[source] kube::Error),

    #[error("invalid status: {0}")]
    InvalidStatus(String),
}

/// Errors produced while completing and validating command-line options
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("you must specify two or three arguments: verb, resource, and optional resourceName")]
    ArgumentCount,

    #[error("getting namespace from current context: {0}")]
    CurrentNamespace(#[source] anyhow::Error),

    #[error("resolving resource: {0}")]
    Resolve(#[source] ResolveError),

    #[error("--subresource cannot be used with NONRESOURCEURL")]
    SubResourceWithNonResourceUrl,

    #[error("validating namespace: {0}")]
    Namespace(#[source] NamespaceError),
}
