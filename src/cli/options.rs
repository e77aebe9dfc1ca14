//! # Query Options
//!
//! Turns parsed command-line arguments into a [`WhoCanQuery`]: splits the
//! positional arguments, resolves the resource against discovery, picks the
//! namespace scope, and validates the result.

use super::args::Cli;
use crate::cluster::NamespaceValidator;
use crate::discovery::ResourceResolver;
use crate::error::OptionsError;
use crate::rbac::Action;
use tracing::{debug, warn};

/// A fully resolved who-can query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoCanQuery {
    pub action: Action,
    pub sub_resource: Option<String>,
    /// `None` means all namespaces
    pub namespace: Option<String>,
}

/// Positional arguments split into their parts, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Resource { resource: String, name: Option<String> },
    NonResourceUrl(String),
}

fn parse_args(args: &[String]) -> Result<(String, Target), OptionsError> {
    if !(2..=3).contains(&args.len()) {
        return Err(OptionsError::ArgumentCount);
    }
    let verb = args[0].clone();

    if args[1].starts_with('/') {
        if let Some(extra) = args.get(2) {
            warn!(name = %extra, "ignoring resource name for a non-resource URL");
        }
        return Ok((verb, Target::NonResourceUrl(args[1].clone())));
    }

    let (resource, mut name) = match args[1].split_once('/') {
        Some((resource, name)) => (resource.to_string(), Some(name.to_string())),
        None => (args[1].clone(), None),
    };
    if let Some(explicit) = args.get(2) {
        name = Some(explicit.clone());
    }
    Ok((verb, Target::Resource { resource, name }))
}

/// Resolve the namespace scope
///
/// `--all-namespaces` wins over `--namespace`; without either flag the
/// current context's namespace is used, and only then is `current_namespace`
/// called.
fn resolve_namespace<F>(cli: &Cli, current_namespace: F) -> Result<Option<String>, OptionsError>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    if cli.all_namespaces {
        return Ok(None);
    }
    if let Some(ns) = cli.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        return Ok(Some(ns.to_string()));
    }
    let ns = current_namespace().map_err(OptionsError::CurrentNamespace)?;
    Ok(Some(ns).filter(|ns| !ns.is_empty()))
}

/// Complete the query from the command line
///
/// Resource tokens are resolved to their canonical name (`pv` becomes
/// `persistentvolumes`); non-resource URLs are taken as-is.
pub async fn complete<F>(
    cli: &Cli,
    resolver: &dyn ResourceResolver,
    current_namespace: F,
) -> Result<WhoCanQuery, OptionsError>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    let (verb, target) = parse_args(&cli.args)?;
    let sub_resource = cli.subresource.clone().filter(|sub| !sub.is_empty());

    let action = match target {
        Target::NonResourceUrl(url) => Action::non_resource(verb, url),
        Target::Resource { resource, name } => {
            let resolved = resolver
                .resolve(&verb, &resource, sub_resource.as_deref())
                .await
                .map_err(|err| {
                    debug!(
                        resource = %resource,
                        error = err.as_str(),
                        "resource resolution failed"
                    );
                    OptionsError::Resolve(err)
                })?;
            debug!(resource = %resource, resolved = %resolved, "resolved resource argument");
            Action::resource(verb, resolved, name)
        }
    };

    let namespace = resolve_namespace(cli, current_namespace)?;

    Ok(WhoCanQuery {
        action,
        sub_resource,
        namespace,
    })
}

/// Validate a completed query
pub async fn validate(
    query: &WhoCanQuery,
    validator: &dyn NamespaceValidator,
) -> Result<(), OptionsError> {
    if query.action.is_non_resource() && query.sub_resource.is_some() {
        return Err(OptionsError::SubResourceWithNonResourceUrl);
    }
    if let Some(ns) = &query.namespace {
        validator
            .validate(ns)
            .await
            .map_err(OptionsError::Namespace)?;
    }
    Ok(())
}
