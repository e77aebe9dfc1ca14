//! # Run
//!
//! Completes and validates the query, warns about missing list permissions,
//! fetches the RBAC inventory and prints the bindings granting the action.

use super::initialization::kube_config;
use crate::cli::{complete, print_api_access_warnings, print_bindings, validate, Cli};
use crate::cluster::{check_api_access, KubeAccessChecker, KubeNamespaces, RbacInventory};
use crate::config::WhoCanConfig;
use crate::discovery::{Discovery, DiscoveryResourceResolver, KubeDiscovery};
use anyhow::{Context, Result};
use kube::Client;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Run `kubectl who-can` for the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let settings = WhoCanConfig::from_env();
    let config = kube_config(cli.context.as_deref(), &settings).await?;
    let current_namespace = config.default_namespace.clone();
    let client = Client::try_from(config).context("creating Kubernetes client")?;

    let discovery: Arc<dyn Discovery> = Arc::new(KubeDiscovery::new(client.clone()));
    let resolver = DiscoveryResourceResolver::from_discovery(discovery);
    let namespaces = KubeNamespaces::new(client.clone());

    let query = complete(&cli, &resolver, || Ok(current_namespace)).await?;
    validate(&query, &namespaces).await?;
    info!(
        verb = %query.action.verb,
        target = %query.action.target(),
        namespace = query.namespace.as_deref().unwrap_or("<all>"),
        "query resolved"
    );

    let warnings = if settings.check_api_access {
        let checker = KubeAccessChecker::new(client.clone());
        check_api_access(&checker, &namespaces, query.namespace.as_deref())
            .await
            .context("checking API access")?
    } else {
        debug!("API access check disabled");
        Vec::new()
    };

    let inventory = RbacInventory::fetch(&client, query.namespace.as_deref()).await?;
    let bindings = inventory.granting_bindings(&query.action);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_api_access_warnings(&mut out, &warnings)?;
    print_bindings(&mut out, &query.action, &bindings)?;
    out.flush()?;
    Ok(())
}
