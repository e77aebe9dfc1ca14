//! # Initialization
//!
//! Process setup: rustls crypto provider, tracing subscriber, and the
//! Kubernetes client configuration.

use crate::config::WhoCanConfig;
use crate::constants::DEFAULT_LOG_FILTER;
use anyhow::{anyhow, Context, Result};
use kube::config::{Config, KubeConfigOptions};
use tracing::debug;

/// Install the rustls crypto provider and the tracing subscriber
///
/// Must run before any kube client is built. Logs go to stderr so that
/// stdout carries only the report.
pub fn initialize() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("initializing tracing subscriber: {e}"))?;

    // rustls 0.23 needs a process-wide provider when none is selected via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
    Ok(())
}

/// Build the client configuration
///
/// With an explicit `context` the kubeconfig is loaded for that context;
/// otherwise the configuration is inferred (kubeconfig, then in-cluster).
/// The request timeout from `settings` applies to every API call.
pub async fn kube_config(context: Option<&str>, settings: &WhoCanConfig) -> Result<Config> {
    let mut config = match context {
        Some(context) => Config::from_kubeconfig(&KubeConfigOptions {
            context: Some(context.to_string()),
            ..Default::default()
        })
        .await
        .with_context(|| format!("loading kubeconfig for context {context}"))?,
        None => Config::infer()
            .await
            .context("inferring Kubernetes configuration")?,
    };

    config.read_timeout = Some(settings.request_timeout());
    debug!(
        cluster_url = %config.cluster_url,
        namespace = %config.default_namespace,
        timeout_secs = settings.request_timeout_secs,
        "loaded Kubernetes configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_tolerates_installed_crypto_provider() {
        // An earlier install must not make process setup fail
        let _ = rustls::crypto::ring::default_provider().install_default();
        initialize().expect("initialization succeeds with a provider already installed");
    }
}
