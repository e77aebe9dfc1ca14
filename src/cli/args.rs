//! # Command-Line Arguments
//!
//! `clap` definition of the `kubectl who-can` command line.

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  # List who can get pods in any namespace
  kubectl who-can get pods --all-namespaces

  # List who can create pods in the current namespace
  kubectl who-can create pods

  # List who can get pods in the namespace \"foo\"
  kubectl who-can get pods -n foo

  # List who can get the service named \"mongodb\" in the namespace \"bar\"
  kubectl who-can get svc mongodb --namespace bar

  # List who can do everything with pods in the current namespace
  kubectl who-can '*' pods

  # List who can list every resource in the namespace \"baz\"
  kubectl who-can list '*' -n baz

  # List who can read pod logs
  kubectl who-can get pods --subresource=log

  # List who can access the URL /logs/
  kubectl who-can get /logs";

/// Shows which subjects have RBAC permissions to VERB [TYPE | TYPE/NAME | NONRESOURCEURL]
/// in the current namespace.
///
/// VERB is a logical Kubernetes API verb like 'get', 'list', 'watch', 'delete', etc.
/// TYPE is a Kubernetes resource. Shortcuts and singular names will be resolved, e.g. 'po' or 'service'.
/// NAME is the name of a particular Kubernetes resource.
/// NONRESOURCEURL is a partial URL that starts with "/".
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kubectl-who-can", version, after_help = EXAMPLES)]
pub struct Cli {
    /// VERB [TYPE | TYPE/NAME | NONRESOURCEURL] [NAME]
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// SubResource such as pod/log or deployment/scale
    #[arg(long)]
    pub subresource: Option<String>,

    /// Kubernetes namespace (defaults to current context namespace)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// If true, check for users that can do the specified action in any of the available namespaces
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,
}
