//! # kubectl who-can
//!
//! kubectl plugin listing the subjects that have RBAC permissions to perform
//! an action.
//!
//! ## Usage
//!
//! ```bash
//! # List who can get pods in any namespace
//! kubectl who-can get pods --all-namespaces
//!
//! # List who can read pod logs in the namespace "foo"
//! kubectl who-can get pods --subresource=log -n foo
//!
//! # List who can access the URL /logs/
//! kubectl who-can get /logs
//! ```

use anyhow::Result;
use clap::Parser;
use who_can::cli::Cli;
use who_can::runtime;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    runtime::initialize()?;
    runtime::run(cli).await
}
