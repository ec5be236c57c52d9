use chainquote_core::{
    config, Credentials, Deployment, DeploymentId, DeploymentSource, PriceAdapter, PriceLine,
    Symbol,
};

use crate::cli::Cli;
use crate::error::CliError;

/// Built-in deployment names, one per line.
pub fn list_deployments() -> String {
    DeploymentId::ALL
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deployment selected by the flags, with overrides applied.
pub fn deployment(cli: &Cli, credentials: &Credentials) -> Result<Deployment, CliError> {
    let source = match &cli.config {
        Some(path) => DeploymentSource::File(path.as_path()),
        None => DeploymentSource::Builtin(cli.deployment),
    };

    let mut deployment = config::resolve(source, credentials)?;
    if let Some(base_url) = &cli.base_url {
        deployment = deployment.with_base_url(base_url.as_str());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        deployment = deployment.with_timeout_ms(timeout_ms);
    }
    deployment.validate()?;
    Ok(deployment)
}

pub async fn prices(cli: &Cli) -> Result<PriceLine, CliError> {
    let deployment = deployment(cli, &Credentials::from_env())?;
    let symbols = cli
        .symbols
        .iter()
        .map(|raw| Symbol::new(raw))
        .collect::<Vec<_>>();

    let adapter = PriceAdapter::with_reqwest(deployment);
    Ok(adapter.prices(&symbols).await?)
}
