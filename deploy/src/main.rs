use deploy::config::{deployer_account, resolve_config, NetworkContext};
use deploy::deployer::run_pipeline;
use deploy::error::DeployError;
use deploy::eth::EthDeployer;
use deploy::rpc::RpcClient;
use deploy::shared;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Err(err) = run().await {
        error!(error = %err, "deployment failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DeployError> {
    let config = shared::config();
    let rpc = RpcClient::new(&config.rpc_url);

    let ctx = NetworkContext {
        network: config.network.clone(),
        accounts: rpc.accounts().await?,
    };
    let deploy_config = resolve_config(&ctx)?;
    let from = deployer_account(&ctx)?;

    let mut deployer = EthDeployer::connect(rpc, from, config.artifacts_dir).await?;
    run_pipeline(&deploy_config, &mut deployer).await?;
    Ok(())
}
