//! Lists the accounts the configured node exposes, marking the one the
//! deployment will hand the system role.

use deploy::config::SYSTEM_WALLET_INDEX;
use deploy::rpc::RpcClient;
use deploy::shared;

#[tokio::main]
async fn main() {
    let config = shared::config();
    let rpc = RpcClient::new(&config.rpc_url);
    let accounts = match rpc.accounts().await {
        Ok(accounts) => accounts,
        Err(err) => {
            eprintln!("failed to fetch accounts from {}: {err}", config.rpc_url);
            std::process::exit(1);
        }
    };
    for (index, account) in accounts.iter().enumerate() {
        if index == SYSTEM_WALLET_INDEX {
            println!("[{index}] {account}  <- system wallet");
        } else {
            println!("[{index}] {account}");
        }
    }
    if accounts.len() <= SYSTEM_WALLET_INDEX {
        eprintln!(
            "warning: node exposes {} accounts, the deployment needs index {}",
            accounts.len(),
            SYSTEM_WALLET_INDEX
        );
    }
}
