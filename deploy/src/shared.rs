use std::path::PathBuf;

use dotenvy::dotenv;

const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub network: String,
    pub artifacts_dir: PathBuf,
}

pub fn config() -> Config {
    dotenv().ok();
    Config {
        rpc_url: std::env::var("RPC_URL").expect("missing env var RPC_URL"),
        network: std::env::var("NETWORK").expect("missing env var NETWORK"),
        artifacts_dir: std::env::var("ARTIFACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR)),
    }
}
