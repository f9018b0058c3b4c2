pub mod address;
pub mod artifact;
pub mod config;
pub mod deployer;
pub mod encode;
pub mod error;
pub mod eth;
pub mod fixture;
pub mod rpc;
pub mod shared;
