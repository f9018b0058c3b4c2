use deploy::address::Address;
use deploy::config::resolve_config;
use deploy::deployer::{ConstructorArgs, ContractArtifact, DeployOptions};
use deploy::error::DeployError;
use deploy::fixture::{DeployerEvent, FailAt, RecordingDeployer};

mod utils;
use utils::{accounts, context, development_context, migrate};

mod tests {
    use super::*;

    #[test]
    fn development_config_carries_the_token_parameters() {
        let config = resolve_config(&development_context()).unwrap();
        assert_eq!(config.token_name, "TRIBES");
        assert_eq!(config.token_symbol, "TRBX");
        assert_eq!(config.system_wallet, Address([7; 20]));
        assert!(config.overwrite);
    }

    #[tokio::test]
    async fn happy_path_runs_link_deploy_confirm_in_order() {
        let mut deployer = RecordingDeployer::new();
        let instance = migrate(&development_context(), &mut deployer)
            .await
            .unwrap();

        assert_eq!(
            deployer.events(),
            &[
                DeployerEvent::Link {
                    library: ContractArtifact::SafeMath,
                    target: ContractArtifact::TribesToken,
                },
                DeployerEvent::Deploy {
                    target: ContractArtifact::TribesToken,
                    args: ConstructorArgs {
                        token_name: "TRIBES".to_string(),
                        token_symbol: "TRBX".to_string(),
                        system_wallet: Address([7; 20]),
                    },
                    options: DeployOptions { overwrite: true },
                },
                DeployerEvent::Deployed {
                    target: ContractArtifact::TribesToken,
                },
            ]
        );
        assert_eq!(instance.contract, ContractArtifact::TribesToken);
        assert_eq!(instance.address, deployer.instance_address());
    }

    #[tokio::test]
    async fn unsupported_network_never_reaches_the_deployer() {
        let mut deployer = RecordingDeployer::new();
        let result = migrate(&context("mainnet", 10), &mut deployer).await;

        match result {
            Err(DeployError::UnsupportedNetwork(name)) => assert_eq!(name, "mainnet"),
            other => panic!("expected UnsupportedNetwork, got {other:?}"),
        }
        assert!(deployer.events().is_empty());
    }

    #[tokio::test]
    async fn short_account_list_never_reaches_the_deployer() {
        let mut deployer = RecordingDeployer::new();
        let result = migrate(&context("development", 5), &mut deployer).await;

        assert!(matches!(
            result,
            Err(DeployError::MissingSystemWallet {
                required: 8,
                available: 5,
            })
        ));
        assert!(deployer.events().is_empty());
    }

    #[tokio::test]
    async fn link_failure_stops_the_pipeline() {
        let mut deployer = RecordingDeployer::failing_at(FailAt::Link);
        let result = migrate(&development_context(), &mut deployer).await;

        assert!(matches!(result, Err(DeployError::Backend(_))));
        assert_eq!(deployer.events().len(), 1);
        assert!(matches!(deployer.events()[0], DeployerEvent::Link { .. }));
    }

    #[tokio::test]
    async fn deploy_failure_skips_confirmation() {
        let mut deployer = RecordingDeployer::failing_at(FailAt::Deploy);
        let result = migrate(&development_context(), &mut deployer).await;

        assert!(matches!(result, Err(DeployError::Backend(_))));
        let events = deployer.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], DeployerEvent::Link { .. }));
        assert!(matches!(events[1], DeployerEvent::Deploy { .. }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, DeployerEvent::Deployed { .. })));
    }

    #[tokio::test]
    async fn confirmation_failure_surfaces_as_an_error() {
        let mut deployer = RecordingDeployer::failing_at(FailAt::Deployed);
        let result = migrate(&development_context(), &mut deployer).await;

        assert!(matches!(result, Err(DeployError::Backend(_))));
        assert_eq!(deployer.events().len(), 3);
    }

    #[tokio::test]
    async fn system_wallet_is_account_seven() {
        let ctx = development_context();
        let config = resolve_config(&ctx).unwrap();
        assert_eq!(config.system_wallet, ctx.accounts[7]);

        // still account seven with a longer list
        let ctx = context("development", 20);
        let config = resolve_config(&ctx).unwrap();
        assert_eq!(config.system_wallet, accounts(20)[7]);
    }
}
