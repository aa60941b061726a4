/// Chain ids the application knows about.
pub const LOCALHOST: u64 = 31337;
pub const GOERLI: u64 = 5;
pub const OPTIMISM: u64 = 10;
pub const FANTOM: u64 = 250;
pub const FANTOM_TESTNET: u64 = 4002;

/// Deployment and endpoint configuration for one chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: &'static str,
    pub project_registry: &'static str,
    pub rpc_endpoint: &'static str,
    pub subgraph_url: &'static str,
}

impl ChainConfig {
    const LOCALHOST: ChainConfig = ChainConfig {
        chain_id: LOCALHOST,
        name: "localhost",
        project_registry: "0x832c5391dc7931312CbdBc1046669c9c3A4A28d5",
        rpc_endpoint: "http://localhost:8545",
        subgraph_url: "http://localhost:8000/subgraphs/name/gitcoinco/grants-round-localhost",
    };

    const GOERLI: ChainConfig = ChainConfig {
        chain_id: GOERLI,
        name: "goerli",
        project_registry: "0x832c5391dc7931312CbdBc1046669c9c3A4A28d5",
        rpc_endpoint: "https://rpc.ankr.com/eth_goerli",
        subgraph_url: "https://api.thegraph.com/subgraphs/name/gitcoinco/grants-round-goerli-testnet",
    };

    const OPTIMISM: ChainConfig = ChainConfig {
        chain_id: OPTIMISM,
        name: "optimism",
        project_registry: "0x8e1bD5Da87C14dd8e08F7ecc2aBf9D1d558ea174",
        rpc_endpoint: "https://mainnet.optimism.io",
        subgraph_url: "https://api.thegraph.com/subgraphs/name/gitcoinco/grants-round-optimism-mainnet",
    };

    const FANTOM: ChainConfig = ChainConfig {
        chain_id: FANTOM,
        name: "fantom",
        project_registry: "0x8e1bD5Da87C14dd8e08F7ecc2aBf9D1d558ea174",
        rpc_endpoint: "https://rpc.ftm.tools",
        subgraph_url: "https://api.thegraph.com/subgraphs/name/gitcoinco/grants-round-fantom-mainnet",
    };

    const FANTOM_TESTNET: ChainConfig = ChainConfig {
        chain_id: FANTOM_TESTNET,
        name: "fantomTestnet",
        project_registry: "0x984749e408FF0446d8ADaf20E293F2F299396631",
        rpc_endpoint: "https://rpc.testnet.fantom.network",
        subgraph_url: "https://api.thegraph.com/subgraphs/name/gitcoinco/grants-round-fantom-testnet",
    };

    /// Get configuration for a chain id
    pub fn for_chain(chain_id: u64) -> Option<&'static ChainConfig> {
        match chain_id {
            LOCALHOST => Some(&Self::LOCALHOST),
            GOERLI => Some(&Self::GOERLI),
            OPTIMISM => Some(&Self::OPTIMISM),
            FANTOM => Some(&Self::FANTOM),
            FANTOM_TESTNET => Some(&Self::FANTOM_TESTNET),
            _ => None,
        }
    }
}

pub fn chain_config(chain_id: u64) -> Option<&'static ChainConfig> {
    ChainConfig::for_chain(chain_id)
}

/// The Fantom RPC nodes ignore the `address` key of `eth_getLogs`, so
/// queries there drop it and filter the results locally.
pub fn ignores_address_filter(chain_id: u64) -> bool {
    matches!(chain_id, FANTOM | FANTOM_TESTNET)
}
