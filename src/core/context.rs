use futures::task::LocalSpawn;
use std::rc::Rc;

use super::gateway::{ContentGateway, PinataClient};
use super::graphql::{GraphqlClient, RoundIndexer};
use super::network_config;
use super::rpc_base::{ChainProvider, RpcError};
use super::tasks::BrowserSpawner;

/// Everything an action needs to reach the outside world. Cloned into every
/// spawned task instead of living in a global.
#[derive(Clone)]
pub struct Web3Context {
    pub chain_id: u64,
    pub account: String,
    pub project_registry: String,
    pub provider: Rc<dyn ChainProvider>,
    pub gateway: Rc<dyn ContentGateway>,
    pub indexer: Rc<dyn RoundIndexer>,
    pub spawner: Rc<dyn LocalSpawn>,
}

impl Web3Context {
    /// Context for a connected wallet on a supported chain, using the
    /// configured registry, subgraph and IPFS gateway.
    pub fn connect(
        chain_id: u64,
        account: &str,
        provider: Rc<dyn ChainProvider>,
    ) -> Result<Self, RpcError> {
        let config = network_config::chain_config(chain_id)
            .ok_or(RpcError::UnsupportedChain(chain_id))?;
        let indexer = GraphqlClient::for_chain(chain_id)
            .map_err(|_| RpcError::UnsupportedChain(chain_id))?;

        log::info!("Connected {} on {} ({})", account, config.name, chain_id);

        Ok(Self {
            chain_id,
            account: account.to_string(),
            project_registry: config.project_registry.to_string(),
            provider,
            gateway: Rc::new(PinataClient::new()),
            indexer: Rc::new(indexer),
            spawner: Rc::new(BrowserSpawner),
        })
    }
}
