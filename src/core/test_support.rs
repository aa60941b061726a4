//! In-memory stand-ins for the chain, gateway and indexer used by the action tests.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use futures::executor::LocalPool;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::str::FromStr;

use super::abi::{self, signature_hash, MetaPtr, MetadataUpdated, ProjectCreated};
use super::context::Web3Context;
use super::events::{LogFilter, RawLog, Topic};
use super::gateway::{ContentGateway, GatewayError};
use super::graphql::{GraphqlError, RoundIndexer};
use super::rpc_base::{ChainProvider, RpcError};
use super::store::{Action, Dispatch};
use super::types::Application;

pub const REGISTRY: &str = "0x832c5391dc7931312CbdBc1046669c9c3A4A28d5";
pub const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";

fn meta_ptr(pointer: &str) -> MetaPtr {
    MetaPtr { protocol: U256::from(1), pointer: pointer.to_string() }
}

fn raw_log<E: SolEvent>(address: &str, event: &E, block_number: u64) -> RawLog {
    let log_data = event.encode_log_data();
    RawLog {
        address: address.to_string(),
        topics: log_data.topics().iter().map(|topic| abi::topic_hex(*topic)).collect(),
        data: abi::to_hex(&log_data.data),
        block_number,
        transaction_hash: None,
    }
}

pub fn created_log(address: &str, project_number: u64, block_number: u64) -> RawLog {
    let event = ProjectCreated {
        projectID: U256::from(project_number),
        owner: Address::from_str(ACCOUNT).unwrap(),
    };
    raw_log(address, &event, block_number)
}

pub fn updated_log(address: &str, project_number: u64, block_number: u64) -> RawLog {
    let event = MetadataUpdated {
        projectID: U256::from(project_number),
        metaPtr: meta_ptr(&format!("QmProject{}", project_number)),
    };
    raw_log(address, &event, block_number)
}

/// `eth_call` return data of `projectsMetaPtr()`
pub fn meta_ptr_return(pointer: &str) -> String {
    abi::to_hex(abi::projectsMetaPtrCall::abi_encode_returns(&(meta_ptr(pointer),)))
}

/// `eth_call` return data of `projects(uint256)`
pub fn project_return(id: u64, pointer: &str) -> String {
    abi::to_hex(abi::projectsCall::abi_encode_returns(&(U256::from(id), meta_ptr(pointer))))
}

#[derive(Default)]
struct ProviderState {
    created: Vec<RawLog>,
    updated: Vec<RawLog>,
    logs_error: Option<RpcError>,
    call_results: HashMap<String, Result<String, RpcError>>,
    filters: Vec<LogFilter>,
    calls: Vec<(String, String)>,
}

/// Answers `eth_getLogs` by event signature and `eth_call` by target address.
#[derive(Clone, Default)]
pub struct FakeProvider {
    state: Rc<RefCell<ProviderState>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(self, logs: Vec<RawLog>) -> Self {
        self.state.borrow_mut().created = logs;
        self
    }

    pub fn with_updated(self, logs: Vec<RawLog>) -> Self {
        self.state.borrow_mut().updated = logs;
        self
    }

    pub fn failing_logs(self, error: RpcError) -> Self {
        self.state.borrow_mut().logs_error = Some(error);
        self
    }

    pub fn with_call_result(self, to: &str, data: &str) -> Self {
        self.state.borrow_mut().call_results.insert(to.to_lowercase(), Ok(data.to_string()));
        self
    }

    pub fn with_call_error(self, to: &str, error: RpcError) -> Self {
        self.state.borrow_mut().call_results.insert(to.to_lowercase(), Err(error));
        self
    }

    pub fn filters(&self) -> Vec<LogFilter> {
        self.state.borrow().filters.clone()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.state.borrow().calls.clone()
    }
}

#[async_trait(?Send)]
impl ChainProvider for FakeProvider {
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, RpcError> {
        let mut state = self.state.borrow_mut();
        state.filters.push(filter.clone());
        if let Some(error) = &state.logs_error {
            return Err(error.clone());
        }

        let created_topic = abi::to_hex(signature_hash::PROJECT_CREATED);
        let is_created_query = matches!(
            filter.topics.first(),
            Some(Some(Topic::Single(topic))) if *topic == created_topic
        );

        if is_created_query {
            Ok(state.created.clone())
        } else {
            Ok(state.updated.clone())
        }
    }

    async fn call(&self, to: &str, data: &str) -> Result<String, RpcError> {
        let mut state = self.state.borrow_mut();
        state.calls.push((to.to_string(), data.to_string()));
        state.call_results.get(&to.to_lowercase())
            .cloned()
            .unwrap_or_else(|| Err(RpcError::Other(format!("no contract at {}", to))))
    }
}

#[derive(Clone, Default)]
pub struct FakeGateway {
    documents: Rc<RefCell<HashMap<String, Result<serde_json::Value, GatewayError>>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, pointer: &str, document: serde_json::Value) -> Self {
        self.documents.borrow_mut().insert(pointer.to_string(), Ok(document));
        self
    }

    pub fn with_error(self, pointer: &str, error: GatewayError) -> Self {
        self.documents.borrow_mut().insert(pointer.to_string(), Err(error));
        self
    }
}

#[async_trait(?Send)]
impl ContentGateway for FakeGateway {
    async fn fetch_json(&self, pointer: &str) -> Result<serde_json::Value, GatewayError> {
        self.documents.borrow().get(pointer)
            .cloned()
            .unwrap_or(Err(GatewayError::EmptyPointer))
    }
}

#[derive(Clone)]
pub struct FakeIndexer {
    result: Rc<RefCell<Result<Vec<Application>, GraphqlError>>>,
    queries: Rc<RefCell<Vec<String>>>,
}

impl FakeIndexer {
    pub fn new() -> Self {
        Self {
            result: Rc::new(RefCell::new(Ok(Vec::new()))),
            queries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_applications(self, applications: Vec<Application>) -> Self {
        *self.result.borrow_mut() = Ok(applications);
        self
    }

    pub fn failing(self, error: GraphqlError) -> Self {
        *self.result.borrow_mut() = Err(error);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RoundIndexer for FakeIndexer {
    async fn round_projects(&self, project_id: &str) -> Result<Vec<Application>, GraphqlError> {
        self.queries.borrow_mut().push(project_id.to_string());
        self.result.borrow().clone()
    }
}

#[derive(Default)]
pub struct RecordingDispatch {
    actions: RefCell<Vec<Action>>,
}

impl RecordingDispatch {
    pub fn actions(&self) -> Vec<Action> {
        self.actions.borrow().clone()
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, action: Action) {
        self.actions.borrow_mut().push(action);
    }
}

/// Builds a [`Web3Context`] over fakes, with a local pool standing in for
/// the browser event loop.
pub struct TestContext {
    chain_id: u64,
    provider: FakeProvider,
    gateway: FakeGateway,
    indexer: FakeIndexer,
    pool: RefCell<LocalPool>,
}

impl TestContext {
    pub fn new(chain_id: u64, provider: FakeProvider) -> Self {
        Self {
            chain_id,
            provider,
            gateway: FakeGateway::new(),
            indexer: FakeIndexer::new(),
            pool: RefCell::new(LocalPool::new()),
        }
    }

    pub fn with_gateway(mut self, gateway: FakeGateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_indexer(mut self, indexer: FakeIndexer) -> Self {
        self.indexer = indexer;
        self
    }

    pub fn context(&self) -> Web3Context {
        Web3Context {
            chain_id: self.chain_id,
            account: ACCOUNT.to_string(),
            project_registry: REGISTRY.to_string(),
            provider: Rc::new(self.provider.clone()),
            gateway: Rc::new(self.gateway.clone()),
            indexer: Rc::new(self.indexer.clone()),
            spawner: Rc::new(self.pool.borrow().spawner()),
        }
    }

    /// Run spawned background work until nothing can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}
