pub mod abi;
pub mod chain_logs;
pub mod context;
pub mod contracts;
pub mod error;
pub mod ethereum;
pub mod events;
pub mod fetch;
pub mod gateway;
pub mod graphql;
pub mod metadata;
pub mod monitoring;
pub mod network_config;
pub mod project_actions;
pub mod reconcile;
pub mod rpc_base;
pub mod settings;
pub mod store;
pub mod tasks;
pub mod types;
pub mod wizard;

#[cfg(test)]
pub mod test_support;

pub use context::Web3Context;
pub use store::{Action, Dispatch, RootState};
