use std::fmt;

use super::abi::AbiError;
use super::gateway::GatewayError;
use super::graphql::GraphqlError;
use super::rpc_base::RpcError;

/// Anything that can fail inside an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    Rpc(RpcError),
    Abi(AbiError),
    Gateway(GatewayError),
    Graphql(GraphqlError),
    InvalidProjectId(String),
    Spawn(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Rpc(e) => write!(f, "{}", e),
            ActionError::Abi(e) => write!(f, "{}", e),
            ActionError::Gateway(e) => write!(f, "{}", e),
            ActionError::Graphql(e) => write!(f, "{}", e),
            ActionError::InvalidProjectId(id) => write!(f, "Invalid project id: {}", id),
            ActionError::Spawn(msg) => write!(f, "Failed to schedule task: {}", msg),
        }
    }
}

impl ActionError {
    /// The underlying error message, without the layer's prefix.
    pub fn message(&self) -> String {
        match self {
            ActionError::Rpc(RpcError::ProviderError { message, .. }) => message.clone(),
            ActionError::Graphql(GraphqlError::Query(message)) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<RpcError> for ActionError {
    fn from(e: RpcError) -> Self {
        ActionError::Rpc(e)
    }
}

impl From<AbiError> for ActionError {
    fn from(e: AbiError) -> Self {
        ActionError::Abi(e)
    }
}

impl From<GatewayError> for ActionError {
    fn from(e: GatewayError) -> Self {
        ActionError::Gateway(e)
    }
}

impl From<GraphqlError> for ActionError {
    fn from(e: GraphqlError) -> Self {
        ActionError::Graphql(e)
    }
}

impl From<futures::task::SpawnError> for ActionError {
    fn from(e: futures::task::SpawnError) -> Self {
        ActionError::Spawn(e.to_string())
    }
}
