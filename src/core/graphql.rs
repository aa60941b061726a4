use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use super::fetch::{self, FetchError};
use super::network_config;
use super::types::{AppStatus, Application};

const ROUND_PROJECTS_QUERY: &str = r#"query roundProjects($projectID: String) {
  roundProjects(where: { project: $projectID }) {
    status
    round {
      id
    }
  }
}"#;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphqlError {
    UnsupportedChain(u64),
    Fetch(FetchError),
    Query(String),
    Decode(String),
}

impl fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphqlError::UnsupportedChain(chain_id) => write!(f, "No indexer for chain {}", chain_id),
            GraphqlError::Fetch(e) => write!(f, "{}", e),
            GraphqlError::Query(msg) => write!(f, "GraphQL error: {}", msg),
            GraphqlError::Decode(msg) => write!(f, "Unexpected GraphQL response: {}", msg),
        }
    }
}

impl From<FetchError> for GraphqlError {
    fn from(e: FetchError) -> Self {
        GraphqlError::Fetch(e)
    }
}

/// Indexing service that knows which rounds a project applied to.
#[async_trait(?Send)]
pub trait RoundIndexer {
    async fn round_projects(&self, project_id: &str) -> Result<Vec<Application>, GraphqlError>;
}

pub struct GraphqlClient {
    endpoint: String,
}

impl GraphqlClient {
    pub fn for_chain(chain_id: u64) -> Result<Self, GraphqlError> {
        let config = network_config::chain_config(chain_id)
            .ok_or(GraphqlError::UnsupportedChain(chain_id))?;
        Ok(Self::with_endpoint(config.subgraph_url))
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self { endpoint: endpoint.to_string() }
    }

    /// Run a query and return its `data` object.
    pub async fn query(&self, query: &str, variables: serde_json::Value) -> Result<serde_json::Value, GraphqlError> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let response = fetch::post_json(&self.endpoint, &body).await?;
        extract_data(response)
    }
}

#[async_trait(?Send)]
impl RoundIndexer for GraphqlClient {
    async fn round_projects(&self, project_id: &str) -> Result<Vec<Application>, GraphqlError> {
        let data = self.query(ROUND_PROJECTS_QUERY, serde_json::json!({ "projectID": project_id })).await?;
        parse_round_projects(data)
    }
}

fn extract_data(response: serde_json::Value) -> Result<serde_json::Value, GraphqlError> {
    if let Some(errors) = response.get("errors").and_then(|e| e.as_array()) {
        let messages: Vec<&str> = errors.iter()
            .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
            .collect();
        if !errors.is_empty() {
            return Err(GraphqlError::Query(messages.join("; ")));
        }
    }

    response.get("data")
        .cloned()
        .filter(|data| !data.is_null())
        .ok_or_else(|| GraphqlError::Decode("response has no data".to_string()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoundProjectsData {
    round_projects: Vec<RoundProject>,
}

#[derive(Deserialize)]
struct RoundProject {
    status: AppStatus,
    round: RoundRef,
}

#[derive(Deserialize)]
struct RoundRef {
    id: String,
}

fn parse_round_projects(data: serde_json::Value) -> Result<Vec<Application>, GraphqlError> {
    let data: RoundProjectsData = serde_json::from_value(data)
        .map_err(|e| GraphqlError::Decode(e.to_string()))?;

    Ok(data.round_projects.into_iter()
        .map(|rp| Application { status: rp.status, round_id: rp.round.id })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_projects() {
        let response = serde_json::json!({
            "data": {
                "roundProjects": [
                    { "status": "PENDING", "round": { "id": "0xround1" } },
                    { "status": "APPROVED", "round": { "id": "0xround2" } }
                ]
            }
        });
        let applications = parse_round_projects(extract_data(response).unwrap()).unwrap();
        assert_eq!(applications, vec![
            Application { status: AppStatus::Pending, round_id: "0xround1".to_string() },
            Application { status: AppStatus::Approved, round_id: "0xround2".to_string() },
        ]);
    }

    #[test]
    fn test_graphql_errors_are_surfaced() {
        let response = serde_json::json!({
            "errors": [{ "message": "indexing_error" }],
            "data": null
        });
        assert_eq!(extract_data(response), Err(GraphqlError::Query("indexing_error".to_string())));
    }

    #[test]
    fn test_missing_data() {
        let response = serde_json::json!({ "data": null });
        assert!(matches!(extract_data(response), Err(GraphqlError::Decode(_))));
    }

    #[test]
    fn test_unsupported_chain() {
        assert!(matches!(GraphqlClient::for_chain(1), Err(GraphqlError::UnsupportedChain(1))));
    }
}
