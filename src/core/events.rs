use alloy_primitives::U256;
use alloy_sol_types::SolEvent;
use serde::{Deserialize, Deserializer, Serialize};

use super::abi::{self, signature_hash, AbiError, MetadataUpdated, ProjectCreated};

/// One position of an `eth_getLogs` topic filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Topic {
    Single(String),
    AnyOf(Vec<String>),
}

/// `eth_getLogs` filter object. An absent address matches every contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub from_block: String,
    pub to_block: String,
    pub topics: Vec<Option<Topic>>,
}

impl LogFilter {
    /// Filter spanning the whole chain history.
    pub fn full_history(address: &str, topics: Vec<Option<Topic>>) -> Self {
        Self {
            address: Some(address.to_string()),
            from_block: "0x00".to_string(),
            to_block: "latest".to_string(),
            topics,
        }
    }

    pub fn without_address(mut self) -> Self {
        self.address = None;
        self
    }
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub address: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub block_number: u64,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    abi::parse_quantity(&value).map_err(serde::de::Error::custom)
}

/// Registry events with their indexed project number decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLog {
    Created {
        project_number: U256,
        block_number: u64,
    },
    MetadataUpdated {
        project_number: U256,
        block_number: u64,
    },
}

impl ProjectLog {
    /// Decode a raw registry log. Logs of other events yield `Ok(None)`.
    pub fn decode(log: &RawLog) -> Result<Option<Self>, AbiError> {
        let topics = log.topics.iter()
            .map(|topic| abi::parse_word(topic))
            .collect::<Result<Vec<_>, _>>()?;
        let data = abi::decode_hex(&log.data)?;
        let block_number = log.block_number;

        let decoded = match topics.first().map(|topic| topic.0) {
            Some(signature_hash::PROJECT_CREATED) => {
                let event = decode_event::<ProjectCreated>(&topics, &data)?;
                ProjectLog::Created { project_number: event.projectID, block_number }
            }
            Some(signature_hash::METADATA_UPDATED) => {
                let event = decode_event::<MetadataUpdated>(&topics, &data)?;
                ProjectLog::MetadataUpdated { project_number: event.projectID, block_number }
            }
            _ => return Ok(None),
        };

        Ok(Some(decoded))
    }

    pub fn project_number(&self) -> U256 {
        match self {
            ProjectLog::Created { project_number, .. } => *project_number,
            ProjectLog::MetadataUpdated { project_number, .. } => *project_number,
        }
    }
}

fn decode_event<E: SolEvent>(topics: &[alloy_primitives::B256], data: &[u8]) -> Result<E, AbiError> {
    Ok(E::decode_raw_log(topics.iter().copied(), data, false)?)
}
