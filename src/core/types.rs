use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Block numbers at which a project was created and last had its metadata updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEvent {
    pub created_at_block: u64,
    pub updated_at_block: Option<u64>,
}

/// Keyed by the composite project identifier, see [`project_identifier`].
pub type ProjectEventsMap = BTreeMap<String, ProjectEvent>;

/// `"<chainId>:<registryAddress>:<projectNumber>"`
pub fn project_identifier(chain_id: u64, registry: &str, project_number: U256) -> String {
    format!("{}:{}:{}", chain_id, registry, project_number)
}

/// Numeric project id from either a composite identifier or a bare decimal number.
pub fn project_number(project_id: &str) -> Option<U256> {
    let digits = project_id.rsplit(':').next()?.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(digits, 10).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppStatus {
    Pending,
    Approved,
    Rejected,
    Appealed,
    Fraud,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppStatus::Pending => "PENDING",
            AppStatus::Approved => "APPROVED",
            AppStatus::Rejected => "REJECTED",
            AppStatus::Appealed => "APPEALED",
            AppStatus::Fraud => "FRAUD",
            AppStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// A project's application to one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub status: AppStatus,
    #[serde(rename = "roundID")]
    pub round_id: String,
}
