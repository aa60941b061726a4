use super::abi::{self, signature_hash};
use super::context::Web3Context;
use super::error::ActionError;
use super::events::{LogFilter, ProjectLog, RawLog, Topic};
use super::network_config;
use super::types::project_identifier;

/// Registry logs for one account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectLogs {
    pub created: Vec<ProjectLog>,
    pub updated: Vec<ProjectLog>,
    /// Fully-qualified identifiers of every created project, in log order
    pub ids: Vec<String>,
}

/// `ProjectCreated` logs owned by `account`.
pub fn created_filter(registry: &str, account: &str) -> Result<LogFilter, ActionError> {
    Ok(LogFilter::full_history(registry, vec![
        Some(Topic::Single(abi::to_hex(signature_hash::PROJECT_CREATED))),
        None,
        Some(Topic::Single(abi::address_topic(account)?)),
    ]))
}

/// `MetadataUpdated` logs for any of the given 32-byte project id topics.
pub fn updated_filter(registry: &str, project_topics: Vec<String>) -> LogFilter {
    LogFilter::full_history(registry, vec![
        Some(Topic::Single(abi::to_hex(signature_hash::METADATA_UPDATED))),
        Some(Topic::AnyOf(project_topics)),
    ])
}

/// Drop the address on chains whose nodes mishandle it.
pub fn for_chain(filter: LogFilter, chain_id: u64) -> LogFilter {
    if network_config::ignores_address_filter(chain_id) {
        filter.without_address()
    } else {
        filter
    }
}

/// Keep only logs emitted by the registry itself.
pub fn retain_registry_logs(logs: Vec<RawLog>, registry: &str) -> Vec<RawLog> {
    logs.into_iter()
        .filter(|log| log.address.eq_ignore_ascii_case(registry))
        .collect()
}

/// Registry logs matching `filter`. Logs that fail to decode are skipped.
async fn query_registry_logs(ctx: &Web3Context, filter: LogFilter) -> Result<Vec<ProjectLog>, ActionError> {
    let filter = for_chain(filter, ctx.chain_id);
    log::debug!("eth_getLogs {:?}", filter);

    let logs = ctx.provider.get_logs(&filter).await?;
    let decoded = retain_registry_logs(logs, &ctx.project_registry)
        .iter()
        .filter_map(|raw| match ProjectLog::decode(raw) {
            Ok(project_log) => project_log,
            Err(e) => {
                log::warn!("Skipping undecodable registry log at block {}: {}", raw.block_number, e);
                None
            }
        })
        .collect();
    Ok(decoded)
}

/// Creation logs for the connected account, then metadata updates for the
/// projects found. No creation logs means no second query.
pub async fn fetch_project_created_updated_events(ctx: &Web3Context) -> Result<ProjectLogs, ActionError> {
    let registry = ctx.project_registry.as_str();

    let created: Vec<ProjectLog> = query_registry_logs(ctx, created_filter(registry, &ctx.account)?)
        .await?
        .into_iter()
        .filter(|log| matches!(log, ProjectLog::Created { .. }))
        .collect();

    if created.is_empty() {
        return Ok(ProjectLogs::default());
    }

    let ids = created.iter()
        .map(|log| project_identifier(ctx.chain_id, registry, log.project_number()))
        .collect();

    let project_topics: Vec<String> = created.iter()
        .map(|log| abi::uint_topic(log.project_number()))
        .collect();

    let updated = query_registry_logs(ctx, updated_filter(registry, project_topics))
        .await?
        .into_iter()
        .filter(|log| matches!(log, ProjectLog::MetadataUpdated { .. }))
        .collect();

    Ok(ProjectLogs { created, updated, ids })
}
