use std::rc::Rc;

use super::context::Web3Context;
use super::contracts;
use super::error::ActionError;
use super::monitoring;
use super::store::{Action, Dispatch};
use super::types::project_number;

/// Load a project's off-chain metadata: registry pointer, then the pinned document.
pub async fn fetch_grant_data(ctx: Web3Context, dispatch: Rc<dyn Dispatch>, id: String) {
    dispatch.dispatch(Action::GrantMetadataLoadingUri { id: id.clone() });

    match load_grant_metadata(&ctx, &id).await {
        Ok(metadata) => dispatch.dispatch(Action::GrantMetadataFetched { id, metadata }),
        Err(e) => {
            monitoring::report_error("Failed to load grant metadata", &e, &[("projectID", &id)]);
            dispatch.dispatch(Action::GrantMetadataFetchingError { id, error: e.message() });
        }
    }
}

async fn load_grant_metadata(ctx: &Web3Context, id: &str) -> Result<serde_json::Value, ActionError> {
    let number = project_number(id).ok_or_else(|| ActionError::InvalidProjectId(id.to_string()))?;
    let meta_ptr = contracts::project_metadata_ptr(ctx.provider.as_ref(), &ctx.project_registry, number).await?;
    Ok(ctx.gateway.fetch_json(&meta_ptr.pointer).await?)
}
