//! Actions that load a user's projects and the status of their round applications.

use std::rc::Rc;

use super::chain_logs::fetch_project_created_updated_events;
use super::context::Web3Context;
use super::contracts::{self, generate_unique_round_application_id};
use super::error::ActionError;
use super::metadata::fetch_grant_data;
use super::monitoring;
use super::reconcile::reconcile_project_events;
use super::store::{Action, Dispatch};
use super::tasks::TaskGroup;
use super::types::{project_number, AppStatus, Application, ProjectEventsMap};

/// Shown to the user whatever went wrong while loading projects
pub const LOAD_PROJECTS_ERROR: &str = "Cannot load projects";

/// Load the connected account's projects from registry logs. With
/// `with_metadata`, one metadata fetch per project is started in the
/// background; they may finish after `PROJECTS_LOADED`.
pub async fn load_projects(ctx: Web3Context, dispatch: Rc<dyn Dispatch>, with_metadata: bool) {
    dispatch.dispatch(Action::ProjectsLoading);

    match load_project_events(&ctx, &dispatch, with_metadata).await {
        Ok(events) => dispatch.dispatch(Action::ProjectsLoaded { events }),
        Err(e) => {
            monitoring::report_error("Failed to load projects", &e, &[("account", &ctx.account)]);
            dispatch.dispatch(Action::ProjectsError { error: LOAD_PROJECTS_ERROR.to_string() });
        }
    }
}

async fn load_project_events(
    ctx: &Web3Context,
    dispatch: &Rc<dyn Dispatch>,
    with_metadata: bool,
) -> Result<ProjectEventsMap, ActionError> {
    let logs = fetch_project_created_updated_events(ctx).await?;
    if logs.created.is_empty() {
        return Ok(ProjectEventsMap::new());
    }

    let events = reconcile_project_events(ctx.chain_id, &ctx.project_registry, &logs.created, &logs.updated);

    if with_metadata {
        let mut group = TaskGroup::new("Failed to load grant metadata", "projectID");
        for id in logs.ids {
            let ctx = ctx.clone();
            let dispatch = dispatch.clone();
            group.push(id.clone(), async move {
                fetch_grant_data(ctx, dispatch, id).await;
                Ok(())
            });
        }
        group.spawn_detached(ctx.spawner.as_ref())?;
    }

    Ok(events)
}

/// Status recorded for `application_id` in a round's applications document.
/// Entry ids look like `"<applicationId>-<roundAddress>"`.
pub fn find_application_status(document: &serde_json::Value, application_id: &str) -> Option<AppStatus> {
    document.as_array()?
        .iter()
        .find(|app| {
            app.get("id")
                .and_then(|id| id.as_str())
                .and_then(|id| id.split('-').next())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(application_id))
        })
        .and_then(|app| app.get("status"))
        .and_then(|status| serde_json::from_value(status.clone()).ok())
}

async fn check_application_status(
    ctx: Web3Context,
    dispatch: Rc<dyn Dispatch>,
    round_address: String,
    project_id: String,
    application_id: String,
) -> Result<(), ActionError> {
    let meta_ptr = contracts::projects_meta_ptr(ctx.provider.as_ref(), &round_address).await?;
    let document = ctx.gateway.fetch_json(&meta_ptr.pointer).await?;

    if let Some(status) = find_application_status(&document, &application_id) {
        dispatch.dispatch(Action::ProjectApplicationUpdated {
            project_id,
            round_id: round_address,
            status,
        });
    }
    Ok(())
}

/// One independent status check per round.
pub fn application_status_checks(
    ctx: &Web3Context,
    dispatch: &Rc<dyn Dispatch>,
    round_addresses: Vec<String>,
    project_id: &str,
    application_id: &str,
) -> TaskGroup<String> {
    let mut group = TaskGroup::new("Failed to check application status", "roundAddress");
    for round_address in round_addresses {
        group.push(
            round_address.clone(),
            check_application_status(
                ctx.clone(),
                dispatch.clone(),
                round_address,
                project_id.to_string(),
                application_id.to_string(),
            ),
        );
    }
    group
}

/// Re-read each round's application status from its contract and pinned
/// document, without waiting for the results.
pub fn fetch_application_statuses_from_contract(
    ctx: &Web3Context,
    dispatch: &Rc<dyn Dispatch>,
    round_addresses: Vec<String>,
    project_id: &str,
    application_id: &str,
) -> Result<(), ActionError> {
    application_status_checks(ctx, dispatch, round_addresses, project_id, application_id)
        .spawn_detached(ctx.spawner.as_ref())
}

/// Load the rounds a project applied to from the indexer, then start the
/// contract cross-check for each of them.
pub async fn fetch_project_applications(ctx: Web3Context, dispatch: Rc<dyn Dispatch>, project_id: String) {
    dispatch.dispatch(Action::ProjectApplicationsLoading { project_id: project_id.clone() });

    let (applications, application_id) = match load_applications(&ctx, &project_id).await {
        Ok(loaded) => loaded,
        Err(e) => {
            monitoring::report_error("Failed to load project applications", &e, &[("projectID", &project_id)]);
            dispatch.dispatch(Action::ProjectApplicationsError { project_id, error: e.message() });
            return;
        }
    };

    let round_addresses = applications.iter().map(|app| app.round_id.clone()).collect();
    dispatch.dispatch(Action::ProjectApplicationsLoaded {
        project_id: project_id.clone(),
        applications,
    });

    // the indexer can lag behind the round contracts
    if let Err(e) = fetch_application_statuses_from_contract(&ctx, &dispatch, round_addresses, &project_id, &application_id) {
        monitoring::report_error("Failed to start application status checks", &e, &[("projectID", &project_id)]);
    }
}

async fn load_applications(ctx: &Web3Context, project_id: &str) -> Result<(Vec<Application>, String), ActionError> {
    let number = project_number(project_id)
        .ok_or_else(|| ActionError::InvalidProjectId(project_id.to_string()))?;
    let application_id = generate_unique_round_application_id(ctx.chain_id, number);
    let applications = ctx.indexer.round_projects(&application_id).await?;
    Ok((applications, application_id))
}

pub fn unload_projects() -> Action {
    Action::ProjectsUnloaded
}
