//! Application state and the actions that change it.
//!
//! Actions are plain values; [`RootState::reduce`] is the only place state
//! changes. Components hold the state in a leptos `RwSignal`, which is also the
//! [`Dispatch`] handle handed to async actions.

use leptos::{RwSignal, SignalUpdate};
use std::collections::BTreeMap;

use super::types::{AppStatus, Application, ProjectEventsMap};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ProjectsLoading,
    ProjectsLoaded { events: ProjectEventsMap },
    ProjectsError { error: String },
    ProjectsUnloaded,
    ProjectApplicationsLoading { project_id: String },
    ProjectApplicationsLoaded { project_id: String, applications: Vec<Application> },
    ProjectApplicationsError { project_id: String, error: String },
    ProjectApplicationUpdated { project_id: String, round_id: String, status: AppStatus },
    GrantMetadataLoadingUri { id: String },
    GrantMetadataFetched { id: String, metadata: serde_json::Value },
    GrantMetadataFetchingError { id: String, error: String },
}

impl Action {
    /// Wire tag of the action
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ProjectsLoading => "PROJECTS_LOADING",
            Action::ProjectsLoaded { .. } => "PROJECTS_LOADED",
            Action::ProjectsError { .. } => "PROJECTS_ERROR",
            Action::ProjectsUnloaded => "PROJECTS_UNLOADED",
            Action::ProjectApplicationsLoading { .. } => "PROJECT_APPLICATIONS_LOADING",
            Action::ProjectApplicationsLoaded { .. } => "PROJECT_APPLICATIONS_LOADED",
            Action::ProjectApplicationsError { .. } => "PROJECT_APPLICATIONS_ERROR",
            Action::ProjectApplicationUpdated { .. } => "PROJECT_APPLICATION_UPDATED",
            Action::GrantMetadataLoadingUri { .. } => "GRANT_METADATA_LOADING_URI",
            Action::GrantMetadataFetched { .. } => "GRANT_METADATA_FETCHED",
            Action::GrantMetadataFetchingError { .. } => "GRANT_METADATA_FETCHING_ERROR",
        }
    }
}

/// Sink for actions.
pub trait Dispatch {
    fn dispatch(&self, action: Action);
}

impl Dispatch for RwSignal<RootState> {
    fn dispatch(&self, action: Action) {
        log::debug!("dispatch {}", action.kind());
        self.update(|state| state.reduce(action));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Undefined,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsState {
    pub status: Status,
    pub error: Option<String>,
    pub events: ProjectEventsMap,
    pub applications: BTreeMap<String, Vec<Application>>,
    pub applications_status: BTreeMap<String, Status>,
    pub applications_error: BTreeMap<String, String>,
}

impl ProjectsState {
    pub fn ids(&self) -> Vec<String> {
        self.events.keys().cloned().collect()
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::ProjectsLoading => {
                self.status = Status::Loading;
                self.error = None;
            }
            Action::ProjectsLoaded { events } => {
                self.status = Status::Loaded;
                self.events = events.clone();
            }
            Action::ProjectsError { error } => {
                self.status = Status::Error;
                self.error = Some(error.clone());
            }
            Action::ProjectsUnloaded => {
                *self = ProjectsState::default();
            }
            Action::ProjectApplicationsLoading { project_id } => {
                self.applications_status.insert(project_id.clone(), Status::Loading);
                self.applications_error.remove(project_id);
            }
            Action::ProjectApplicationsLoaded { project_id, applications } => {
                self.applications_status.insert(project_id.clone(), Status::Loaded);
                self.applications.insert(project_id.clone(), applications.clone());
            }
            Action::ProjectApplicationsError { project_id, error } => {
                self.applications_status.insert(project_id.clone(), Status::Error);
                self.applications_error.insert(project_id.clone(), error.clone());
            }
            Action::ProjectApplicationUpdated { project_id, round_id, status } => {
                let applications = self.applications.entry(project_id.clone()).or_default();
                match applications.iter_mut().find(|app| app.round_id.eq_ignore_ascii_case(round_id)) {
                    Some(app) => app.status = *status,
                    None => applications.push(Application { status: *status, round_id: round_id.clone() }),
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrantMetadataState {
    Loading,
    Loaded(serde_json::Value),
    Error(String),
}

impl GrantMetadataState {
    /// Project title from the metadata document, if loaded
    pub fn title(&self) -> Option<String> {
        match self {
            GrantMetadataState::Loaded(metadata) => metadata.get("title")
                .and_then(|t| t.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub projects: ProjectsState,
    pub grants_metadata: BTreeMap<String, GrantMetadataState>,
}

impl RootState {
    pub fn reduce(&mut self, action: Action) {
        self.projects.reduce(&action);
        match action {
            Action::GrantMetadataLoadingUri { id } => {
                self.grants_metadata.insert(id, GrantMetadataState::Loading);
            }
            Action::GrantMetadataFetched { id, metadata } => {
                self.grants_metadata.insert(id, GrantMetadataState::Loaded(metadata));
            }
            Action::GrantMetadataFetchingError { id, error } => {
                self.grants_metadata.insert(id, GrantMetadataState::Error(error));
            }
            Action::ProjectsUnloaded => self.grants_metadata.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProjectEvent;

    fn reduce_all(actions: Vec<Action>) -> RootState {
        let mut state = RootState::default();
        for action in actions {
            state.reduce(action);
        }
        state
    }

    #[test]
    fn test_action_kinds() {
        assert_eq!(Action::ProjectsLoading.kind(), "PROJECTS_LOADING");
        assert_eq!(
            Action::ProjectApplicationUpdated {
                project_id: "1".to_string(),
                round_id: "0xabc".to_string(),
                status: AppStatus::Approved,
            }.kind(),
            "PROJECT_APPLICATION_UPDATED"
        );
    }

    #[test]
    fn test_projects_lifecycle() {
        let mut events = ProjectEventsMap::new();
        events.insert("5:0xabc:7".to_string(), ProjectEvent { created_at_block: 100, updated_at_block: None });

        let state = reduce_all(vec![Action::ProjectsLoading, Action::ProjectsLoaded { events: events.clone() }]);
        assert_eq!(state.projects.status, Status::Loaded);
        assert_eq!(state.projects.events, events);
        assert_eq!(state.projects.ids(), vec!["5:0xabc:7".to_string()]);

        let state = reduce_all(vec![
            Action::ProjectsLoading,
            Action::ProjectsError { error: "Cannot load projects".to_string() },
        ]);
        assert_eq!(state.projects.status, Status::Error);
        assert_eq!(state.projects.error.as_deref(), Some("Cannot load projects"));
    }

    #[test]
    fn test_unload_resets_state() {
        let state = reduce_all(vec![
            Action::ProjectsLoaded { events: ProjectEventsMap::new() },
            Action::GrantMetadataLoadingUri { id: "5:0xabc:7".to_string() },
            Action::ProjectsUnloaded,
        ]);
        assert_eq!(state, RootState::default());
    }

    #[test]
    fn test_contract_status_overrides_indexer_status() {
        let state = reduce_all(vec![
            Action::ProjectApplicationsLoading { project_id: "7".to_string() },
            Action::ProjectApplicationsLoaded {
                project_id: "7".to_string(),
                applications: vec![
                    Application { status: AppStatus::Pending, round_id: "0xRound1".to_string() },
                    Application { status: AppStatus::Pending, round_id: "0xround2".to_string() },
                ],
            },
            Action::ProjectApplicationUpdated {
                project_id: "7".to_string(),
                round_id: "0xround1".to_string(),
                status: AppStatus::Approved,
            },
        ]);
        let applications = &state.projects.applications["7"];
        assert_eq!(applications[0].status, AppStatus::Approved);
        assert_eq!(applications[1].status, AppStatus::Pending);
        assert_eq!(state.projects.applications_status["7"], Status::Loaded);
    }

    #[test]
    fn test_update_for_unlisted_round_is_added() {
        let state = reduce_all(vec![Action::ProjectApplicationUpdated {
            project_id: "7".to_string(),
            round_id: "0xround3".to_string(),
            status: AppStatus::Rejected,
        }]);
        assert_eq!(
            state.projects.applications["7"],
            vec![Application { status: AppStatus::Rejected, round_id: "0xround3".to_string() }]
        );
    }

    #[test]
    fn test_applications_error_is_scoped_to_project() {
        let state = reduce_all(vec![
            Action::ProjectApplicationsError { project_id: "7".to_string(), error: "boom".to_string() },
        ]);
        assert_eq!(state.projects.applications_status["7"], Status::Error);
        assert_eq!(state.projects.applications_error["7"], "boom");
        assert_eq!(state.projects.status, Status::Undefined);
    }

    #[test]
    fn test_grant_metadata_title() {
        let state = reduce_all(vec![Action::GrantMetadataFetched {
            id: "5:0xabc:7".to_string(),
            metadata: serde_json::json!({ "title": "Open Source Tooling" }),
        }]);
        assert_eq!(
            state.grants_metadata["5:0xabc:7"].title().as_deref(),
            Some("Open Source Tooling")
        );
    }
}
