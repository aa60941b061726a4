use super::events::ProjectLog;
use super::types::{project_identifier, ProjectEvent, ProjectEventsMap};

/// Fold registry logs into one record per project.
///
/// Update logs are matched to creation logs through the composite project
/// identifier; updates for projects with no creation log are dropped.
pub fn reconcile_project_events(
    chain_id: u64,
    registry: &str,
    created: &[ProjectLog],
    updated: &[ProjectLog],
) -> ProjectEventsMap {
    let mut events = ProjectEventsMap::new();

    for entry in created {
        if let ProjectLog::Created { project_number, block_number } = entry {
            let id = project_identifier(chain_id, registry, *project_number);
            events.insert(id, ProjectEvent {
                created_at_block: *block_number,
                updated_at_block: None,
            });
        }
    }

    for entry in updated {
        if let ProjectLog::MetadataUpdated { project_number, block_number } = entry {
            let id = project_identifier(chain_id, registry, *project_number);
            match events.get_mut(&id) {
                Some(event) => {
                    event.updated_at_block = Some(
                        event.updated_at_block.map_or(*block_number, |b| b.max(*block_number)),
                    );
                }
                None => log::debug!("Ignoring metadata update for unknown project {}", id),
            }
        }
    }

    events
}
