use leptos::*;
use std::rc::Rc;

use crate::core::project_actions::fetch_project_applications;
use crate::core::store::{GrantMetadataState, Status};
use crate::core::types::project_number;
use crate::core::{Dispatch, RootState, Web3Context};

#[component]
pub fn ProjectCard(
    store: RwSignal<RootState>,
    ctx: StoredValue<Web3Context>,
    project_id: String,
) -> impl IntoView {
    let (show_applications, set_show_applications) = create_signal(false);
    let id = store_value(project_id);

    let fallback_title = id.with_value(|id| {
        project_number(id)
            .map(|n| format!("Project #{}", n))
            .unwrap_or_else(|| id.clone())
    });

    let title = move || {
        store.with(|s| match id.with_value(|id| s.grants_metadata.get(id).cloned()) {
            Some(GrantMetadataState::Loading) => "Loading metadata...".to_string(),
            Some(state @ GrantMetadataState::Loaded(_)) => state.title().unwrap_or_else(|| fallback_title.clone()),
            Some(GrantMetadataState::Error(_)) | None => fallback_title.clone(),
        })
    };

    let created_at = move || {
        store.with(|s| id.with_value(|id| s.projects.events.get(id).map(|e| e.created_at_block)))
    };

    let applications_status = create_memo(move |_| {
        store.with(|s| id.with_value(|id| s.projects.applications_status.get(id).copied()))
    });

    let toggle_applications = move |_| {
        let show = !show_applications.get_untracked();
        set_show_applications.set(show);

        // fetch once per card; later toggles reuse the store
        if show && applications_status.get_untracked().is_none() {
            let dispatch: Rc<dyn Dispatch> = Rc::new(store);
            let ctx = ctx.get_value();
            let project_id = id.get_value();
            spawn_local(async move {
                fetch_project_applications(ctx, dispatch, project_id).await;
            });
        }
    };

    let applications = move || {
        match applications_status.get() {
            Some(Status::Loading) | None => view! { <p class="loading">"Loading applications..."</p> }.into_view(),
            Some(Status::Error) => view! {
                <p class="error-message">
                    {store.with(|s| id.with_value(|id| s.projects.applications_error.get(id).cloned().unwrap_or_default()))}
                </p>
            }.into_view(),
            _ => {
                let list = store.with(|s| id.with_value(|id| s.projects.applications.get(id).cloned().unwrap_or_default()));
                if list.is_empty() {
                    view! { <p class="muted">"No round applications"</p> }.into_view()
                } else {
                    view! {
                        <ul class="application-list">
                            {list.into_iter().map(|app| view! {
                                <li class="application-item">
                                    <span class="round-id">{app.round_id}</span>
                                    <span class=format!("status status-{}", app.status.to_string().to_lowercase())>
                                        {app.status.to_string()}
                                    </span>
                                </li>
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_view()
                }
            }
        }
    };

    view! {
        <div class="project-card">
            <div class="project-header">
                <h4 class="project-title">{title}</h4>
                <span class="project-block">
                    {move || created_at().map(|block| format!("Created at block {}", block)).unwrap_or_default()}
                </span>
            </div>
            <button class="wallet-btn outline" on:click=toggle_applications>
                {move || if show_applications.get() { "Hide Applications" } else { "Show Applications" }}
            </button>
            <Show when=move || show_applications.get()>
                <div class="project-applications">{applications}</div>
            </Show>
        </div>
    }
}
