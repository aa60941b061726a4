use leptos::*;
use std::rc::Rc;

use crate::core::project_actions::load_projects;
use crate::core::store::Status;
use crate::core::{Dispatch, RootState, Web3Context};
use crate::pages::ProjectCard;

#[component]
pub fn ProjectsPage(
    store: RwSignal<RootState>,
    ctx: StoredValue<Web3Context>,
) -> impl IntoView {
    let refresh = move || {
        let dispatch: Rc<dyn Dispatch> = Rc::new(store);
        let ctx = ctx.get_value();
        spawn_local(async move {
            load_projects(ctx, dispatch, true).await;
        });
    };

    // load on mount unless the store already has the list
    if store.with_untracked(|s| s.projects.status == Status::Undefined) {
        refresh();
    }

    let status = create_memo(move |_| store.with(|s| s.projects.status));
    let project_ids = create_memo(move |_| store.with(|s| s.projects.ids()));

    view! {
        <div class="projects-page">
            <div class="page-header">
                <h2>"My Projects"</h2>
                <button
                    class="wallet-btn outline"
                    disabled=move || status.get() == Status::Loading
                    on:click=move |_| refresh()
                >
                    "Refresh"
                </button>
            </div>

            {move || match status.get() {
                Status::Undefined | Status::Loading => view! {
                    <p class="loading">"Loading projects..."</p>
                }.into_view(),
                Status::Error => view! {
                    <p class="error-message">
                        {move || store.with(|s| s.projects.error.clone().unwrap_or_default())}
                    </p>
                }.into_view(),
                Status::Loaded => {
                    let ids = project_ids.get();
                    if ids.is_empty() {
                        view! { <p class="muted">"No projects registered from this account yet."</p> }.into_view()
                    } else {
                        view! {
                            <div class="project-list">
                                {ids.into_iter()
                                    .map(|id| view! { <ProjectCard store=store ctx=ctx project_id=id/> })
                                    .collect::<Vec<_>>()}
                            </div>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}
