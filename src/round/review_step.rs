use leptos::*;

use crate::core::wizard::FormWizard;

/// Read-only summary of the collected round data.
#[component]
pub fn ReviewStep(wizard: RwSignal<FormWizard>) -> impl IntoView {
    let draft = wizard.with_untracked(|w| w.form_data.clone());

    let name = draft.round_metadata
        .map(|m| m.name)
        .unwrap_or_default();
    let eligibility = draft.eligibility.unwrap_or_default();
    let requirements = eligibility.requirements
        .into_iter()
        .map(|r| r.requirement)
        .filter(|r| !r.trim().is_empty())
        .collect::<Vec<_>>();

    let on_prev = move |_| wizard.update(|w| w.previous_step());
    let on_reset = move |_| {
        log::info!("Round draft discarded");
        wizard.update(|w| w.reset());
    };

    view! {
        <div class="round-step">
            <div class="step-sidebar">
                <p class="step-title">"Review"</p>
                <p class="step-helper">"Check the round before it is created."</p>
            </div>

            <div class="step-form review">
                <div class="review-item">
                    <h4>"Round Name"</h4>
                    <p>{name}</p>
                </div>
                <div class="review-item">
                    <h4>"Round Description"</h4>
                    <p>{eligibility.description}</p>
                </div>
                <div class="review-item">
                    <h4>"Requirements"</h4>
                    {if requirements.is_empty() {
                        view! { <p class="muted">"No requirements"</p> }.into_view()
                    } else {
                        view! {
                            <ol>
                                {requirements.into_iter()
                                    .map(|r| view! { <li>{r}</li> })
                                    .collect::<Vec<_>>()}
                            </ol>
                        }.into_view()
                    }}
                </div>

                <div class="form-stepper">
                    <button type="button" class="wallet-btn outline" on:click=on_prev>
                        "Previous"
                    </button>
                    <button type="button" class="wallet-btn outline" on:click=on_reset>
                        "Start Over"
                    </button>
                </div>
            </div>
        </div>
    }
}
