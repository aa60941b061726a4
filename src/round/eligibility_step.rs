use leptos::*;

use crate::components::FormStepper;
use crate::core::wizard::{Eligibility, FormWizard, RoundDraft};

#[component]
pub fn EligibilityStep(wizard: RwSignal<FormWizard>) -> impl IntoView {
    let initial = wizard.with_untracked(|w| Eligibility::initial(&w.form_data));

    let description = create_rw_signal(initial.description.clone());
    // requirement edits are written untracked so typing doesn't re-render the list
    let eligibility = create_rw_signal(initial);
    let requirement_count = create_memo(move |_| eligibility.with(|e| e.requirements.len()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut values = eligibility.get_untracked();
        values.description = description.get_untracked();
        log::debug!("Eligibility step submitted with {} requirements", values.requirements.len());

        wizard.update(|w| w.submit_step(RoundDraft {
            eligibility: Some(values),
            ..Default::default()
        }));
    };

    let add_requirement = move |_| eligibility.update(|e| e.append_requirement());

    view! {
        <div class="round-step">
            <div class="step-sidebar">
                <p class="step-title">"Round Eligibility"</p>
                <p class="step-helper" data-testid="round-eligibility-helper-copy">
                    "Describe the round to applicants and let them know the eligibility requirements."
                </p>
            </div>

            <form class="step-form" on:submit=on_submit>
                <div class="input-group">
                    <label for="eligibility.description">"Round Description"</label>
                    <input
                        type="text"
                        id="eligibility.description"
                        placeholder="Enter a short description of your round."
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </div>

                <div class="requirements">
                    <p class="requirements-prompt">"What requirements do you have for applicants?"</p>
                    <ul>
                        {move || (0..requirement_count.get()).map(|index| {
                            let label = format!("Requirement {}", index + 1);
                            let value = eligibility.with_untracked(|e| {
                                e.requirements.get(index)
                                    .map(|r| r.requirement.clone())
                                    .unwrap_or_default()
                            });
                            view! {
                                <li class="requirement-item">
                                    <label for=label.clone()>{label.clone()}</label>
                                    <input
                                        type="text"
                                        id=label
                                        placeholder="Enter an eligibility requirement."
                                        data-testid="requirement-input"
                                        prop:value=value
                                        on:input=move |ev| {
                                            let text = event_target_value(&ev);
                                            eligibility.update_untracked(|e| e.set_requirement(index, text));
                                        }
                                    />
                                </li>
                            }
                        }).collect::<Vec<_>>()}
                    </ul>
                    <button type="button" class="wallet-btn add-requirement" on:click=add_requirement>
                        "+ Add A Requirement"
                    </button>
                </div>

                <FormStepper wizard=wizard/>
            </form>
        </div>
    }
}
