use leptos::*;

use crate::components::FormStepper;
use crate::core::wizard::{FormWizard, RoundDraft, RoundMetadata};

#[component]
pub fn RoundDetailsStep(wizard: RwSignal<FormWizard>) -> impl IntoView {
    let initial_name = wizard.with_untracked(|w| {
        w.form_data.round_metadata
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_default()
    });

    let (name, set_name) = create_signal(initial_name);
    let (error_message, set_error_message) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let round_name = name.get_untracked().trim().to_string();
        if round_name.is_empty() {
            set_error_message.set("Round name is required".to_string());
            return;
        }

        wizard.update(|w| w.submit_step(RoundDraft {
            round_metadata: Some(RoundMetadata { name: round_name }),
            ..Default::default()
        }));
    };

    view! {
        <div class="round-step">
            <div class="step-sidebar">
                <p class="step-title">"Round Details"</p>
                <p class="step-helper">"What is the Round name?"</p>
            </div>

            <form class="step-form" on:submit=on_submit>
                <div class="input-group">
                    <label for="roundMetadata.name">"Round Name"</label>
                    <input
                        type="text"
                        id="roundMetadata.name"
                        placeholder="Enter round name here."
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            set_name.set(event_target_value(&ev));
                            set_error_message.set(String::new());
                        }
                    />
                </div>

                <div class="error-message">
                    {move || error_message.get()}
                </div>

                <FormStepper wizard=wizard/>
            </form>
        </div>
    }
}
