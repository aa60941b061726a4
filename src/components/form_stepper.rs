use leptos::*;

use crate::core::wizard::FormWizard;

/// Previous/next controls at the bottom of a wizard step. The next button
/// submits the surrounding form.
#[component]
pub fn FormStepper(wizard: RwSignal<FormWizard>) -> impl IntoView {
    let (current_step, steps_count, next_is_last) = wizard.with_untracked(|w| {
        (w.current_step, w.steps_count, w.next_is_last_step())
    });
    let is_first = current_step == 0;
    let next_label = if next_is_last { "Review" } else { "Next" };

    view! {
        <div class="form-stepper">
            <button
                type="button"
                class="wallet-btn outline"
                disabled=is_first
                on:click=move |_| wizard.update(|w| w.previous_step())
            >
                "Previous"
            </button>
            <span class="step-count">
                {format!("Step {} of {}", current_step + 1, steps_count)}
            </span>
            <button type="submit" class="wallet-btn">
                {next_label}
            </button>
        </div>
    }
}
