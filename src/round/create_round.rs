use leptos::*;

use crate::core::wizard::FormWizard;
use super::{EligibilityStep, ReviewStep, RoundDetailsStep};

const ROUND_STEPS: usize = 3;

#[component]
pub fn CreateRoundPage() -> impl IntoView {
    let wizard = create_rw_signal(FormWizard::new(ROUND_STEPS));
    let current_step = create_memo(move |_| wizard.with(|w| w.current_step));

    view! {
        <div class="create-round-page">
            <h2>"Create a Round"</h2>
            {move || match current_step.get() {
                0 => view! { <RoundDetailsStep wizard=wizard/> }.into_view(),
                1 => view! { <EligibilityStep wizard=wizard/> }.into_view(),
                _ => view! { <ReviewStep wizard=wizard/> }.into_view(),
            }}
        </div>
    }
}
