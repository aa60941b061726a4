mod create_round;
mod eligibility_step;
mod review_step;
mod round_details_step;

pub use create_round::CreateRoundPage;
pub use eligibility_step::EligibilityStep;
pub use review_step::ReviewStep;
pub use round_details_step::RoundDetailsStep;
