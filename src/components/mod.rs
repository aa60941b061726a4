mod form_stepper;

pub use form_stepper::FormStepper;
