use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub requirement: String,
}

/// Who may apply to a round and what they must satisfy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub description: String,
    pub requirements: Vec<Requirement>,
}

impl Default for Eligibility {
    // one empty requirement to start with
    fn default() -> Self {
        Self {
            description: String::new(),
            requirements: vec![Requirement::default()],
        }
    }
}

impl Eligibility {
    /// Values the eligibility step starts from.
    pub fn initial(draft: &RoundDraft) -> Self {
        draft.eligibility.clone().unwrap_or_default()
    }

    pub fn append_requirement(&mut self) {
        self.requirements.push(Requirement::default());
    }

    pub fn set_requirement(&mut self, index: usize, value: String) {
        if let Some(entry) = self.requirements.get_mut(index) {
            entry.requirement = value;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundMetadata {
    pub name: String,
}

/// Data collected across the round-creation steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_metadata: Option<RoundMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
}

impl RoundDraft {
    /// Fields set in `values` replace the ones already in the draft.
    pub fn merge(&self, values: RoundDraft) -> RoundDraft {
        RoundDraft {
            round_metadata: values.round_metadata.or_else(|| self.round_metadata.clone()),
            eligibility: values.eligibility.or_else(|| self.eligibility.clone()),
        }
    }
}

/// Shared state of a multi-step form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormWizard {
    pub current_step: usize,
    pub steps_count: usize,
    pub form_data: RoundDraft,
}

impl FormWizard {
    pub fn new(steps_count: usize) -> Self {
        Self {
            current_step: 0,
            steps_count,
            form_data: RoundDraft::default(),
        }
    }

    /// Merge a step's values into the draft and move on.
    pub fn submit_step(&mut self, values: RoundDraft) {
        self.form_data = self.form_data.merge(values);
        self.current_step += 1;
    }

    /// Go back a step; nothing is validated or saved.
    pub fn previous_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Whether submitting the current step lands on the last one.
    pub fn next_is_last_step(&self) -> bool {
        self.current_step + 2 >= self.steps_count
    }

    pub fn reset(&mut self) {
        *self = FormWizard::new(self.steps_count);
    }
}
