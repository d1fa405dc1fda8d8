//! Form submission gate
//!
//! ```text
//! Idle ──submit──▶ Validating ──passed──▶ Submittable ──send──▶ Submitting ──done──▶ Idle
//!                       │
//!                       └──failed──▶ Blocked ──reset──▶ Idle
//! ```
//!
//! Submission is all or nothing: the only way to `Submitting` is through
//! `Submittable`, which requires every field to pass.

use crate::types::FormError;

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    Validating,
    Submittable,
    Blocked,
    Submitting,
}

/// Inputs that move the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// The user asked to submit
    Submit,
    /// Full validation finished with no field errors
    Passed,
    /// Full validation finished with at least one field error
    Failed,
    /// The payment is being handed to the sink
    Send,
    /// The sink returned, successfully or not
    Done,
    /// Errors were published, the form is editable again
    Reset,
}

impl GateState {
    /// Apply an event
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidTransition` for any move not in the diagram.
    pub fn on(self, event: GateEvent) -> Result<GateState, FormError> {
        use GateEvent as E;
        use GateState as S;

        match (self, event) {
            (S::Idle, E::Submit) => Ok(S::Validating),
            (S::Validating, E::Passed) => Ok(S::Submittable),
            (S::Validating, E::Failed) => Ok(S::Blocked),
            (S::Submittable, E::Send) => Ok(S::Submitting),
            (S::Submitting, E::Done) => Ok(S::Idle),
            (S::Blocked, E::Reset) => Ok(S::Idle),
            (from, event) => Err(FormError::invalid_transition(from, event)),
        }
    }
}
