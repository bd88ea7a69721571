use crate::status::{ERROR_COPY, LOADING_COPY, PRESUMED_SUCCESS_COPY, SUCCESS_COPY};
use crate::{ContactState, Effect, Msg, RelayOutcome, StatusKind, SubmissionStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ContactState, msg: Msg) -> (ContactState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            state.set_field(field, value);
            // Editing after a failure gives the user a clean slate right away.
            if state.status().kind == StatusKind::Error {
                state.set_status(SubmissionStatus::idle());
                state.disarm_dismiss().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::SubmitClicked => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            effects.extend(state.disarm_dismiss());
            state.set_status(SubmissionStatus::with(StatusKind::Loading, LOADING_COPY));
            effects.push(Effect::SendToRelay {
                form: state.form().clone(),
            });
            effects
        }
        Msg::RelayFinished(outcome) => {
            if !state.is_loading() {
                return (state, Vec::new());
            }
            let status = match outcome {
                RelayOutcome::Accepted => SubmissionStatus::with(StatusKind::Success, SUCCESS_COPY),
                // Presumed success: the relay is known to deliver while the
                // browser-side response is lost, so this counts as sent.
                RelayOutcome::TransportFailed { .. } => {
                    SubmissionStatus::with(StatusKind::Success, PRESUMED_SUCCESS_COPY)
                }
                RelayOutcome::Rejected { .. } => {
                    SubmissionStatus::with(StatusKind::Error, ERROR_COPY)
                }
            };
            if status.kind == StatusKind::Success {
                state.clear_form();
            }
            state.set_status(status);
            state.arm_dismiss().into_iter().collect()
        }
        Msg::DismissElapsed { ticket } => {
            if state.take_armed(ticket) {
                state.set_status(SubmissionStatus::idle());
            }
            Vec::new()
        }
    };

    (state, effects)
}
