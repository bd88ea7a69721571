use crate::{DismissTicket, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one of the form inputs.
    FieldChanged { field: Field, value: String },
    /// User pressed the submit button.
    SubmitClicked,
    /// The relay call for the in-flight submission finished.
    RelayFinished(RelayOutcome),
    /// An armed auto-dismiss timer fired.
    DismissElapsed { ticket: DismissTicket },
}

/// How the relay call ended, as reported by the IO side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The relay confirmed it accepted the message.
    Accepted,
    /// The relay answered but did not accept the message.
    Rejected { reason: Option<String> },
    /// The request never completed normally (timeout, connection reset, ...).
    TransportFailed { detail: String },
}
