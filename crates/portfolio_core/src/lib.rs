//! Portfolio core: pure contact-form state machine and UI preference store.
mod effect;
mod form;
mod msg;
pub mod prefs;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{ContactForm, Field, UnknownField};
pub use msg::{Msg, RelayOutcome};
pub use state::ContactState;
pub use status::{
    DismissTicket, StatusKind, SubmissionStatus, ERROR_COPY, ERROR_DISMISS_DELAY, LOADING_COPY,
    PRESUMED_SUCCESS_COPY, SUCCESS_COPY, SUCCESS_DISMISS_DELAY,
};
pub use update::update;
pub use view_model::ContactViewModel;
