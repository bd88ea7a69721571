use std::time::Duration;

use crate::{ContactForm, DismissTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the form to the relay. Emitted once per accepted submit.
    SendToRelay { form: ContactForm },
    /// Arm a timer that reports `Msg::DismissElapsed { ticket }` after `delay`.
    ScheduleDismiss {
        ticket: DismissTicket,
        delay: Duration,
    },
    /// Disarm the timer holding `ticket`.
    CancelDismiss { ticket: DismissTicket },
}
