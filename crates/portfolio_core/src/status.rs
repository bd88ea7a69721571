use std::time::Duration;

/// How long a success banner stays up before reverting to idle.
pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_secs(7);
/// How long an error banner stays up before reverting to idle.
pub const ERROR_DISMISS_DELAY: Duration = Duration::from_secs(5);

pub const LOADING_COPY: &str = "Sending your message...";
pub const SUCCESS_COPY: &str = "Thank you! Your message has been sent successfully. I'll get back to you soon.";
pub const PRESUMED_SUCCESS_COPY: &str =
    "Your message was most likely delivered, though there may have been a minor hiccup. I'll get back to you soon.";
pub const ERROR_COPY: &str = "Sorry, your message could not be sent. Please try again.";

pub type DismissTicket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// Terminal kinds auto-dismiss back to idle.
    pub fn dismiss_delay(self) -> Option<Duration> {
        match self {
            StatusKind::Success => Some(SUCCESS_DISMISS_DELAY),
            StatusKind::Error => Some(ERROR_DISMISS_DELAY),
            StatusKind::Idle | StatusKind::Loading => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SubmissionStatus {
    pub fn idle() -> Self {
        Self::default()
    }

    pub(crate) fn with(kind: StatusKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.kind == StatusKind::Idle
    }
}
