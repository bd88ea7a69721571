use crate::{ContactForm, SubmissionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactViewModel {
    pub form: ContactForm,
    pub status: SubmissionStatus,
    pub submit_enabled: bool,
}
