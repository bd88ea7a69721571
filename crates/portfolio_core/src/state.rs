use crate::view_model::ContactViewModel;
use crate::{ContactForm, DismissTicket, Effect, Field, StatusKind, SubmissionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactState {
    form: ContactForm,
    status: SubmissionStatus,
    armed: Option<DismissTicket>,
    next_ticket: DismissTicket,
    dirty: bool,
}

impl ContactState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ContactViewModel {
        ContactViewModel {
            form: self.form.clone(),
            status: self.status.clone(),
            submit_enabled: !self.is_loading(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.kind == StatusKind::Loading
    }

    /// Ticket of the dismiss timer currently armed, if any.
    pub fn armed_ticket(&self) -> Option<DismissTicket> {
        self.armed
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        if self.form.get(field) != value {
            self.form.set(field, value);
            self.dirty = true;
        }
    }

    pub(crate) fn clear_form(&mut self) {
        if !self.form.is_empty() {
            self.form = ContactForm::default();
            self.dirty = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: SubmissionStatus) {
        if self.status != status {
            self.status = status;
            self.dirty = true;
        }
    }

    /// Arms a fresh dismiss ticket for the current terminal status.
    pub(crate) fn arm_dismiss(&mut self) -> Option<Effect> {
        let delay = self.status.kind.dismiss_delay()?;
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.armed = Some(ticket);
        Some(Effect::ScheduleDismiss { ticket, delay })
    }

    pub(crate) fn disarm_dismiss(&mut self) -> Option<Effect> {
        self.armed
            .take()
            .map(|ticket| Effect::CancelDismiss { ticket })
    }

    /// Consumes the armed ticket if it matches `ticket`.
    pub(crate) fn take_armed(&mut self, ticket: DismissTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
