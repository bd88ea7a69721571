use std::sync::Arc;

use portfolio_core::{update, ContactState, ContactViewModel, DismissTicket, Effect, Field, Msg};
use portfolio_logging::{portfolio_debug, portfolio_info};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{into_outcome, Relay};

/// Receives a fresh view every time the contact state visibly changes.
pub trait ViewSink: Send + Sync {
    fn emit(&self, view: &ContactViewModel);
}

/// Owns one contact form for the lifetime of the view that mounted it.
///
/// Must be created inside a tokio runtime. Dropping it cancels the loop
/// and aborts its task without waiting; only [`ContactController::unmount`]
/// guarantees that no emit is observed afterwards.
pub struct ContactController {
    msg_tx: mpsc::UnboundedSender<Msg>,
    view_rx: watch::Receiver<ContactViewModel>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ContactController {
    pub fn spawn(relay: Arc<dyn Relay>, sink: Arc<dyn ViewSink>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let state = ContactState::new();
        let (view_tx, view_rx) = watch::channel(state.view());
        let shutdown = CancellationToken::new();

        let runner = Runner {
            state,
            relay,
            sink,
            view_tx,
            msg_tx: msg_tx.clone(),
            timer: None,
        };
        let task = tokio::spawn(runner.run(msg_rx, shutdown.clone()));

        Self {
            msg_tx,
            view_rx,
            shutdown,
            task: Some(task),
        }
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.send(Msg::FieldChanged {
            field,
            value: value.into(),
        });
    }

    pub fn submit(&self) {
        self.send(Msg::SubmitClicked);
    }

    pub fn view(&self) -> ContactViewModel {
        self.view_rx.borrow().clone()
    }

    /// Waits for a view matching `pred`. `None` once the controller is gone.
    pub async fn wait_for(
        &self,
        pred: impl FnMut(&ContactViewModel) -> bool,
    ) -> Option<ContactViewModel> {
        let mut rx = self.view_rx.clone();
        let view = rx.wait_for(pred).await.ok().map(|view| (*view).clone());
        view
    }

    /// Tears the controller down. No view is emitted after this returns.
    pub async fn unmount(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, msg: Msg) {
        if self.msg_tx.send(msg).is_err() {
            portfolio_debug!("Contact controller is unmounted; dropping message");
        }
    }
}

impl Drop for ContactController {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct ArmedTimer {
    ticket: DismissTicket,
    handle: JoinHandle<()>,
}

// The loop task can be aborted at any await, so the timer goes with it.
impl Drop for ArmedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Runner {
    state: ContactState,
    relay: Arc<dyn Relay>,
    sink: Arc<dyn ViewSink>,
    view_tx: watch::Sender<ContactViewModel>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    timer: Option<ArmedTimer>,
}

impl Runner {
    async fn run(mut self, mut msg_rx: mpsc::UnboundedReceiver<Msg>, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                msg = msg_rx.recv() => match msg {
                    Some(msg) => self.dispatch(msg),
                    None => break,
                },
            }
        }
        self.timer = None;
        portfolio_debug!("Contact controller unmounted");
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            self.sink.emit(&view);
            self.view_tx.send_replace(view);
        }
        self.state = state;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SendToRelay { form } => {
                portfolio_info!(
                    "Submitting contact form subject_len={} message_len={}",
                    form.subject.len(),
                    form.message.len()
                );
                let relay = self.relay.clone();
                let msg_tx = self.msg_tx.clone();
                // Not cancellable; after unmount the result is simply dropped.
                tokio::spawn(async move {
                    let outcome = into_outcome(relay.submit(&form).await);
                    let _ = msg_tx.send(Msg::RelayFinished(outcome));
                });
            }
            Effect::ScheduleDismiss { ticket, delay } => {
                let msg_tx = self.msg_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = msg_tx.send(Msg::DismissElapsed { ticket });
                });
                // Replacing the previous timer aborts it.
                self.timer = Some(ArmedTimer { ticket, handle });
            }
            Effect::CancelDismiss { ticket } => {
                if self.timer.as_ref().is_some_and(|timer| timer.ticket == ticket) {
                    self.timer = None;
                }
            }
        }
    }
}
