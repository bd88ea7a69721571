use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use portfolio_core::prefs::{PrefField, PrefFields, PrefsHandle, PrefsMsg};
use portfolio_core::{ContactForm, ContactViewModel, Field, StatusKind};
use portfolio_engine::{ContactController, ReqwestRelay, ViewSink};
use portfolio_logging::{portfolio_info, portfolio_warn};

use super::config::AppConfig;
use super::{persistence, render};

/// Prints a line each time the submission status changes.
#[derive(Default)]
struct TerminalSink {
    last: Mutex<Option<StatusKind>>,
}

impl ViewSink for TerminalSink {
    fn emit(&self, view: &ContactViewModel) {
        let Ok(mut last) = self.last.lock() else {
            return;
        };
        if *last == Some(view.status.kind) {
            return;
        }
        // The initial idle state is not worth a line.
        if last.is_some() || view.status.kind != StatusKind::Idle {
            println!("{}", render::timestamped(&render::status_line(view)));
        }
        *last = Some(view.status.kind);
    }
}

pub(crate) async fn send(config: &AppConfig, form: ContactForm, linger: bool) -> anyhow::Result<()> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
        bail!("please fill in the required field(s): {}", names.join(", "));
    }

    let relay = ReqwestRelay::new(config.relay.to_settings()).context("invalid relay settings")?;
    if relay.settings().access_key.is_empty() {
        portfolio_warn!("No relay access key configured; the relay will likely reject the message");
    }

    let controller = ContactController::spawn(Arc::new(relay), Arc::new(TerminalSink::default()));
    for field in Field::ALL {
        controller.set_field(field, form.get(field));
    }
    controller.submit();

    let outcome = controller
        .wait_for(|view| matches!(view.status.kind, StatusKind::Success | StatusKind::Error))
        .await
        .context("contact controller stopped before the relay answered")?;

    if linger {
        controller.wait_for(|view| view.status.is_idle()).await;
    }
    controller.unmount().await;

    if outcome.status.kind == StatusKind::Error {
        bail!("the relay did not accept the message; your input was kept, try again");
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PrefsRequest {
    pub messages: Vec<PrefsMsg>,
}

pub(crate) fn prefs(config: &AppConfig, request: PrefsRequest) -> anyhow::Result<()> {
    let path = &config.prefs_path;
    let handle = PrefsHandle::new(persistence::load_prefs(path));

    subscribe_printer(&handle, PrefField::Theme, "theme");
    subscribe_printer(&handle, PrefField::Cursor, "cursor");
    subscribe_printer(&handle, PrefField::Accent, "accent");

    let changed = request
        .messages
        .into_iter()
        .fold(PrefFields::NONE, |changed, msg| changed.union(handle.dispatch(msg)));

    if !changed.is_empty() {
        persistence::save_prefs(path, &handle.prefs())
            .with_context(|| format!("saving preferences to {}", path.display()))?;
        portfolio_info!("Preferences updated at {:?}", path);
    }
    println!("{}", render::prefs_summary(&handle.prefs()));
    Ok(())
}

fn subscribe_printer(handle: &PrefsHandle, field: PrefField, label: &'static str) {
    handle.subscribe(PrefFields::only(field), move |prefs| {
        let value = match field {
            PrefField::Theme => prefs.theme.as_str(),
            PrefField::Cursor => prefs.cursor.as_str(),
            PrefField::Accent => prefs.accent.as_str(),
        };
        println!("{label} -> {value}");
    });
}
