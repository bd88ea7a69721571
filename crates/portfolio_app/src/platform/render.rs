use chrono::Local;
use portfolio_core::prefs::UiPrefs;
use portfolio_core::{ContactViewModel, StatusKind};

pub(crate) fn status_label(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Idle => "idle",
        StatusKind::Loading => "sending",
        StatusKind::Success => "sent",
        StatusKind::Error => "failed",
    }
}

pub(crate) fn status_line(view: &ContactViewModel) -> String {
    let label = status_label(view.status.kind);
    if view.status.message.is_empty() {
        label.to_string()
    } else {
        format!("{label:<8}{}", view.status.message)
    }
}

pub(crate) fn timestamped(line: &str) -> String {
    format!("[{}] {line}", Local::now().format("%H:%M:%S"))
}

pub(crate) fn prefs_summary(prefs: &UiPrefs) -> String {
    format!(
        "theme={} cursor={} accent={}",
        prefs.theme, prefs.cursor, prefs.accent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::{SubmissionStatus, ERROR_COPY};

    #[test]
    fn status_line_pads_label_before_message() {
        let view = ContactViewModel {
            status: SubmissionStatus {
                kind: StatusKind::Error,
                message: ERROR_COPY.to_string(),
            },
            ..ContactViewModel::default()
        };
        assert_eq!(status_line(&view), format!("failed  {ERROR_COPY}"));
        assert_eq!(status_line(&ContactViewModel::default()), "idle");
    }

    #[test]
    fn prefs_summary_lists_every_field() {
        assert_eq!(
            prefs_summary(&UiPrefs::default()),
            "theme=light cursor=default accent=blue"
        );
    }
}
