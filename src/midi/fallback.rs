// SPDX-License-Identifier: MPL-2.0
//! Minimal notification channel for collaborators.
//!
//! Collaborators such as the installer only need to post a message with a
//! severity. When no notifier exists they fall back to a native alert.

use super::notifier::{MidiNotifier, NotificationApi};
use crate::ui::notifications::markup;
use crate::ui::notifications::Severity;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

const ALERT_TITLE: &str = "Terra MIDI";

/// The narrow contract collaborators depend on.
pub trait Notify {
    fn notify(&mut self, message: &str, severity: Severity);

    fn show_info(&mut self, message: &str) {
        self.notify(message, Severity::Info);
    }
}

impl Notify for MidiNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.show(message, severity, severity.default_icon(), None);
    }
}

/// Where messages go when there is no notifier.
pub trait AlertSink {
    fn alert(&mut self, message: &str, severity: Severity);
}

/// Blocking native message dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogAlert;

impl AlertSink for DialogAlert {
    fn alert(&mut self, message: &str, severity: Severity) {
        let level = match severity {
            Severity::Error => MessageLevel::Error,
            Severity::Warning => MessageLevel::Warning,
            Severity::Success | Severity::Info => MessageLevel::Info,
        };
        let _ = MessageDialog::new()
            .set_title(ALERT_TITLE)
            .set_description(markup::plain_text(message))
            .set_level(level)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Posts to the notifier if there is one, otherwise raises an alert.
pub fn notify_or_alert(
    notifier: Option<&mut dyn Notify>,
    sink: &mut dyn AlertSink,
    message: &str,
    severity: Severity,
) {
    match notifier {
        Some(notifier) => notifier.notify(message, severity),
        None => {
            tracing::debug!(%severity, "no notifier available, using alert fallback");
            sink.alert(message, severity);
        }
    }
}
