// SPDX-License-Identifier: MPL-2.0
//! Older call signatures kept for existing callers.
//!
//! The legacy names are provided methods of [`LegacyApi`], so implementing
//! the trait is enough to expose them. A type that already has its own
//! version of one of these methods overrides it in its `impl` block, and the
//! provided version is never used for that type.
//!
//! [`MidiNotifier`] has its own reconnect notifications, so its legacy
//! reconnect names forward to those instead of the generic versions.

use super::device::{non_empty, DevicePayload, ReconnectDetail, ReconnectPayload};
use super::notifier::{MidiNotifier, NotificationApi};
use super::reason::format_reason;
use crate::ui::notifications::{NotificationId, Severity};

/// Shown by the legacy reconnect-attempt call when no reason was given.
pub const RECONNECT_ATTEMPT_HINT: &str =
    "Reconecte o dispositivo Midi-Terra e autorize novamente, se necessário.";

const LEGACY_DEVICE_ID: &str = "terra-device";
const LEGACY_DEVICE_NAME: &str = "Dispositivo Terra";
const LEGACY_REJECTED_NAME: &str = "Dispositivo não identificado";
const LEGACY_ERROR_MESSAGE: &str = "Erro desconhecido no dispositivo MIDI";

pub trait LegacyApi: NotificationApi {
    /// Accepts a name, a partial device, a list of either, or nothing.
    fn show_device_connected(&mut self, payload: DevicePayload) -> NotificationId {
        let device = payload.into_descriptor();
        self.connected(&device)
    }

    fn show_device_disconnected(
        &mut self,
        device_id: Option<&str>,
        device_name: Option<&str>,
    ) -> NotificationId {
        self.disconnected(
            non_empty(device_id).unwrap_or(LEGACY_DEVICE_ID),
            Some(non_empty(device_name).unwrap_or(LEGACY_DEVICE_NAME)),
        )
    }

    fn show_device_rejected(&mut self, device_name: Option<&str>) -> NotificationId {
        self.rejected(non_empty(device_name).unwrap_or(LEGACY_REJECTED_NAME))
    }

    fn show_device_error(&mut self, message: Option<&str>) -> NotificationId {
        self.error(non_empty(message).unwrap_or(LEGACY_ERROR_MESSAGE))
    }

    /// Reports the reconnected device as a regular connection when the
    /// implementor has no dedicated reconnect notification.
    fn show_auto_reconnected(&mut self, payload: ReconnectPayload) -> NotificationId {
        let device = payload.into_descriptor();
        self.connected(&device)
    }

    fn show_auto_reconnect_attempt(&mut self, detail: &ReconnectDetail) -> NotificationId {
        let message = detail.reason().map_or_else(
            || RECONNECT_ATTEMPT_HINT.to_string(),
            |code| format_reason(Some(code)),
        );
        self.show(&message, Severity::Warning, "⚠️", Some(7000))
    }
}

impl LegacyApi for MidiNotifier {
    fn show_auto_reconnected(&mut self, payload: ReconnectPayload) -> NotificationId {
        self.auto_reconnected(&payload.into_detail())
    }

    fn show_auto_reconnect_attempt(&mut self, detail: &ReconnectDetail) -> NotificationId {
        self.auto_reconnect_attempt(detail)
    }
}
