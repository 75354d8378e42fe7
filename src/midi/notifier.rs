// SPDX-License-Identifier: MPL-2.0
//! Maps MIDI domain events to notifications.
//!
//! Every operation is total: missing or blank inputs are replaced by
//! defaults and the notification is always rendered.

use super::console::Banner;
use super::device::{
    non_empty, DeviceDescriptor, PermissionState, ReconnectDetail, DEFAULT_RECONNECTED_NAME,
    UNKNOWN_DEVICE_NAME,
};
use super::reason::format_reason;
use crate::catalog::Catalog;
use crate::config::NotificationConfig;
use crate::error::Result;
use crate::ui::notifications::{
    Countdown, Manager, Notification, NotificationId, NotificationMessage, Severity, Stats, Tone,
};
use std::time::Instant;

/// Fixed id of the waiting-permission notification.
pub const WAITING_PERMISSION_ID: &str = "midi-permission-waiting";

const DEFAULT_BROWSER: &str = "navegador";
const ATTEMPT_FALLBACK: &str = "Rearmando comunicação com o dispositivo.";
const FAILED_FALLBACK: &str = "Verifique se o dispositivo está conectado e autorizado.";

mod durations {
    pub const ERROR: u64 = 8000;
    pub const UNSUPPORTED: u64 = 10_000;
    pub const NO_DEVICES: u64 = 7000;
    pub const PERMISSION_GRANTED: u64 = 3000;
    pub const PERMISSION_TIMEOUT: u64 = 8000;
    pub const RECONNECT_ATTEMPT: u64 = 5000;
    pub const RECONNECTED: u64 = 6000;
    pub const RECONNECT_FAILED: u64 = 7000;
    pub const INSECURE_CONTEXT: u64 = 12_000;
    pub const PERMISSION_INSTRUCTIONS: u64 = 10_000;
    pub const EXCLUSIVE_USE: u64 = 9000;
    pub const BROWSER_UPDATE: u64 = 10_000;
    pub const DEBUG_CHECKLIST: u64 = 11_000;
}

fn is_chrome(browser: &str) -> bool {
    browser.to_lowercase().contains("chrome")
}

/// The operations the legacy adapter delegates to.
pub trait NotificationApi {
    /// Renders a notification. `None` uses the configured default duration.
    fn show(
        &mut self,
        body: &str,
        severity: Severity,
        icon: &str,
        duration_ms: Option<u64>,
    ) -> NotificationId;

    fn connected(&mut self, device: &DeviceDescriptor) -> NotificationId;

    /// `device_name` defaults to "Dispositivo desconhecido".
    fn disconnected(&mut self, device_id: &str, device_name: Option<&str>) -> NotificationId;

    fn rejected(&mut self, device_name: &str) -> NotificationId;

    fn error(&mut self, message: &str) -> NotificationId;
}

/// Notification front end for MIDI device, permission and environment events.
#[derive(Debug)]
pub struct MidiNotifier {
    manager: Manager,
    catalog: Catalog,
}

impl MidiNotifier {
    /// Creates a notifier drawing onto the toast overlay.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Catalog`] if the embedded messages
    /// cannot be loaded.
    pub fn new(config: &NotificationConfig) -> Result<Self> {
        Ok(Self::from_parts(Manager::new(config), Catalog::load()?))
    }

    /// Creates a notifier without a render surface; notifications are
    /// logged and the registry stays queryable.
    pub fn headless(config: &NotificationConfig) -> Result<Self> {
        Ok(Self::from_parts(Manager::headless(config), Catalog::load()?))
    }

    pub fn from_parts(manager: Manager, catalog: Catalog) -> Self {
        tracing::info!(
            surface = ?manager.surface(),
            max_concurrent = manager.max_concurrent(),
            "MIDI notifier initialised"
        );
        Self { manager, catalog }
    }

    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn tr(&self, key: &str) -> String {
        self.catalog.tr(key)
    }

    fn tr_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.catalog.tr_with_args(key, args)
    }

    pub fn unsupported(&mut self) -> NotificationId {
        let body = self.tr("midi-unsupported");
        self.show(&body, Severity::Error, "⚠️", Some(durations::UNSUPPORTED))
    }

    pub fn no_devices(&mut self) -> NotificationId {
        let body = self.tr("midi-no-devices");
        self.show(&body, Severity::Info, "💡", Some(durations::NO_DEVICES))
    }

    /// Shows the persistent waiting-permission notification with a
    /// countdown. Calling it again replaces the previous one.
    pub fn waiting_permission(
        &mut self,
        browser: Option<&str>,
        timeout_secs: Option<u32>,
    ) -> NotificationId {
        let browser = non_empty(browser).unwrap_or(DEFAULT_BROWSER);
        let timeout_secs = timeout_secs.unwrap_or(crate::config::DEFAULT_PERMISSION_TIMEOUT_SECS);
        let chrome = is_chrome(browser);
        let seconds = timeout_secs.to_string();

        let (headline, hint, tone) = if chrome {
            (
                self.tr("midi-waiting-permission-urgent"),
                self.tr_with("midi-waiting-permission-chrome-hint", &[("seconds", &seconds)]),
                Tone::Alert,
            )
        } else {
            (
                self.tr("midi-waiting-permission-calm"),
                self.tr("midi-waiting-permission-hint"),
                Tone::Calm,
            )
        };
        let body = format!(
            "{}<br>{headline}<br>{hint}",
            self.tr("midi-waiting-permission-title")
        );

        tracing::info!(browser, timeout_secs, "waiting for MIDI permission");
        self.manager.push(
            Notification::new(WAITING_PERMISSION_ID.into(), Severity::Warning, body)
                .with_icon("⏱️")
                .with_duration_ms(0)
                .with_countdown(Countdown::new(timeout_secs, tone)),
        )
    }

    /// Updates the seconds left on a countdown notification.
    pub fn update_countdown(&mut self, id: &NotificationId, seconds_remaining: u32) -> bool {
        self.manager.update_countdown(id, seconds_remaining)
    }

    /// Removes the waiting-permission notification with its fade exit.
    pub fn hide_waiting_permission(&mut self, id: &NotificationId) -> bool {
        self.manager.hide(id)
    }

    pub fn permission_granted(&mut self) -> NotificationId {
        let body = self.tr("midi-permission-granted");
        self.show(&body, Severity::Success, "✅", Some(durations::PERMISSION_GRANTED))
    }

    pub fn permission_timeout(&mut self, browser: Option<&str>) -> NotificationId {
        let browser = non_empty(browser).unwrap_or(DEFAULT_BROWSER);
        let hint = if is_chrome(browser) {
            self.tr("midi-permission-timeout-chrome-hint")
        } else {
            self.tr("midi-permission-timeout-hint")
        };
        let body = self.tr_with("midi-permission-timeout", &[("hint", &hint)]);
        self.show(&body, Severity::Error, "⏱️", Some(durations::PERMISSION_TIMEOUT))
    }

    pub fn auto_reconnect_attempt(&mut self, detail: &ReconnectDetail) -> NotificationId {
        let reason = detail
            .reason()
            .map_or_else(|| ATTEMPT_FALLBACK.to_string(), |code| format_reason(Some(code)));
        let body = self.tr_with("midi-auto-reconnect-attempt", &[("reason", &reason)]);
        let id = self.show(&body, Severity::Info, "🔄", Some(durations::RECONNECT_ATTEMPT));

        Banner::new("🔄  TENTATIVA DE RECONEXÃO AUTOMÁTICA")
            .section([
                format!("Motivo: {}", detail.reason().unwrap_or("desconhecido")),
                "✓ Eventos e timers rearmados".to_string(),
                "✓ Aguardando resposta do navegador".to_string(),
            ])
            .emit();
        tracing::info!(reason = detail.reason(), "auto-reconnect attempt");
        id
    }

    pub fn auto_reconnected(&mut self, detail: &ReconnectDetail) -> NotificationId {
        let name = detail.name().unwrap_or(DEFAULT_RECONNECTED_NAME);
        let body = match detail.reason() {
            Some(code) => {
                let reason = format_reason(Some(code));
                self.tr_with(
                    "midi-auto-reconnected-reason",
                    &[("name", name), ("reason", &reason)],
                )
            }
            None => self.tr_with("midi-auto-reconnected", &[("name", name)]),
        };
        self.show(&body, Severity::Success, "🔄", Some(durations::RECONNECTED))
    }

    pub fn auto_reconnect_failed(&mut self, detail: &ReconnectDetail) -> NotificationId {
        let reason = detail
            .reason()
            .map_or_else(|| FAILED_FALLBACK.to_string(), |code| format_reason(Some(code)));
        let body = self.tr_with("midi-auto-reconnect-failed", &[("reason", &reason)]);
        self.show(&body, Severity::Warning, "⚠️", Some(durations::RECONNECT_FAILED))
    }

    /// Reports that MIDI access is blocked by an insecure origin.
    pub fn insecure_context(&mut self, details: Option<&str>) -> NotificationId {
        let body = self.tr("midi-insecure-context");
        let id = self.show(&body, Severity::Error, "🔒", Some(durations::INSECURE_CONTEXT));

        tracing::warn!(details, "insecure context is blocking MIDI access");
        tracing::warn!("serve the application over HTTPS or from https://127.0.0.1");
        id
    }

    pub fn permission_instructions(&mut self, state: PermissionState) -> NotificationId {
        let (title_key, severity, icon) = match state {
            PermissionState::Denied => (
                "midi-permission-instructions-denied-title",
                Severity::Error,
                "⛔",
            ),
            PermissionState::Prompt => (
                "midi-permission-instructions-prompt-title",
                Severity::Warning,
                "🔐",
            ),
        };
        let title = self.tr(title_key);
        let body = self.tr_with("midi-permission-instructions", &[("title", &title)]);
        let id = self.show(&body, severity, icon, Some(durations::PERMISSION_INSTRUCTIONS));

        tracing::warn!(
            ?state,
            "review the site permissions at chrome://settings/content/midiDevices"
        );
        id
    }

    pub fn exclusive_use_warning(&mut self) -> NotificationId {
        let body = self.tr("midi-exclusive-use");
        let id = self.show(&body, Severity::Warning, "🛑", Some(durations::EXCLUSIVE_USE));

        tracing::warn!("the MIDI device may be held exclusively by another application");
        id
    }

    pub fn browser_update_warning(
        &mut self,
        current_version: Option<&str>,
        minimum_version: &str,
    ) -> NotificationId {
        let unknown = self.tr("midi-version-unknown");
        let current = non_empty(current_version).unwrap_or(&unknown);
        let body = self.tr_with(
            "midi-browser-update",
            &[("current", current), ("minimum", minimum_version)],
        );
        let id = self.show(&body, Severity::Warning, "⬆️", Some(durations::BROWSER_UPDATE));

        tracing::warn!(
            current = current_version,
            minimum = minimum_version,
            "browser is older than the minimum supported version"
        );
        id
    }

    /// Step-by-step hints for diagnosing a silent device.
    pub fn debug_checklist(&mut self) -> NotificationId {
        let body = self.tr("midi-debug-checklist");
        self.show(&body, Severity::Info, "🧰", Some(durations::DEBUG_CHECKLIST))
    }

    pub fn dismiss(&mut self, id: &NotificationId) -> bool {
        self.manager.dismiss(id)
    }

    pub fn dismiss_all(&mut self) {
        self.manager.dismiss_all();
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.manager.stats()
    }

    pub fn tick(&mut self, now: Instant) {
        self.manager.tick(now);
    }

    pub fn handle_message(&mut self, message: &NotificationMessage) {
        self.manager.handle_message(message);
    }
}

impl NotificationApi for MidiNotifier {
    fn show(
        &mut self,
        body: &str,
        severity: Severity,
        icon: &str,
        duration_ms: Option<u64>,
    ) -> NotificationId {
        let duration_ms = duration_ms.unwrap_or_else(|| self.manager.default_duration_ms());
        self.manager.render(body, severity, icon, duration_ms, None)
    }

    fn connected(&mut self, device: &DeviceDescriptor) -> NotificationId {
        let body = self.tr_with("midi-connected", &[("name", &device.name)]);
        let id = self.show(&body, Severity::Success, "✅", None);

        Banner::new("🎉 DISPOSITIVO TERRA CONECTADO!")
            .section([
                format!("Nome: {}", device.name),
                format!("ID: {}", device.id),
                format!("Fabricante: {}", device.manufacturer),
            ])
            .section([
                "✓ Dispositivo pronto para uso",
                "✓ Mensagens MIDI sendo recebidas",
                "✓ Integração com áudio ativa",
            ])
            .emit();
        tracing::info!(
            device.name = %device.name,
            device.id = %device.id,
            device.manufacturer = %device.manufacturer,
            "MIDI device connected"
        );
        id
    }

    fn disconnected(&mut self, device_id: &str, device_name: Option<&str>) -> NotificationId {
        let name = non_empty(device_name).unwrap_or(UNKNOWN_DEVICE_NAME);
        let body = self.tr_with("midi-disconnected", &[("name", name)]);
        let id = self.show(&body, Severity::Warning, "⚠️", None);

        Banner::new("⚠️  DISPOSITIVO DESCONECTADO")
            .section([format!("Nome: {name}"), format!("ID: {device_id}")])
            .section(["✗ Dispositivo removido", "ℹ️  Reconecte para continuar usando"])
            .emit();
        tracing::info!(device.name = name, device.id = device_id, "MIDI device disconnected");
        id
    }

    fn rejected(&mut self, device_name: &str) -> NotificationId {
        let body = self.tr_with("midi-rejected", &[("name", device_name)]);
        tracing::info!(device.name = device_name, "MIDI device rejected");
        self.show(&body, Severity::Warning, "⛔", None)
    }

    fn error(&mut self, message: &str) -> NotificationId {
        let body = self.tr_with("midi-error", &[("message", message)]);
        tracing::error!(error = message, "MIDI error");
        self.show(&body, Severity::Error, "❌", Some(durations::ERROR))
    }
}
