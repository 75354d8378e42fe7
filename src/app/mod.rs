// SPDX-License-Identifier: MPL-2.0
//! Demo host application.
//!
//! Mounts the toast overlay on top of a control panel that fires every MIDI
//! event, and drives the waiting-permission countdown from the tick
//! subscription. `run_headless` plays a scripted session without a window.

mod message;
mod subscription;
mod view;

pub use message::{DemoEvent, Flags, Message};

use crate::config::{self, Config, DEFAULT_PERMISSION_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::midi::{
    DevicePayload, DeviceDescriptor, LegacyApi, MidiNotifier, NotificationApi, PermissionState,
    ReconnectDetail,
};
use crate::ui::notifications::{NotificationId, Severity};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::{Duration, Instant};

pub const WINDOW_DEFAULT_WIDTH: f32 = 960.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 680.0;

/// Browser name the demo pretends to run in.
const DEMO_BROWSER: &str = "Chrome";
const DEMO_MINIMUM_BROWSER: &str = "114";

/// A permission request whose countdown is still running.
#[derive(Debug, Clone)]
struct PendingPermission {
    id: NotificationId,
    deadline: Instant,
    last_reported: u32,
}

impl PendingPermission {
    fn new(id: NotificationId, now: Instant, timeout_secs: u32) -> Self {
        Self {
            id,
            deadline: now + Duration::from_secs(u64::from(timeout_secs)),
            last_reported: timeout_secs,
        }
    }

    /// Whole seconds left, rounded up.
    fn remaining_secs(&self, now: Instant) -> u32 {
        let left = self.deadline.saturating_duration_since(now);
        let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// Root Iced application state.
pub struct App {
    notifier: MidiNotifier,
    permission: Option<PendingPermission>,
    /// Time of the last tick, used to evaluate transitions in `view`.
    now: Instant,
    device_counter: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("stats", &self.notifier.stats())
            .field("permission_pending", &self.permission.is_some())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        ..window::Settings::default()
    }
}

fn load_config(flags: &Flags) -> (Config, Option<String>) {
    config::load_with_override(flags.config_dir.clone())
}

/// Entry point used by `main.rs` to launch the Iced application loop.
///
/// # Errors
///
/// Fails before opening the window if the message catalog cannot be loaded.
pub fn run(flags: Flags) -> Result<iced::Result> {
    use std::cell::RefCell;

    let app = App::new(&flags)?;

    // iced 0.14 requires an `Fn` boot closure; the state is handed over once.
    let boot_state = RefCell::new(Some(app));
    let boot = move || {
        let app = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (app, Task::none())
    };

    Ok(iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run())
}

/// Writes the effective configuration to `notifier.toml` so it can be edited.
///
/// # Errors
///
/// Refuses to overwrite a file that could not be parsed, and fails when the
/// file cannot be written.
pub fn write_config(flags: &Flags) -> Result<()> {
    let (config, warning) = load_config(flags);
    if warning.is_some() {
        return Err(Error::Config(
            "existing notifier.toml is invalid, leaving it untouched".to_string(),
        ));
    }
    config::save_with_override(&config, flags.config_dir.clone())?;
    tracing::info!(notifications = ?config.notifications, "notifier config written");
    Ok(())
}

/// Plays a scripted session against a notifier without render surface and
/// logs the registry state after each step.
pub fn run_headless(flags: &Flags) -> Result<()> {
    let (config, warning) = load_config(flags);
    let mut notifier = MidiNotifier::headless(&config.notifications)?;
    if let Some(key) = warning {
        let body = notifier.catalog().tr(&key);
        notifier.show(&body, Severity::Warning, "⚠️", None);
    }

    let start = Instant::now();
    let at = |ms: u64| start + Duration::from_millis(ms);

    notifier.connected(&DeviceDescriptor::named("Midi-Terra"));
    let waiting = notifier.waiting_permission(Some(DEMO_BROWSER), None);
    notifier.update_countdown(&waiting, 5);
    notifier.hide_waiting_permission(&waiting);
    notifier.permission_granted();
    notifier.auto_reconnect_attempt(&ReconnectDetail::with_reason("usb-connect"));
    notifier.show_device_connected(DevicePayload::from("Korg"));
    tracing::info!(stats = ?notifier.stats(), "after scripted events");

    for ms in [3_000, 6_000, 10_000] {
        notifier.tick(at(ms));
        tracing::info!(elapsed_ms = ms, stats = ?notifier.stats(), "tick");
    }
    notifier.dismiss_all();
    tracing::info!(stats = ?notifier.stats(), "headless session finished");
    Ok(())
}

impl App {
    /// Loads configuration and builds the notifier.
    fn new(flags: &Flags) -> Result<Self> {
        let (config, config_warning) = load_config(flags);
        let mut notifier = MidiNotifier::new(&config.notifications)?;

        if let Some(key) = config_warning {
            let body = notifier.catalog().tr(&key);
            notifier.show(&body, Severity::Warning, "⚠️", None);
        }

        Ok(Self {
            notifier,
            permission: None,
            now: Instant::now(),
            device_counter: 0,
        })
    }

    fn title(&self) -> String {
        self.notifier.catalog().tr("app-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(
            self.notifier.manager().has_notifications() || self.permission.is_some(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Notification(message) => self.notifier.handle_message(&message),
            Message::Fire(event) => self.fire(event),
            Message::DismissAll => self.notifier.dismiss_all(),
            Message::Tick(now) => self.tick(now),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(&self.notifier, self.now)
    }

    fn tick(&mut self, now: Instant) {
        self.now = now;
        if let Some(pending) = self.permission.as_mut() {
            let remaining = pending.remaining_secs(now);
            if remaining != pending.last_reported {
                pending.last_reported = remaining;
                self.notifier.update_countdown(&pending.id, remaining);
            }
            if remaining == 0 {
                let id = pending.id.clone();
                self.permission = None;
                self.notifier.hide_waiting_permission(&id);
                self.notifier.permission_timeout(Some(DEMO_BROWSER));
            }
        }
        self.notifier.tick(now);
    }

    fn next_device_name(&mut self) -> String {
        self.device_counter += 1;
        format!("Midi-Terra #{}", self.device_counter)
    }

    fn fire(&mut self, event: DemoEvent) {
        let now = Instant::now();
        self.now = now;
        match event {
            DemoEvent::Connect => {
                let name = self.next_device_name();
                self.notifier.connected(&DeviceDescriptor::named(name));
            }
            DemoEvent::Disconnect => {
                self.notifier.disconnected("terra-device", Some("Midi-Terra"));
            }
            DemoEvent::Reject => {
                self.notifier.rejected("Teclado Genérico USB");
            }
            DemoEvent::Error => {
                self.notifier.error("Falha ao abrir a porta MIDI");
            }
            DemoEvent::Unsupported => {
                self.notifier.unsupported();
            }
            DemoEvent::NoDevices => {
                self.notifier.no_devices();
            }
            DemoEvent::RequestPermission => {
                let id = self.notifier.waiting_permission(Some(DEMO_BROWSER), None);
                self.permission =
                    Some(PendingPermission::new(id, now, DEFAULT_PERMISSION_TIMEOUT_SECS));
            }
            DemoEvent::GrantPermission => {
                if let Some(pending) = self.permission.take() {
                    self.notifier.hide_waiting_permission(&pending.id);
                }
                self.notifier.permission_granted();
            }
            DemoEvent::ReconnectAttempt => {
                self.notifier
                    .auto_reconnect_attempt(&ReconnectDetail::with_reason("retry-after-failure:2"));
            }
            DemoEvent::Reconnected => {
                self.notifier.auto_reconnected(&ReconnectDetail {
                    name: Some("Midi-Terra".to_string()),
                    reason: Some("usb-connect".to_string()),
                });
            }
            DemoEvent::ReconnectFailed => {
                self.notifier.auto_reconnect_failed(&ReconnectDetail::default());
            }
            DemoEvent::InsecureContext => {
                self.notifier.insecure_context(Some("http://192.168.0.10"));
            }
            DemoEvent::Instructions => {
                self.notifier.permission_instructions(PermissionState::Denied);
            }
            DemoEvent::ExclusiveUse => {
                self.notifier.exclusive_use_warning();
            }
            DemoEvent::BrowserUpdate => {
                self.notifier
                    .browser_update_warning(Some("98"), DEMO_MINIMUM_BROWSER);
            }
            DemoEvent::Checklist => {
                self.notifier.debug_checklist();
            }
            DemoEvent::LegacyConnect => {
                let name = self.next_device_name();
                self.notifier
                    .show_device_connected(DevicePayload::from(name.as_str()));
            }
            DemoEvent::LegacyDisconnect => {
                self.notifier.show_device_disconnected(None, None);
            }
        }
    }
}
