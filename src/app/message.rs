// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// A MIDI event the user can fire from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    Connect,
    Disconnect,
    Reject,
    Error,
    Unsupported,
    NoDevices,
    RequestPermission,
    GrantPermission,
    ReconnectAttempt,
    Reconnected,
    ReconnectFailed,
    InsecureContext,
    Instructions,
    ExclusiveUse,
    BrowserUpdate,
    Checklist,
    LegacyConnect,
    LegacyDisconnect,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Notification(notifications::NotificationMessage),
    Fire(DemoEvent),
    DismissAll,
    /// Periodic tick driving timers and the permission countdown.
    Tick(Instant),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Directory holding `notifier.toml`, overriding the platform default.
    pub config_dir: Option<PathBuf>,
    /// Run a scripted session without opening a window.
    pub headless: bool,
    /// Write the effective configuration to `notifier.toml` and exit.
    pub write_config: bool,
}
