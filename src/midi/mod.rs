// SPDX-License-Identifier: MPL-2.0
//! MIDI event notifications.
//!
//! - [`notifier`] - `MidiNotifier`, one operation per device, permission and
//!   environment event
//! - [`legacy`] - The older `show_device_*` call signatures
//! - [`reason`] - Auto-reconnect reason codes and their descriptions
//! - [`device`] - Device payloads and their normalization
//! - [`console`] - Boxed log banners
//! - [`fallback`] - `Notify` contract with a native alert fallback
//!
//! The named operations live on the [`NotificationApi`] trait and on
//! `MidiNotifier` itself; import the traits to call them.

pub mod console;
pub mod device;
pub mod fallback;
pub mod legacy;
pub mod notifier;
pub mod reason;

pub use device::{
    DeviceDescriptor, DeviceEntry, DevicePayload, PartialDevice, PermissionState,
    ReconnectDetail, ReconnectPayload, ReconnectedDevice,
};
pub use fallback::{notify_or_alert, AlertSink, DialogAlert, Notify};
pub use legacy::LegacyApi;
pub use notifier::{MidiNotifier, NotificationApi, WAITING_PERMISSION_ID};
pub use reason::{format_reason, Reason};
