// SPDX-License-Identifier: MPL-2.0
//! Device and event payloads.
//!
//! Callers hand over whatever shape they have: a bare name, a partial
//! object, a list mixing both, or nothing. Payloads deserialize from any of
//! those shapes and normalize into a complete [`DeviceDescriptor`].

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used when a connected device has none.
pub const DEFAULT_DEVICE_NAME: &str = "Dispositivo Terra";

/// Manufacturer used when a device has none.
pub const DEFAULT_MANUFACTURER: &str = "Terra Eletrônica";

/// Name shown when a disconnected device has none.
pub const UNKNOWN_DEVICE_NAME: &str = "Dispositivo desconhecido";

/// Name used for auto-reconnected devices without one.
pub const DEFAULT_RECONNECTED_NAME: &str = "Midi-Terra";

/// A fully populated device description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub id: String,
    pub manufacturer: String,
}

impl DeviceDescriptor {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// Descriptor with a generated id and the default manufacturer.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, generate_device_id(), DEFAULT_MANUFACTURER)
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Generates a device id of the form `terra-device-<unix-millis>`.
#[must_use]
pub fn generate_device_id() -> String {
    format!("terra-device-{}", chrono::Utc::now().timestamp_millis())
}

/// Treats empty strings as missing.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// A device object where any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDevice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

impl PartialDevice {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Fills the missing fields, using `default_name` for the name.
    #[must_use]
    pub fn into_descriptor(self, default_name: &str) -> DeviceDescriptor {
        let name = self.name().unwrap_or(default_name).to_string();
        let id = non_empty(self.id.as_deref())
            .map_or_else(generate_device_id, str::to_string);
        let manufacturer = non_empty(self.manufacturer.as_deref())
            .unwrap_or(DEFAULT_MANUFACTURER)
            .to_string();
        DeviceDescriptor {
            name,
            id,
            manufacturer,
        }
    }
}

/// One element of a device list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeviceEntry {
    Name(String),
    Device(PartialDevice),
    /// Anything else (`null`, numbers) is skipped.
    Other(IgnoredAny),
}

impl DeviceEntry {
    fn name(&self) -> Option<&str> {
        match self {
            DeviceEntry::Name(name) => non_empty(Some(name)),
            DeviceEntry::Device(device) => device.name(),
            DeviceEntry::Other(_) => None,
        }
    }
}

/// Device payload accepted by the legacy connected call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum DevicePayload {
    #[default]
    Missing,
    Name(String),
    // Lists come before objects: a struct would also accept a sequence.
    List(Vec<DeviceEntry>),
    Device(PartialDevice),
    /// Numbers are used as the label; zero and `NaN` count as missing.
    Number(f64),
    /// `true` is used as the label; `false` counts as missing.
    Flag(bool),
    Other(IgnoredAny),
}

impl DevicePayload {
    /// Normalizes into a single descriptor.
    ///
    /// Objects keep their own fields. Lists contribute only their names,
    /// joined with `", "`, and get a generated id.
    #[must_use]
    pub fn into_descriptor(self) -> DeviceDescriptor {
        match self {
            DevicePayload::Device(device) => device.into_descriptor(DEFAULT_DEVICE_NAME),
            DevicePayload::Name(name) => {
                DeviceDescriptor::named(non_empty(Some(&name)).unwrap_or(DEFAULT_DEVICE_NAME))
            }
            DevicePayload::List(entries) => {
                let names: Vec<&str> = entries.iter().filter_map(DeviceEntry::name).collect();
                if names.is_empty() {
                    DeviceDescriptor::named(DEFAULT_DEVICE_NAME)
                } else {
                    DeviceDescriptor::named(names.join(", "))
                }
            }
            DevicePayload::Number(value) if value != 0.0 && !value.is_nan() => {
                DeviceDescriptor::named(value.to_string())
            }
            DevicePayload::Flag(true) => DeviceDescriptor::named("true"),
            DevicePayload::Missing
            | DevicePayload::Number(_)
            | DevicePayload::Flag(false)
            | DevicePayload::Other(_) => DeviceDescriptor::named(DEFAULT_DEVICE_NAME),
        }
    }
}

impl From<&str> for DevicePayload {
    fn from(name: &str) -> Self {
        DevicePayload::Name(name.to_string())
    }
}

impl From<PartialDevice> for DevicePayload {
    fn from(device: PartialDevice) -> Self {
        DevicePayload::Device(device)
    }
}

/// Object form of the legacy auto-reconnected payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReconnectedDevice {
    #[serde(flatten)]
    pub device: PartialDevice,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Payload accepted by the legacy auto-reconnected call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum ReconnectPayload {
    #[default]
    Missing,
    Name(String),
    Device(ReconnectedDevice),
    /// Numbers, booleans and lists carry no name.
    Other(IgnoredAny),
}

impl ReconnectPayload {
    #[must_use]
    pub fn into_descriptor(self) -> DeviceDescriptor {
        match self {
            ReconnectPayload::Name(name) => PartialDevice {
                name: Some(name),
                ..PartialDevice::default()
            },
            ReconnectPayload::Device(reconnected) => reconnected.device,
            ReconnectPayload::Missing | ReconnectPayload::Other(_) => PartialDevice::default(),
        }
        .into_descriptor(DEFAULT_RECONNECTED_NAME)
    }

    /// Keeps the name and reason for the auto-reconnected notification.
    #[must_use]
    pub fn into_detail(self) -> ReconnectDetail {
        match self {
            ReconnectPayload::Name(name) => ReconnectDetail {
                name: Some(name),
                reason: None,
            },
            ReconnectPayload::Device(reconnected) => ReconnectDetail {
                name: reconnected.device.name,
                reason: reconnected.reason,
            },
            ReconnectPayload::Missing | ReconnectPayload::Other(_) => ReconnectDetail::default(),
        }
    }
}

impl From<&str> for ReconnectPayload {
    fn from(name: &str) -> Self {
        ReconnectPayload::Name(name.to_string())
    }
}

/// Details of an auto-reconnect event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ReconnectDetail {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            name: None,
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        non_empty(self.reason.as_deref())
    }
}

/// State of the browser's MIDI permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Prompt,
    Denied,
}
