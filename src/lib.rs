// SPDX-License-Identifier: MPL-2.0
//! `midi_notifier` turns MIDI device and permission events into toast
//! notifications rendered with the Iced GUI framework.
//!
//! The crate is split the same way the notifications are produced:
//!
//! - [`midi`] maps domain events (device connected, permission timeout,
//!   auto-reconnect, ...) to notifications and keeps the legacy call
//!   signatures working.
//! - [`ui::notifications`] owns the bounded registry of live notifications,
//!   their timers and the toast widget that draws them.
//! - [`catalog`] holds the user-facing message texts, [`config`] the
//!   construction-time settings.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod midi;
pub mod ui;
