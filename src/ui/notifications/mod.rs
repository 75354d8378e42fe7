// SPDX-License-Identifier: MPL-2.0
//! Toast notification system.
//!
//! Notifications appear in a corner of the window, stack up to a configured
//! bound and leave either on their own after a duration or when dismissed.
//!
//! # Components
//!
//! - [`notification`] - `Notification`, `Severity` and the countdown state
//! - [`registry`] - Insertion-ordered set of live notifications
//! - [`scheduler`] - Cancellable deferred tasks drained on each tick
//! - [`manager`] - `Manager` for registration, eviction and removal
//! - [`markup`] - Inline markup used in bodies
//! - [`toast`] - Toast widget rendering notifications
//!
//! # Usage
//!
//! ```ignore
//! use midi_notifier::ui::notifications::{Manager, Severity};
//!
//! let mut manager = Manager::default();
//! manager.render("<strong>Pronto</strong>", Severity::Success, "✅", 3000, None);
//!
//! // In the view function, render toasts on top of the content
//! let overlay = Toast::view_overlay(&manager, Instant::now()).map(Message::Notification);
//! ```

pub mod manager;
pub mod markup;
pub mod notification;
pub mod registry;
pub mod scheduler;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, Stats, Surface};
pub use notification::{
    Countdown, Exit, Notification, NotificationId, Phase, Severity, Tone, Urgency,
};
pub use toast::Toast;
