// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` registers notifications, bounds how many are visible at
//! once, and drives their timers. Every way a notification can go away
//! (auto-dismiss, explicit dismissal, hide, eviction) ends in the same
//! removal routine, which cancels the entry's pending timers, drops it from
//! the registry and starts its exit transition exactly once.

use super::notification::{Exit, Notification, NotificationId, Severity};
use super::registry::Registry;
use super::scheduler::Scheduler;
use crate::config::{NotificationConfig, Position, ENTER_DELAY_MS};
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID (toast close button).
    Dismiss(NotificationId),
    /// Periodic tick that runs due timers.
    Tick(Instant),
}

/// Deferred work queued on the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    /// Start the enter transition.
    Enter(NotificationId),
    /// Remove after the notification's duration elapsed.
    AutoDismiss(NotificationId),
    /// Drop an exited notification (by serial) from the surface.
    Detach(u64),
}

/// Whether anything can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Mounted,
    /// No render target; the registry still works and renders are logged.
    Unavailable,
}

/// Snapshot of the registry size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub active_count: usize,
    pub max_concurrent: usize,
}

/// Owns the live notifications, the ones still animating out, and their timers.
#[derive(Debug)]
pub struct Manager {
    registry: Registry,
    /// Removed from the registry, waiting for their exit transition to end.
    exiting: Vec<Notification>,
    scheduler: Scheduler<Deferred>,
    surface: Surface,
    max_concurrent: usize,
    default_duration_ms: u64,
    position: Position,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl Manager {
    /// Creates a manager drawing onto a mounted surface.
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        Self::with_surface(config, Surface::Mounted)
    }

    /// Creates a manager without a render surface.
    #[must_use]
    pub fn headless(config: &NotificationConfig) -> Self {
        Self::with_surface(config, Surface::Unavailable)
    }

    fn with_surface(config: &NotificationConfig, surface: Surface) -> Self {
        Self {
            registry: Registry::new(),
            exiting: Vec::new(),
            scheduler: Scheduler::new(),
            surface,
            max_concurrent: config.effective_max_concurrent(),
            default_duration_ms: config.effective_default_duration_ms(),
            position: config.position,
        }
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn default_duration_ms(&self) -> u64 {
        self.default_duration_ms
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Renders a notification. With `id`, an existing notification under
    /// the same id is replaced; without it a fresh id is generated.
    pub fn render(
        &mut self,
        body: impl Into<String>,
        severity: Severity,
        icon: &str,
        duration_ms: u64,
        id: Option<NotificationId>,
    ) -> NotificationId {
        let id = id.unwrap_or_else(NotificationId::generate);
        let notification = Notification::new(id, severity, body)
            .with_icon(icon)
            .with_duration_ms(duration_ms);
        self.push(notification)
    }

    /// Registers a prepared notification and schedules its timers.
    ///
    /// If the registry is full, the oldest notification is removed first,
    /// so no more than `max_concurrent` are ever live.
    pub fn push(&mut self, notification: Notification) -> NotificationId {
        let now = Instant::now();
        let id = notification.id().clone();

        if self.registry.contains(&id) {
            tracing::debug!(id = %id, "replacing notification with the same id");
            self.remove_at(&id, Exit::Slide, now);
        }

        while self.registry.len() >= self.max_concurrent {
            let Some(oldest) = self.registry.oldest().cloned() else {
                break;
            };
            tracing::debug!(evicted = %oldest, "evicting oldest notification");
            self.remove_at(&oldest, Exit::Slide, now);
        }

        let mut timers = Vec::new();
        if self.surface == Surface::Mounted {
            timers.push(self.scheduler.schedule(
                now + Duration::from_millis(ENTER_DELAY_MS),
                Deferred::Enter(id.clone()),
            ));
        } else {
            tracing::info!(
                id = %id,
                severity = %notification.severity(),
                body = notification.body(),
                "notification without render surface"
            );
        }
        if let Some(after) = notification.auto_dismiss_after() {
            timers.push(
                self.scheduler
                    .schedule(now + after, Deferred::AutoDismiss(id.clone())),
            );
        }

        tracing::debug!(
            id = %id,
            severity = %notification.severity(),
            duration_ms = notification.duration_ms(),
            "notification registered"
        );
        self.registry.insert(notification, timers);
        id
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was live. Absent ids are ignored.
    pub fn dismiss(&mut self, id: &NotificationId) -> bool {
        self.remove_at(id, Exit::Slide, Instant::now())
    }

    /// Removes a notification with the fade exit instead of the slide.
    pub fn hide(&mut self, id: &NotificationId) -> bool {
        self.remove_at(id, Exit::Fade, Instant::now())
    }

    /// Dismisses every live notification.
    pub fn dismiss_all(&mut self) {
        let now = Instant::now();
        let ids: Vec<NotificationId> = self.registry.ids().cloned().collect();
        for id in ids {
            self.remove_at(&id, Exit::Slide, now);
        }
    }

    /// Updates the countdown of a live notification in place.
    ///
    /// Returns `false` if the id is not live or has no countdown.
    pub fn update_countdown(&mut self, id: &NotificationId, remaining_secs: u32) -> bool {
        match self
            .registry
            .get_mut(id)
            .and_then(Notification::countdown_mut)
        {
            Some(countdown) => {
                countdown.update(remaining_secs);
                true
            }
            None => false,
        }
    }

    /// Runs every task whose deadline is at or before `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Some(task) = self.scheduler.pop_due(now) {
            match task {
                Deferred::Enter(id) => {
                    if let Some(notification) = self.registry.get_mut(&id) {
                        notification.mark_shown(now);
                    }
                }
                Deferred::AutoDismiss(id) => {
                    self.remove_at(&id, Exit::Slide, now);
                }
                Deferred::Detach(serial) => {
                    self.exiting.retain(|n| n.serial() != serial);
                }
            }
        }
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Tick(now) => self.tick(*now),
        }
    }

    /// The single removal routine.
    fn remove_at(&mut self, id: &NotificationId, exit: Exit, now: Instant) -> bool {
        let Some(entry) = self.registry.remove(id) else {
            return false;
        };
        for handle in entry.timers {
            self.scheduler.cancel(handle);
        }

        if self.surface == Surface::Mounted {
            let mut notification = entry.notification;
            notification.mark_exiting(now, exit);
            self.scheduler
                .schedule(now + exit.grace(), Deferred::Detach(notification.serial()));
            self.exiting.push(notification);
        }
        tracing::debug!(id = %id, ?exit, "notification removed");
        true
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.registry.contains(id)
    }

    /// Live notification ids, oldest first.
    pub fn active_ids(&self) -> impl Iterator<Item = &NotificationId> {
        self.registry.ids()
    }

    /// Everything currently on screen: exiting notifications first, then
    /// live ones oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.exiting.iter().chain(self.registry.iter())
    }

    /// Returns the number of live notifications.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of notifications still animating out.
    #[must_use]
    pub fn exiting_count(&self) -> usize {
        self.exiting.len()
    }

    /// Returns whether anything is live or still animating.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.registry.is_empty() || !self.exiting.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats {
            active_count: self.registry.len(),
            max_concurrent: self.max_concurrent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_CONCURRENT, TRANSITION_MS};
    use crate::ui::notifications::notification::{Countdown, Phase, Tone, Urgency};

    fn later(ms: u64) -> Instant {
        Instant::now() + Duration::from_millis(ms)
    }

    fn show(manager: &mut Manager, body: &str) -> NotificationId {
        manager.render(body, Severity::Info, "ℹ️", 5000, None)
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new(&NotificationConfig::default());
        assert_eq!(manager.active_count(), 0);
        assert!(!manager.has_notifications());
        assert_eq!(
            manager.stats(),
            Stats {
                active_count: 0,
                max_concurrent: DEFAULT_MAX_CONCURRENT
            }
        );
    }

    #[test]
    fn render_registers_notification() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "hello");

        assert!(manager.contains(&id));
        assert_eq!(manager.get(&id).map(Notification::body), Some("hello"));
        assert_eq!(manager.get(&id).map(Notification::phase), Some(Phase::Entering));
    }

    #[test]
    fn fourth_render_evicts_the_oldest() {
        let mut manager = Manager::default();
        let first = show(&mut manager, "1");
        let second = show(&mut manager, "2");
        let third = show(&mut manager, "3");
        let fourth = show(&mut manager, "4");

        assert_eq!(manager.active_count(), 3);
        assert!(!manager.contains(&first));
        let ids: Vec<&NotificationId> = manager.active_ids().collect();
        assert_eq!(ids, vec![&second, &third, &fourth]);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut manager = Manager::default();
        for i in 0..20 {
            show(&mut manager, &format!("n{i}"));
            assert!(manager.active_count() <= manager.max_concurrent());
        }
    }

    #[test]
    fn stable_id_replaces_existing_notification() {
        let mut manager = Manager::default();
        let id = NotificationId::new("fixed");
        manager.render("old", Severity::Warning, "⏱️", 0, Some(id.clone()));
        show(&mut manager, "other");
        manager.render("new", Severity::Warning, "⏱️", 0, Some(id.clone()));

        assert_eq!(manager.active_count(), 2);
        assert_eq!(manager.get(&id).map(Notification::body), Some("new"));
        // The replacement is the newest entry.
        assert_eq!(manager.active_ids().last(), Some(&id));
    }

    #[test]
    fn replacing_a_full_registry_does_not_evict_others() {
        let mut manager = Manager::default();
        let id = NotificationId::new("fixed");
        let a = show(&mut manager, "a");
        let b = show(&mut manager, "b");
        manager.render("old", Severity::Info, "ℹ️", 0, Some(id.clone()));
        manager.render("new", Severity::Info, "ℹ️", 0, Some(id.clone()));

        assert!(manager.contains(&a));
        assert!(manager.contains(&b));
        assert_eq!(manager.active_count(), 3);
    }

    #[test]
    fn auto_dismiss_fires_after_duration() {
        let mut manager = Manager::default();
        let id = manager.render("short", Severity::Success, "✅", 1000, None);

        manager.tick(Instant::now());
        assert!(manager.contains(&id));

        manager.tick(later(1500));
        assert!(!manager.contains(&id));
        assert_eq!(manager.exiting_count(), 1);
    }

    #[test]
    fn persistent_notification_never_auto_dismisses() {
        let mut manager = Manager::default();
        let id = manager.render("sticky", Severity::Warning, "⏱️", 0, None);

        manager.tick(later(24 * 60 * 60 * 1000));
        assert!(manager.contains(&id));

        assert!(manager.dismiss(&id));
        assert!(!manager.contains(&id));
    }

    #[test]
    fn manual_dismiss_suppresses_pending_auto_dismiss() {
        let mut manager = Manager::default();
        let id = NotificationId::new("reused");
        manager.render("first", Severity::Info, "ℹ️", 1000, Some(id.clone()));
        assert!(manager.dismiss(&id));

        // Same id registered again with a longer lifetime.
        manager.render("second", Severity::Info, "ℹ️", 60_000, Some(id.clone()));
        manager.tick(later(2000));

        assert!(manager.contains(&id));
        assert_eq!(manager.get(&id).map(Notification::body), Some("second"));
    }

    #[test]
    fn dismiss_absent_is_a_no_op() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "kept");
        assert!(!manager.dismiss(&NotificationId::new("missing")));
        assert!(manager.contains(&id));
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn second_dismiss_is_a_no_op() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "once");
        assert!(manager.dismiss(&id));
        assert!(!manager.dismiss(&id));
        assert_eq!(manager.exiting_count(), 1);
    }

    #[test]
    fn dismiss_all_removes_everything() {
        let mut manager = Manager::default();
        for i in 0..3 {
            show(&mut manager, &format!("n{i}"));
        }
        manager.dismiss_all();
        assert_eq!(manager.active_count(), 0);
        assert_eq!(manager.exiting_count(), 3);
    }

    #[test]
    fn exit_transition_detaches_after_grace_window() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "leaving");
        manager.dismiss(&id);
        assert!(manager.has_notifications());
        assert!(manager.visible().any(Notification::is_exiting));

        manager.tick(later(TRANSITION_MS * 3));
        assert!(!manager.has_notifications());
        assert_eq!(manager.visible().count(), 0);
    }

    #[test]
    fn hide_uses_fade_exit() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "fading");
        assert!(manager.hide(&id));
        assert!(!manager.contains(&id));

        let exiting = manager.visible().next().expect("exiting notification");
        assert!(matches!(
            exiting.phase(),
            Phase::Exiting {
                exit: Exit::Fade,
                ..
            }
        ));
    }

    #[test]
    fn enter_tick_marks_notification_shown() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "entering");
        manager.tick(later(ENTER_DELAY_MS + 50));
        assert!(matches!(
            manager.get(&id).map(Notification::phase),
            Some(Phase::Shown { .. })
        ));
    }

    #[test]
    fn update_countdown_changes_only_that_entry() {
        let mut manager = Manager::default();
        let plain = show(&mut manager, "plain");
        let id = manager.push(
            Notification::new("waiting".into(), Severity::Warning, "wait")
                .with_countdown(Countdown::new(30, Tone::Alert)),
        );

        assert!(manager.update_countdown(&id, 5));
        assert!(!manager.update_countdown(&plain, 5));
        assert!(!manager.update_countdown(&NotificationId::new("absent"), 5));

        let countdown = manager.get(&id).and_then(Notification::countdown).copied();
        assert_eq!(countdown.map(|c| c.remaining_secs()), Some(5));
        assert_eq!(countdown.map(|c| c.urgency()), Some(Urgency::Critical));
    }

    #[test]
    fn handle_message_dismiss() {
        let mut manager = Manager::default();
        let id = show(&mut manager, "test");
        manager.handle_message(&Message::Dismiss(id.clone()));
        assert!(!manager.contains(&id));
    }

    #[test]
    fn headless_manager_keeps_logical_state() {
        let mut manager = Manager::headless(&NotificationConfig::default());
        assert_eq!(manager.surface(), Surface::Unavailable);

        let id = manager.render("logged", Severity::Error, "❌", 1000, None);
        assert_eq!(manager.stats().active_count, 1);

        manager.tick(later(2000));
        assert!(!manager.contains(&id));
        assert_eq!(manager.exiting_count(), 0);
    }

    #[test]
    fn configured_capacity_is_respected() {
        let config = NotificationConfig {
            max_concurrent: 1,
            ..NotificationConfig::default()
        };
        let mut manager = Manager::new(&config);
        let first = show(&mut manager, "a");
        let second = show(&mut manager, "b");
        assert!(!manager.contains(&first));
        assert!(manager.contains(&second));
        assert_eq!(manager.stats().max_concurrent, 1);
    }
}
