// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its `Severity`, and the
//! presentation state (`Phase`, `Countdown`) the toast widget reads.

use crate::config::{
    COUNTDOWN_BLINK_MS, COUNTDOWN_CRITICAL_SECS, COUNTDOWN_WARNING_SECS, HIDE_FADE_MS,
    TRANSITION_MS,
};
use crate::ui::design_tokens::palette;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Identity of a notification inside the registry.
///
/// Either supplied by the caller (stable, e.g. `"midi-permission-waiting"`)
/// or generated from a timestamp and a random suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates an id of the form `notification-<unix-millis>-<suffix>`.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("notification-{millis}-{}", &suffix[..9]))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Distinguishes two notifications that were registered under the same id
/// at different times.
fn next_serial() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Severity level determines the visual style bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully (green).
    Success,
    /// Something needs attention but nothing is broken (amber).
    Warning,
    /// Error requiring attention (red).
    Error,
    /// Informational message (blue). Also the fallback for unknown names.
    #[default]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Warning,
        Severity::Error,
        Severity::Info,
    ];

    /// Parses a severity name; anything unknown maps to [`Severity::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
            Severity::Info => palette::INFO_500,
        }
    }

    /// Glyph used when a caller does not pick one.
    #[must_use]
    pub fn default_icon(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
            Severity::Info => "ℹ️",
        }
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a notification leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Default dismissal: slide out.
    Slide,
    /// Waiting-permission hide: fade, then slide out.
    Fade,
}

impl Exit {
    /// Time between logical removal and detaching from the surface.
    #[must_use]
    pub fn grace(&self) -> Duration {
        match self {
            Exit::Slide => Duration::from_millis(TRANSITION_MS),
            Exit::Fade => Duration::from_millis(HIDE_FADE_MS + TRANSITION_MS),
        }
    }
}

/// Presentation phase of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Registered, enter transition not started yet.
    Entering,
    /// Enter transition started at `since`.
    Shown { since: Instant },
    /// Removed from the registry, exit transition started at `since`.
    Exiting { since: Instant, exit: Exit },
}

/// Visual urgency of the permission countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    Normal,
    /// At or below the warning threshold: amber.
    Elevated,
    /// At or below the critical threshold: red and blinking.
    Critical,
}

impl Urgency {
    /// Urgency for `secs` remaining, or `None` above the warning threshold.
    #[must_use]
    pub fn for_remaining(secs: u32) -> Option<Self> {
        if secs <= COUNTDOWN_CRITICAL_SECS {
            Some(Urgency::Critical)
        } else if secs <= COUNTDOWN_WARNING_SECS {
            Some(Urgency::Elevated)
        } else {
            None
        }
    }
}

/// Initial color of a countdown, chosen by how tight the browser timeout is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Browser known to time out quickly (red).
    Alert,
    /// Browser that waits for the user (green).
    Calm,
}

/// Seconds counter shown on the waiting-permission notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    urgency: Urgency,
    tone: Tone,
}

impl Countdown {
    #[must_use]
    pub fn new(remaining_secs: u32, tone: Tone) -> Self {
        Self {
            remaining_secs,
            urgency: Urgency::Normal,
            tone,
        }
    }

    /// Updates the counter. Urgency escalates once the remaining time
    /// crosses a threshold; above the thresholds it is left as is.
    pub fn update(&mut self, remaining_secs: u32) {
        self.remaining_secs = remaining_secs;
        if let Some(urgency) = Urgency::for_remaining(remaining_secs) {
            self.urgency = urgency;
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    #[must_use]
    pub fn tone(&self) -> Tone {
        self.tone
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{}s", self.remaining_secs)
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match (self.urgency, self.tone) {
            (Urgency::Critical, _) => palette::ERROR_500,
            (Urgency::Elevated, _) => palette::WARNING_500,
            (Urgency::Normal, Tone::Alert) => palette::ERROR_500,
            (Urgency::Normal, Tone::Calm) => palette::SUCCESS_500,
        }
    }

    /// Border color of the surrounding toast.
    #[must_use]
    pub fn border_color(&self) -> Color {
        match self.tone {
            Tone::Alert => palette::ERROR_500,
            Tone::Calm => palette::WARNING_500,
        }
    }

    /// Whether the counter is in the dim half of its blink cycle.
    #[must_use]
    pub fn is_dimmed(&self, elapsed: Duration) -> bool {
        self.urgency == Urgency::Critical
            && (elapsed.as_millis() / u128::from(COUNTDOWN_BLINK_MS)) % 2 == 1
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    serial: u64,
    severity: Severity,
    icon: String,
    /// Rich-text markup, displayed as given.
    body: String,
    /// Auto-dismiss delay; `0` keeps the notification until removed.
    duration_ms: u64,
    created_at: Instant,
    phase: Phase,
    /// Opacity when the exit transition started.
    exit_from: f32,
    countdown: Option<Countdown>,
}

impl Notification {
    /// Creates a persistent notification using the severity's default icon.
    pub fn new(id: NotificationId, severity: Severity, body: impl Into<String>) -> Self {
        Self {
            id,
            serial: next_serial(),
            severity,
            icon: severity.default_icon().to_string(),
            body: body.into(),
            duration_ms: 0,
            created_at: Instant::now(),
            phase: Phase::Entering,
            exit_from: 1.0,
            countdown: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_countdown(mut self, countdown: Countdown) -> Self {
        self.countdown = Some(countdown);
        self
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration_ms == 0
    }

    /// Delay after which the notification dismisses itself, if any.
    #[must_use]
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        (!self.is_persistent()).then(|| Duration::from_millis(self.duration_ms))
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }

    #[must_use]
    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub(crate) fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        self.countdown.as_mut()
    }

    pub(crate) fn mark_shown(&mut self, now: Instant) {
        if self.phase == Phase::Entering {
            self.phase = Phase::Shown { since: now };
        }
    }

    pub(crate) fn mark_exiting(&mut self, now: Instant, exit: Exit) {
        self.exit_from = self.opacity(now);
        self.phase = Phase::Exiting { since: now, exit };
    }

    /// Opacity at `now`, following the enter and exit transitions.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Entering => 0.0,
            Phase::Shown { since } => progress(
                now.saturating_duration_since(since),
                Duration::from_millis(TRANSITION_MS),
            ),
            Phase::Exiting { since, exit } => {
                let elapsed = now.saturating_duration_since(since);
                self.exit_from * (1.0 - progress(elapsed, exit.grace()))
            }
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let a = NotificationId::generate();
        let b = NotificationId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("notification-"));
        let suffix = a.as_str().rsplit('-').next().expect("suffix");
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn serials_are_unique_for_the_same_id() {
        let n1 = Notification::new("fixed".into(), Severity::Info, "a");
        let n2 = Notification::new("fixed".into(), Severity::Info, "b");
        assert_eq!(n1.id(), n2.id());
        assert_ne!(n1.serial(), n2.serial());
    }

    #[test]
    fn severity_colors_are_distinct() {
        for (i, a) in Severity::ALL.iter().enumerate() {
            for b in &Severity::ALL[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }

    #[test]
    fn unknown_severity_falls_back_to_info() {
        assert_eq!(Severity::from_name("success"), Severity::Success);
        assert_eq!(Severity::from_name(" WARNING "), Severity::Warning);
        assert_eq!(Severity::from_name("error"), Severity::Error);
        assert_eq!(Severity::from_name("critical"), Severity::Info);
        assert_eq!(Severity::from_name(""), Severity::Info);
    }

    #[test]
    fn duration_zero_is_persistent() {
        let n = Notification::new("p".into(), Severity::Warning, "body");
        assert!(n.is_persistent());
        assert!(n.auto_dismiss_after().is_none());

        let n = n.with_duration_ms(3000);
        assert_eq!(n.auto_dismiss_after(), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn builder_sets_icon_and_defaults_to_severity_icon() {
        let n = Notification::new("x".into(), Severity::Error, "body");
        assert_eq!(n.icon(), "❌");
        let n = n.with_icon("🔒");
        assert_eq!(n.icon(), "🔒");
    }

    #[test]
    fn countdown_escalates_at_thresholds() {
        let mut countdown = Countdown::new(30, Tone::Calm);
        assert_eq!(countdown.urgency(), Urgency::Normal);
        assert_eq!(countdown.color(), palette::SUCCESS_500);

        countdown.update(25);
        assert_eq!(countdown.urgency(), Urgency::Normal);

        countdown.update(20);
        assert_eq!(countdown.urgency(), Urgency::Elevated);
        assert_eq!(countdown.color(), palette::WARNING_500);

        countdown.update(10);
        assert_eq!(countdown.urgency(), Urgency::Critical);
        assert_eq!(countdown.color(), palette::ERROR_500);
        assert_eq!(countdown.label(), "10s");
    }

    #[test]
    fn only_critical_countdown_blinks() {
        let mut countdown = Countdown::new(30, Tone::Alert);
        let dim_half = Duration::from_millis(COUNTDOWN_BLINK_MS);
        assert!(!countdown.is_dimmed(dim_half));

        countdown.update(5);
        assert!(!countdown.is_dimmed(Duration::ZERO));
        assert!(countdown.is_dimmed(dim_half));
    }

    #[test]
    fn opacity_follows_phases() {
        let mut n = Notification::new("o".into(), Severity::Info, "body");
        let start = Instant::now();
        assert_eq!(n.opacity(start), 0.0);

        n.mark_shown(start);
        let shown = start + Duration::from_millis(TRANSITION_MS);
        assert_eq!(n.opacity(shown), 1.0);

        n.mark_exiting(shown, Exit::Slide);
        assert_eq!(n.opacity(shown), 1.0);
        assert_eq!(n.opacity(shown + Exit::Slide.grace()), 0.0);
    }

    #[test]
    fn exit_ramp_starts_from_current_opacity() {
        let start = Instant::now();

        let mut entering = Notification::new("e".into(), Severity::Info, "body");
        entering.mark_exiting(start, Exit::Slide);
        assert_eq!(entering.opacity(start), 0.0);
        assert_eq!(entering.opacity(start + Duration::from_millis(100)), 0.0);

        let mut half = Notification::new("h".into(), Severity::Info, "body");
        half.mark_shown(start);
        let removed = start + Duration::from_millis(TRANSITION_MS / 2);
        half.mark_exiting(removed, Exit::Slide);
        let at_removal = half.opacity(removed);
        assert!((at_removal - 0.5).abs() < 0.01);
        assert!(half.opacity(removed + Duration::from_millis(10)) <= at_removal);
    }

    #[test]
    fn fade_exit_outlasts_slide_exit() {
        assert!(Exit::Fade.grace() > Exit::Slide.grace());
    }
}
