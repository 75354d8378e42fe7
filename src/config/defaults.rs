// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the notifier. Constants are organized by category.
//!
//! # Categories
//!
//! - **Lifetime**: Default auto-dismiss duration and its bounds
//! - **Capacity**: Maximum number of concurrently visible notifications
//! - **Transitions**: Enter/exit animation timings
//! - **Permission countdown**: Urgency thresholds for the waiting-permission toast

// ==========================================================================
// Lifetime Defaults
// ==========================================================================

/// Default auto-dismiss duration for notifications (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Minimum configurable default duration (in milliseconds).
pub const MIN_DURATION_MS: u64 = 1000;

/// Maximum configurable default duration (in milliseconds).
pub const MAX_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default number of notifications visible at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

/// Minimum number of concurrently visible notifications.
pub const MIN_MAX_CONCURRENT: usize = 1;

/// Maximum number of concurrently visible notifications.
pub const MAX_MAX_CONCURRENT: usize = 10;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Delay before a freshly rendered toast starts its enter transition.
pub const ENTER_DELAY_MS: u64 = 10;

/// Length of the enter and slide-out transitions.
pub const TRANSITION_MS: u64 = 300;

/// Length of the fade used when the waiting-permission toast is hidden.
/// It runs before the regular slide-out.
pub const HIDE_FADE_MS: u64 = 300;

// ==========================================================================
// Permission Countdown Defaults
// ==========================================================================

/// Default browser permission timeout (in seconds).
pub const DEFAULT_PERMISSION_TIMEOUT_SECS: u32 = 30;

/// Remaining seconds at which the countdown turns amber.
pub const COUNTDOWN_WARNING_SECS: u32 = 20;

/// Remaining seconds at which the countdown turns red and blinks.
pub const COUNTDOWN_CRITICAL_SECS: u32 = 10;

/// Half-period of the critical countdown blink (in milliseconds).
pub const COUNTDOWN_BLINK_MS: u64 = 250;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Lifetime validation
    assert!(MIN_DURATION_MS > 0);
    assert!(MAX_DURATION_MS >= MIN_DURATION_MS);
    assert!(DEFAULT_DURATION_MS >= MIN_DURATION_MS);
    assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);

    // Capacity validation
    assert!(MIN_MAX_CONCURRENT > 0);
    assert!(MAX_MAX_CONCURRENT >= MIN_MAX_CONCURRENT);
    assert!(DEFAULT_MAX_CONCURRENT >= MIN_MAX_CONCURRENT);
    assert!(DEFAULT_MAX_CONCURRENT <= MAX_MAX_CONCURRENT);

    // Transition validation
    assert!(ENTER_DELAY_MS < TRANSITION_MS);
    assert!(TRANSITION_MS < MIN_DURATION_MS);

    // Countdown validation
    assert!(COUNTDOWN_CRITICAL_SECS < COUNTDOWN_WARNING_SECS);
    assert!(COUNTDOWN_WARNING_SECS < DEFAULT_PERMISSION_TIMEOUT_SECS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_are_valid() {
        assert_eq!(DEFAULT_DURATION_MS, 5000);
        assert!(DEFAULT_DURATION_MS >= MIN_DURATION_MS);
        assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);
    }

    #[test]
    fn capacity_defaults_are_valid() {
        assert_eq!(DEFAULT_MAX_CONCURRENT, 3);
        assert!(DEFAULT_MAX_CONCURRENT >= MIN_MAX_CONCURRENT);
        assert!(DEFAULT_MAX_CONCURRENT <= MAX_MAX_CONCURRENT);
    }

    #[test]
    fn countdown_thresholds_are_ordered() {
        assert_eq!(COUNTDOWN_WARNING_SECS, 20);
        assert_eq!(COUNTDOWN_CRITICAL_SECS, 10);
        assert!(DEFAULT_PERMISSION_TIMEOUT_SECS > COUNTDOWN_WARNING_SECS);
    }
}
