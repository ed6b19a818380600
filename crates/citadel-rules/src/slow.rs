//! Slow-effect resolution.
//!
//! Overlapping slows keep the strongest reduction and the latest end time.
//! They never stack. Recovery is an explicit expiry check against `end_time`,
//! so a stale recovery can never lift a newer slow.

use citadel_core::components::{Mobility, SlowEffect};

/// Apply a slow of `percent` for `duration` seconds at sim time `now`.
pub fn apply_slow(
    mobility: &mut Mobility,
    slow: &mut SlowEffect,
    percent: f64,
    duration: f64,
    now: f64,
) {
    let percent = percent.clamp(0.0, 1.0);
    // An expired slow that recovery has not lifted yet no longer counts.
    let currently_slowed = slow.active && now < slow.end_time;
    let candidate_speed = (mobility.original_speed * (1.0 - percent)).floor();
    if !currently_slowed || candidate_speed < mobility.current_speed {
        mobility.current_speed = candidate_speed;
    }

    let candidate_end = now + duration;
    if !currently_slowed || candidate_end > slow.end_time {
        slow.end_time = candidate_end;
    }
    slow.active = true;
}

/// Restore original speed once `now` has reached the tracked end time.
/// Returns true if the slow was lifted.
pub fn tick_recovery(mobility: &mut Mobility, slow: &mut SlowEffect, now: f64) -> bool {
    if !slow.active || now < slow.end_time {
        return false;
    }
    slow.active = false;
    mobility.current_speed = mobility.original_speed;
    true
}
