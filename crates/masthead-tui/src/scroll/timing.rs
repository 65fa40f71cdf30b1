//! L4 Atomic Layer: time calculations against an explicit clock

use std::time::{Duration, Instant};

/// Animation progress in [0, 1] at `now`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_against_explicit_clock() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, start + Duration::from_millis(400), duration), 1.0);
        assert!(is_complete(start, start + duration, duration));
    }

    #[test]
    fn test_zero_duration_is_done() {
        let start = Instant::now();
        assert_eq!(progress(start, start, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(100.0, 300.0, 0.5), 200.0);
        assert_eq!(lerp(300.0, 100.0, 1.0), 100.0);
    }
}
