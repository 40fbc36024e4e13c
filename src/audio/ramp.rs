//! Rate ramp: playback speed as a function of progress through the track.

/// Duration usable as a divisor: known, finite and positive.
pub fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Playback rate for `current_time` into a track of `duration` seconds.
///
/// Grows linearly from `1.0` at the start to `1.0 + increase` at the end.
/// Returns `None` while the duration is unknown or zero, in which case the
/// current rate should be left alone.
pub fn playback_rate(current_time: f64, duration: Option<f64>, increase: f64) -> Option<f64> {
    let duration = known_duration(duration)?;
    let progress = if current_time.is_finite() {
        (current_time / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Some(1.0 + progress * increase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_one_at_start_and_one_plus_increase_at_end() {
        assert_eq!(playback_rate(0.0, Some(200.0), 1.0), Some(1.0));
        assert_eq!(playback_rate(200.0, Some(200.0), 1.0), Some(2.0));
        assert_eq!(playback_rate(100.0, Some(200.0), 1.0), Some(1.5));
        assert_eq!(playback_rate(200.0, Some(200.0), 0.25), Some(1.25));
    }

    #[test]
    fn rate_is_monotonic_in_current_time() {
        let duration = Some(183.0);
        let mut last = 0.0;
        for step in 0..=183 {
            let rate = playback_rate(step as f64, duration, 1.0).unwrap();
            assert!(rate >= last, "rate dropped at {step}s");
            assert!((1.0..=2.0).contains(&rate));
            last = rate;
        }
    }

    #[test]
    fn unknown_or_zero_duration_leaves_rate_alone() {
        assert_eq!(playback_rate(10.0, None, 1.0), None);
        assert_eq!(playback_rate(10.0, Some(0.0), 1.0), None);
        assert_eq!(playback_rate(10.0, Some(f64::NAN), 1.0), None);
        assert_eq!(playback_rate(10.0, Some(f64::INFINITY), 1.0), None);
    }

    #[test]
    fn progress_outside_the_track_is_clamped() {
        assert_eq!(playback_rate(-5.0, Some(60.0), 1.0), Some(1.0));
        assert_eq!(playback_rate(75.0, Some(60.0), 1.0), Some(2.0));
    }
}
