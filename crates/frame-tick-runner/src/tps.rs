//! Frame rate tracking.

/// Frames per second smoothed with exponential moving averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TpsTracker {
    /// 5-second smoothing
    pub tps_5s: f32,
    /// 15-second smoothing
    pub tps_15s: f32,
    /// 1-minute smoothing
    pub tps_1m: f32,
}

impl TpsTracker {
    /// Instantaneous rates above this are clamped (near-zero deltas).
    const MAX_INSTANT: f32 = 1000.0;

    /// Start all averages at `expected` frames per second.
    #[must_use]
    pub const fn new(expected: f32) -> Self {
        Self {
            tps_5s: expected,
            tps_15s: expected,
            tps_1m: expected,
        }
    }

    /// Fold one frame delta into the averages. Non-positive deltas are ignored.
    pub fn update(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }

        let instant = (1.0 / delta_time).min(Self::MAX_INSTANT);

        self.tps_5s += smoothing(delta_time, 5.0) * (instant - self.tps_5s);
        self.tps_15s += smoothing(delta_time, 15.0) * (instant - self.tps_15s);
        self.tps_1m += smoothing(delta_time, 60.0) * (instant - self.tps_1m);
    }
}

fn smoothing(delta_time: f32, window: f32) -> f32 {
    1.0 - (-delta_time / window).exp()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_steady_rate_stays_put() {
        let mut tps = TpsTracker::new(20.0);
        for _ in 0..100 {
            tps.update(0.05);
        }
        assert!((tps.tps_5s - 20.0).abs() < 1e-3);
        assert!((tps.tps_1m - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_window_reacts_faster() {
        let mut tps = TpsTracker::new(60.0);
        for _ in 0..30 {
            tps.update(0.1);
        }
        assert!(tps.tps_5s < tps.tps_15s);
        assert!(tps.tps_15s < tps.tps_1m);
        assert!(tps.tps_1m < 60.0);
    }

    #[test]
    fn test_ignores_non_positive_delta() {
        let mut tps = TpsTracker::new(60.0);
        tps.update(0.0);
        tps.update(-1.0);
        assert_eq!(tps, TpsTracker::new(60.0));
    }
}
