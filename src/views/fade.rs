/// Length of an opacity transition, in seconds.
pub const FADE_SECONDS: f64 = 0.2;

fn cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Per-mark opacity animating from one set of values to another.
///
/// Times are seconds on any monotonic clock; the UI passes egui's input time.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityFade {
    from: Vec<f64>,
    to: Vec<f64>,
    started: f64,
    ends: f64,
}

impl OpacityFade {
    /// `n` marks resting at `opacity`.
    pub fn settled(n: usize, opacity: f64) -> Self {
        OpacityFade {
            from: vec![opacity; n],
            to: vec![opacity; n],
            started: f64::NEG_INFINITY,
            ends: f64::NEG_INFINITY,
        }
    }

    /// Start animating toward `targets` from whatever is shown at `now`.
    pub fn retarget(&mut self, targets: Vec<f64>, now: f64) {
        let current = self.sample(now);
        self.from = if current.len() == targets.len() {
            current
        } else {
            targets.clone()
        };
        self.to = targets;
        self.started = now;
        self.ends = now + FADE_SECONDS;
    }

    #[cfg(test)]
    pub fn targets(&self) -> &[f64] {
        &self.to
    }

    pub fn is_settled(&self, now: f64) -> bool {
        now >= self.ends
    }

    /// Opacities shown at `now`.
    pub fn sample(&self, now: f64) -> Vec<f64> {
        if self.is_settled(now) {
            return self.to.clone();
        }
        let t = ((now - self.started) / FADE_SECONDS).clamp(0.0, 1.0);
        let e = cubic_in_out(t);
        self.from
            .iter()
            .zip(&self.to)
            .map(|(a, b)| a + (b - a) * e)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(0.5), 0.5);
        assert_eq!(cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn fade_interpolates_then_settles() {
        let mut fade = OpacityFade::settled(2, 0.6);
        assert!(fade.is_settled(0.0));

        fade.retarget(vec![1.0, 0.1], 10.0);
        assert!(!fade.is_settled(10.05));
        assert_eq!(fade.sample(10.0), vec![0.6, 0.6]);

        let mid = fade.sample(10.0 + FADE_SECONDS / 2.0);
        assert!((mid[0] - 0.8).abs() < 1e-9);
        assert!((mid[1] - 0.35).abs() < 1e-9);

        assert!(fade.is_settled(10.0 + FADE_SECONDS));
        assert_eq!(fade.sample(11.0), vec![1.0, 0.1]);
    }

    #[test]
    fn end_frame_shows_exact_targets() {
        let mut fade = OpacityFade::settled(2, 0.6);
        fade.retarget(vec![1.0, 0.1], 10.0);
        let end = 10.0 + FADE_SECONDS;
        assert!(fade.is_settled(end));
        assert_eq!(fade.sample(end), vec![1.0, 0.1]);
        assert!(!fade.is_settled(end - 1e-6));
    }

    #[test]
    fn retarget_mid_flight_starts_from_shown_values() {
        let mut fade = OpacityFade::settled(1, 0.6);
        fade.retarget(vec![1.0], 0.0);
        let shown = fade.sample(0.1)[0];
        fade.retarget(vec![0.1], 0.1);
        assert!((fade.sample(0.1)[0] - shown).abs() < 1e-12);
    }
}
