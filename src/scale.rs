//! Scales map data values into pixel coordinates.
//!
//! `LinearScale` follows the usual charting conventions: a continuous
//! domain mapped onto a pixel range, optionally expanded to "nice" round
//! bounds. `BandScale` and `PointScale` place discrete keys along an axis.

/// Default number of ticks an axis aims for.
pub const DEFAULT_TICKS: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Min and max of the finite values; `None` when there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// A 1-2-5 step that splits `[start, stop]` into roughly `count` intervals.
/// Returns `0.0` when no sensible step exists.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Snap `value` to a multiple of `step`. Fractional steps go through their
/// inverse so that e.g. 0.1 steps land on exact decimals.
fn snap(value: f64, step: f64, round: fn(f64) -> f64) -> f64 {
    if step < 1.0 {
        let inv = (1.0 / step).round();
        round(value * inv) / inv
    } else {
        round(value / step) * step
    }
}

// ---------------------------------------------------------------------------
// LinearScale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the finite extent of `values`, or `[0, 1]` when there is
    /// nothing to measure.
    pub fn from_values<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::new(extent(values).unwrap_or((0.0, 1.0)), range)
    }

    /// Map a domain value to the range. A collapsed domain maps everything
    /// to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / (d1 - d0);
        r0 * (1.0 - t) + r1 * t
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return (d0 + d1) / 2.0;
        }
        let t = (pixel - r0) / (r1 - r0);
        d0 * (1.0 - t) + d1 * t
    }

    /// Expand the domain outward to round bounds.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };

        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == 0.0 || prestep == Some(step) {
                break;
            }
            start = snap(start, step, f64::floor);
            stop = snap(stop, step, f64::ceil);
            prestep = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if lo == hi {
            return vec![lo];
        }
        let step = tick_increment(lo, hi, count);
        if step == 0.0 {
            return Vec::new();
        }
        let inverse = (step < 1.0).then(|| (1.0 / step).round());
        let (first, last) = match inverse {
            Some(inv) => ((lo * inv).ceil(), (hi * inv).floor()),
            None => ((lo / step).ceil(), (hi / step).floor()),
        };
        let n = (last - first).max(-1.0) as i64 + 1;
        (0..n)
            .map(|i| {
                let k = first + i as f64;
                match inverse {
                    Some(inv) => k / inv,
                    None => k * step,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// BandScale / PointScale
// ---------------------------------------------------------------------------

/// Evenly spaced bands, one per key.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    step: f64,
    start: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Bands with the same inner and outer padding, centred in the range.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self::with_padding(domain, range, padding, padding)
    }

    fn with_padding(domain: Vec<String>, range: (f64, f64), inner: f64, outer: f64) -> Self {
        let n = domain.len() as f64;
        let (lo, hi) = range;
        let step = (hi - lo) / (n - inner + outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - inner)) * 0.5;
        BandScale {
            domain,
            range,
            step,
            start,
            bandwidth: step * (1.0 - inner),
        }
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Discrete positions: the first key at the start of the range, the last at
/// the end, the rest evenly between.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale(BandScale);

impl PointScale {
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        PointScale(BandScale::with_padding(domain, range, 1.0, 0.0))
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.0.position(key)
    }
}

/// Tick label text: integers without decimals, others with at most two.
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_ignores_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent([f64::NAN]), None);
        assert_eq!(extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn linear_maps_domain_ends_to_range_ends() {
        let s = LinearScale::new((10.0, 90.0), (60.0, 480.0));
        assert_eq!(s.apply(10.0), 60.0);
        assert_eq!(s.apply(90.0), 480.0);
        assert_eq!(s.apply(50.0), 270.0);

        let inverted = LinearScale::new((0.0, 120.0), (320.0, 20.0));
        assert_eq!(inverted.apply(0.0), 320.0);
        assert_eq!(inverted.apply(120.0), 20.0);
        assert_eq!(inverted.invert(20.0), 120.0);
    }

    #[test]
    fn collapsed_domain_maps_to_midpoint() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.apply(5.0), 50.0);
        assert_eq!(s.nice(10).domain, (5.0, 5.0));
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.0, 112.0), (0.0, 1.0)).nice(DEFAULT_TICKS);
        assert_eq!(s.domain, (0.0, 120.0));
        let s = LinearScale::new((10.0, 90.0), (0.0, 1.0)).nice(DEFAULT_TICKS);
        assert_eq!(s.domain, (10.0, 90.0));
        let s = LinearScale::new((5.0, 230.0), (0.0, 1.0)).nice(DEFAULT_TICKS);
        assert_eq!(s.domain, (0.0, 240.0));
        let s = LinearScale::new((0.13, 0.87), (0.0, 1.0)).nice(DEFAULT_TICKS);
        assert_eq!(s.domain, (0.1, 0.9));
    }

    #[test]
    fn ticks_are_round_steps_inside_domain() {
        let s = LinearScale::new((0.0, 120.0), (0.0, 1.0));
        assert_eq!(
            s.ticks(10),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0]
        );
        assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]);
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(s.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn band_scale_matches_padding_layout() {
        let keys: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let band = BandScale::new(keys, (0.0, 310.0), 0.1);
        // step = 310 / (3 - 0.1 + 0.2) = 100
        assert!((band.bandwidth() - 90.0).abs() < 1e-9);
        assert!((band.position("a").unwrap() - 10.0).abs() < 1e-9);
        assert!((band.position("c").unwrap() - 210.0).abs() < 1e-9);
        assert_eq!(band.position("z"), None);
    }

    #[test]
    fn point_scale_spans_range() {
        let dims: Vec<String> = ["HP", "Attack", "Defense", "Speed"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let points = PointScale::new(dims, (10.0, 790.0));
        assert_eq!(points.position("HP"), Some(10.0));
        assert_eq!(points.position("Speed"), Some(790.0));
        assert_eq!(points.position("Attack"), Some(270.0));

        let single = PointScale::new(vec!["HP".into()], (0.0, 100.0));
        assert_eq!(single.position("HP"), Some(50.0));
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(40.0), "40");
        assert_eq!(format_tick(-5.0), "-5");
        assert_eq!(format_tick(0.2), "0.2");
        assert_eq!(format_tick(1.25), "1.25");
    }
}
