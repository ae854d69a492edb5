//! Linear scales and "nice" tick placement.

/// Maps a data interval onto a pixel interval. Values outside the domain
/// map outside the range; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Roughly `count` round-valued ticks inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        ticks(lo, hi, count)
    }
}

/// Steps are 1, 2 or 5 times a power of ten.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    // Negative inc means "divide by |inc|"; keeps fractional ticks exact.
    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if i2 < i1 {
        return None;
    }
    Some((i1 as i64, i2 as i64, inc))
}

pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    (i1..=i2)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect()
}

/// Spacing between the ticks [`ticks`] would return.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    match tick_spec(start, stop, count.max(1) as f64) {
        Some((_, _, inc)) if inc < 0.0 => 1.0 / -inc,
        Some((_, _, inc)) => inc,
        None => 0.0,
    }
}

/// Fixed-decimal label with just enough precision for `step`.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    // Avoid "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
