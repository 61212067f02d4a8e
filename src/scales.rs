//! Tick generation and tick label formatting.

use crate::data_types::{AxisFormat, Interval, TickSet, TimeUnit};
use crate::utils::date_formatter::{determine_date_format, format_timestamp};

/// Turns an axis interval into tick positions.
pub trait Graduation: Send + Sync {
    fn graduate(&self, lower: f64, upper: f64, min_ticks: usize, max_ticks: usize) -> TickSet;
}

impl<F> Graduation for F
where
    F: Fn(f64, f64, usize, usize) -> TickSet + Send + Sync,
{
    fn graduate(&self, lower: f64, upper: f64, min_ticks: usize, max_ticks: usize) -> TickSet {
        self(lower, upper, min_ticks, max_ticks)
    }
}

/// Linear graduation with majors on 1/2/5 x 10^k steps.
///
/// Each major step is split into minor steps (10 for a mantissa of 1, 4 for 2,
/// 5 for 5); when the split is even the middle tick is a medium one.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearGraduation;

impl Graduation for LinearGraduation {
    fn graduate(&self, lower: f64, upper: f64, min_ticks: usize, max_ticks: usize) -> TickSet {
        let interval = Interval::new(lower, upper);
        let width = interval.width();
        if !interval.is_valid() || !width.is_finite() || width <= 0.0 {
            return TickSet::default();
        }
        let max_ticks = max_ticks.max(1);
        let min_ticks = min_ticks.clamp(1, max_ticks);

        let mut step = NiceStep::above(width / max_ticks as f64);
        for _ in 0..8 {
            if step.major_count(&interval) >= min_ticks {
                break;
            }
            step = step.smaller();
        }
        step.ticks(&interval)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct NiceStep {
    mantissa: u8,
    base: f64,
}

impl NiceStep {
    /// Smallest 1/2/5 step that is not below `ideal`.
    fn above(ideal: f64) -> Self {
        let exponent = ideal.log10().floor();
        let base = 10.0f64.powf(exponent);
        let rel = ideal / base;
        const EPS: f64 = 1e-9;

        if rel <= 1.0 + EPS {
            Self { mantissa: 1, base }
        } else if rel <= 2.0 + EPS {
            Self { mantissa: 2, base }
        } else if rel <= 5.0 + EPS {
            Self { mantissa: 5, base }
        } else {
            Self {
                mantissa: 1,
                base: base * 10.0,
            }
        }
    }

    fn smaller(self) -> Self {
        match self.mantissa {
            5 => Self { mantissa: 2, ..self },
            2 => Self { mantissa: 1, ..self },
            _ => Self {
                mantissa: 5,
                base: self.base / 10.0,
            },
        }
    }

    fn size(&self) -> f64 {
        self.mantissa as f64 * self.base
    }

    fn divisions(&self) -> i64 {
        match self.mantissa {
            1 => 10,
            2 => 4,
            _ => 5,
        }
    }

    fn major_count(&self, interval: &Interval) -> usize {
        let (first, last) = index_range(interval, self.size());
        (last - first + 1).max(0) as usize
    }

    fn ticks(&self, interval: &Interval) -> TickSet {
        let size = self.size();
        let divisions = self.divisions();
        let (first, last) = index_range(interval, size / divisions as f64);

        let mut ticks = TickSet::default();
        for m in first..=last {
            let value = snap(m as f64 * size / divisions as f64, size);
            let remainder = m.rem_euclid(divisions);
            if remainder == 0 {
                ticks.majors.push(value);
            } else if divisions % 2 == 0 && remainder == divisions / 2 {
                ticks.mediums.push(value);
            } else {
                ticks.minors.push(value);
            }
        }
        ticks
    }
}

fn index_range(interval: &Interval, step: f64) -> (i64, i64) {
    const EPS: f64 = 1e-9;
    let first = (interval.lower / step - EPS).ceil() as i64;
    let last = (interval.upper / step + EPS).floor() as i64;
    (first, last)
}

fn snap(value: f64, step: f64) -> f64 {
    if value.abs() < step * 1e-9 {
        0.0
    } else {
        value
    }
}

/// Formats a tick or probe value for display. `span` is the visible width of
/// the axis and selects the resolution of time labels.
pub fn format_tick(value: f64, span: f64, format: &AxisFormat) -> String {
    match format {
        AxisFormat::Time(unit) => {
            let span_sec = seconds(span.abs(), *unit);
            let fmt = determine_date_format(span_sec);
            return format_timestamp(value, fmt, *unit);
        }
        AxisFormat::Numeric => {
            // Values this large are almost always epoch timestamps.
            if value.abs() > 100_000_000_000.0 {
                let unit = if value.abs() > 3_000_000_000_000.0 {
                    TimeUnit::Milliseconds
                } else {
                    TimeUnit::Seconds
                };
                let fmt = determine_date_format(seconds(span.abs(), unit));
                return format_timestamp(value, fmt, unit);
            }
        }
    }

    if value.abs() < 0.001 && value.abs() > 0.0 {
        format!("{:.4}", value)
    } else if value.abs() > 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn seconds(span: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Seconds => span,
        TimeUnit::Milliseconds => span / 1000.0,
        TimeUnit::Microseconds => span / 1_000_000.0,
        TimeUnit::Nanoseconds => span / 1_000_000_000.0,
    }
}
