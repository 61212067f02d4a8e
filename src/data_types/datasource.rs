use glam::DVec2;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

use super::data::{CorridorSample, CurvePoint, Sample, SeriesHints};
use super::geometry::{DataRect, Interval, Orientation};
use super::state::ChangeSignal;

/// A series shared between the application and the items displaying it.
pub type SharedSeries<D> = Arc<RwLock<D>>;

/// Creates a [`SharedSeries`] from a series value.
pub fn shared<D: SeriesData>(data: D) -> SharedSeries<D> {
    Arc::new(RwLock::new(data))
}

/// Lazily computed bounding rectangle, keyed by the series version.
///
/// A stored rectangle is only returned while the version it was computed for
/// is still current, so bumping the version is enough to invalidate it.
#[derive(Debug, Default)]
pub struct BoundsCache {
    slot: Mutex<Option<(u64, Option<DataRect>)>>,
    computations: AtomicU64,
}

impl BoundsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        version: u64,
        compute: impl FnOnce() -> Option<DataRect>,
    ) -> Option<DataRect> {
        let mut slot = self.slot.lock();
        if let Some((cached_version, rect)) = *slot {
            if cached_version == version {
                return rect;
            }
        }
        let rect = compute();
        self.computations.fetch_add(1, Ordering::Relaxed);
        *slot = Some((version, rect));
        rect
    }

    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    /// How many times the rectangle was actually computed.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }
}

impl Clone for BoundsCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// Sampled series as seen by items and the renderer.
///
/// `hints` are trusted: claiming a monotonic order the samples do not have
/// yields wrong (but finite) answers from the binary searches and the
/// bounding rectangle fast paths.
pub trait SeriesData: Send + Sync {
    type Sample: Sample;

    fn count(&self) -> usize;

    /// Sample at `index`, valid for `index < count()`.
    fn sample_at(&self, index: usize) -> Self::Sample;

    fn hints(&self) -> SeriesHints;

    /// Bumped on every mutation of the samples or hints.
    fn version(&self) -> u64;

    fn bounds_cache(&self) -> &BoundsCache;

    /// Registers a signal raised on every later mutation.
    fn observe(&mut self, _signal: &Arc<ChangeSignal>) {}

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Bounding rectangle of all samples, `None` for an empty series.
    fn bounding_rect(&self) -> Option<DataRect> {
        self.bounds_cache()
            .get_or_compute(self.version(), || compute_bounding_rect(self))
    }

    /// Index of the first sample whose coordinate is greater than `value`.
    ///
    /// Returns `None` for an empty series or when `value` lies beyond the
    /// last sample. A `value` equal to the last coordinate yields the last
    /// index. Requires the series to be monotonic along `orientation`.
    fn upper_index(&self, orientation: Orientation, value: f64) -> Option<usize> {
        let count = self.count();
        if count == 0 || value.is_nan() {
            return None;
        }
        let last = self.sample_at(count - 1).coordinate(orientation);
        if value > last {
            return None;
        }
        if value == last {
            return Some(count - 1);
        }

        let mut low = 0;
        let mut high = count;
        while low < high {
            let mid = low + (high - low) / 2;
            if value < self.sample_at(mid).coordinate(orientation) {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        Some(low)
    }

    /// Sample linearly interpolated at `value` along `orientation`.
    ///
    /// The bracket is always the pair `[i, i + 1]` left of the upper index,
    /// falling back to the first segment, so values before the first sample
    /// are extrapolated from it.
    fn interpolated(&self, orientation: Orientation, value: f64) -> Self::Sample {
        match self.count() {
            0 => Self::Sample::default(),
            1 => Self::Sample::default().with_coordinate(orientation, value),
            _ => {
                let index = match self.upper_index(orientation, value) {
                    Some(i) if i > 0 => i - 1,
                    _ => 0,
                };
                interpolate_segment(self, orientation, index, value)
            }
        }
    }

    /// Index of the sample closest to `value`, found by binary search.
    fn nearest_index(&self, orientation: Orientation, value: f64) -> Option<usize> {
        let count = self.count();
        if count == 0 || value.is_nan() {
            return None;
        }
        let upper = self.upper_index(orientation, value).unwrap_or(count - 1);
        if upper == 0 {
            return Some(0);
        }
        let before = self.sample_at(upper - 1).coordinate(orientation);
        let after = self.sample_at(upper).coordinate(orientation);
        if (value - before).abs() <= (after - value).abs() {
            Some(upper - 1)
        } else {
            Some(upper)
        }
    }
}

/// Interpolation helpers for point series.
pub trait CurveSeries: SeriesData<Sample = CurvePoint> {
    fn interpolated_point(&self, orientation: Orientation, value: f64) -> CurvePoint {
        self.interpolated(orientation, value)
    }
}

impl<T: SeriesData<Sample = CurvePoint> + ?Sized> CurveSeries for T {}

/// Interpolation helpers for corridor series.
pub trait CorridorSeries: SeriesData<Sample = CorridorSample> {
    fn interpolated_sample(&self, value: f64) -> CorridorSample {
        self.interpolated(Orientation::Horizontal, value)
    }
}

impl<T: SeriesData<Sample = CorridorSample> + ?Sized> CorridorSeries for T {}

/// Interpolates at `value` on the segment `[index, index + 1]`.
///
/// A zero-length segment yields its right sample instead of dividing by zero.
pub fn interpolate_segment<D: SeriesData + ?Sized>(
    data: &D,
    orientation: Orientation,
    index: usize,
    value: f64,
) -> D::Sample {
    let s1 = data.sample_at(index);
    let s2 = data.sample_at(index + 1);
    let c1 = s1.coordinate(orientation);
    let c2 = s2.coordinate(orientation);
    if c2 - c1 == 0.0 {
        return s2;
    }
    let t = (value - c1) / (c2 - c1);
    s1.interpolate(&s2, t).with_coordinate(orientation, value)
}

/// Picks the cheapest bounding strategy the hints allow.
///
/// A sorted axis only counts when samples are points along it; a corridor
/// sorted by its lower bound still scans for the upper one.
pub fn compute_bounding_rect<D: SeriesData + ?Sized>(data: &D) -> Option<DataRect> {
    let count = data.count();
    if count == 0 {
        return None;
    }
    let hints = data.hints();
    let sorted = |orientation| {
        hints.is_monotonic(orientation) && <D::Sample as Sample>::is_point_along(orientation)
    };
    let rect = match (sorted(Orientation::Horizontal), sorted(Orientation::Vertical)) {
        (true, true) => {
            trace!(count, "bounding rect from endpoints");
            endpoints_rect(data)
        }
        (true, false) => sorted_axis_rect(data, Orientation::Horizontal),
        (false, true) => sorted_axis_rect(data, Orientation::Vertical),
        (false, false) => {
            trace!(count, "bounding rect from full scan");
            scan_rect(data)
        }
    };
    Some(rect)
}

fn endpoints_rect<D: SeriesData + ?Sized>(data: &D) -> DataRect {
    let first = data.sample_at(0).extent();
    let last = data.sample_at(data.count() - 1).extent();
    first.united(&last)
}

/// Takes the sorted axis from the endpoints and scans the other one.
fn sorted_axis_rect<D: SeriesData + ?Sized>(data: &D, sorted: Orientation) -> DataRect {
    let scanned = match sorted {
        Orientation::Horizontal => Orientation::Vertical,
        Orientation::Vertical => Orientation::Horizontal,
    };
    trace!(count = data.count(), ?sorted, "bounding rect from endpoints and one scan");

    let mut other = Interval::inverted_infinite();
    for i in 0..data.count() {
        let extent = data.sample_at(i).extent().interval(scanned);
        other.extend_to(extent.lower);
        other.extend_to(extent.upper);
    }

    let mut rect = endpoints_rect(data);
    *rect.interval_mut(scanned) = other;
    rect
}

fn scan_rect<D: SeriesData + ?Sized>(data: &D) -> DataRect {
    let mut rect = data.sample_at(0).extent();
    for i in 1..data.count() {
        rect = rect.united(&data.sample_at(i).extent());
    }
    rect
}

/// Array backed series, the default [`SeriesData`] implementation.
#[derive(Debug, Clone, Default)]
pub struct VecSeriesData<S: Sample> {
    samples: Vec<S>,
    hints: SeriesHints,
    version: u64,
    cache: BoundsCache,
    observers: Vec<Weak<ChangeSignal>>,
}

pub type CurveData = VecSeriesData<CurvePoint>;
pub type CorridorData = VecSeriesData<CorridorSample>;

impl<S: Sample> VecSeriesData<S> {
    pub fn new(samples: Vec<S>) -> Self {
        Self {
            samples,
            hints: SeriesHints::NONE,
            version: 0,
            cache: BoundsCache::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints: SeriesHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    pub fn set_hints(&mut self, hints: SeriesHints) {
        if self.hints != hints {
            self.hints = hints;
            self.changed();
        }
    }

    /// Replaces all samples.
    pub fn set_samples(&mut self, samples: Vec<S>) {
        self.samples = samples;
        self.changed();
    }

    pub fn push(&mut self, sample: S) {
        self.samples.push(sample);
        self.changed();
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = S>) {
        self.samples.extend(samples);
        self.changed();
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.changed();
    }

    fn changed(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache.invalidate();
        self.observers.retain(|observer| match observer.upgrade() {
            Some(signal) => {
                signal.notify();
                true
            }
            None => false,
        });
    }
}

impl CurveData {
    /// Builds a curve from parallel coordinate slices, truncated to the shorter one.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(xs.iter().zip(ys).map(|(&x, &y)| DVec2::new(x, y)).collect())
    }
}

impl<S: Sample> SeriesData for VecSeriesData<S> {
    type Sample = S;

    fn count(&self) -> usize {
        self.samples.len()
    }

    fn sample_at(&self, index: usize) -> S {
        self.samples[index]
    }

    fn hints(&self) -> SeriesHints {
        self.hints
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn bounds_cache(&self) -> &BoundsCache {
        &self.cache
    }

    fn observe(&mut self, signal: &Arc<ChangeSignal>) {
        let already = self
            .observers
            .iter()
            .any(|observer| observer.upgrade().is_some_and(|s| Arc::ptr_eq(&s, signal)));
        if !already {
            self.observers.push(Arc::downgrade(signal));
        }
    }
}
