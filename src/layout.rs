//! Per-fragment geometry: area selection, clip region, scatter translation.
//!
//! All randomness comes from a caller-supplied [`Rng`], so layouts are
//! reproducible under a seeded generator and unseeded in the browser.

use rand::Rng;

use crate::config::{Area, FragmentsConfig, RandomIntervals};
use crate::geometry::{
    Boundaries, ClipRegion, ClipSupport, ContainerSize, Interval, PercentRect, Translation,
    TranslationRange,
};

/// Half-width of the band a pinned dimension is drawn from.
pub const PINNED_SPREAD: f64 = 0.1;
/// Smallest lower bound for a pinned dimension.
pub const PINNED_FLOOR: f64 = 0.1;

/// Computed placement of one fragment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FragmentGeometry {
    /// Area actually used, drawn or explicit, in percent.
    pub area: PercentRect,
    /// Visible region of the piece.
    pub clip: ClipRegion,
    /// Scatter offset of the piece in pixels.
    pub translation: Translation,
}

impl FragmentGeometry {
    /// Clip and scatter a known area.
    ///
    /// The clip is a pure function of `(area, container, support)`; only the
    /// translation consumes randomness.
    pub fn from_area<R: Rng + ?Sized>(
        area: PercentRect,
        container: ContainerSize,
        support: ClipSupport,
        boundaries: &Boundaries,
        rng: &mut R,
    ) -> Self {
        let range = TranslationRange::for_area(&area, container, boundaries);
        Self {
            area,
            clip: ClipRegion::resolve(&area, container, support),
            translation: draw_translation(&range, rng),
        }
    }
}

/// Geometry for fragment `index` under `config`.
///
/// Random areas are drawn fresh on every call. Explicit areas are looked up
/// by index; a missing entry lays out as [`PercentRect::ZERO`].
pub fn compute_fragment_geometry<R: Rng + ?Sized>(
    index: usize,
    config: &FragmentsConfig,
    container: ContainerSize,
    support: ClipSupport,
    rng: &mut R,
) -> FragmentGeometry {
    let area = resolve_area(index, &config.area, &config.random_intervals, rng);
    FragmentGeometry::from_area(area, container, support, &config.boundaries, rng)
}

/// Area for fragment `index`: drawn when random, looked up when explicit.
pub fn resolve_area<R: Rng + ?Sized>(
    index: usize,
    area: &Area,
    intervals: &RandomIntervals,
    rng: &mut R,
) -> PercentRect {
    match area {
        Area::Random => draw_area(intervals, rng),
        Area::Explicit(list) => list.get(index).copied().unwrap_or(PercentRect::ZERO),
        Area::Unrecognized(_) => PercentRect::ZERO,
    }
}

/// Draw a strip-shaped random area.
///
/// Position is uniform within the top/left ranges. A coin flip picks the free
/// axis: either width is free and height is pinned near `fixed_height`, or
/// height is free and width is pinned near `fixed_width`. The free axis is
/// drawn from the *width* range on both branches; the height policy only
/// contributes `fixed_width`.
pub fn draw_area<R: Rng + ?Sized>(intervals: &RandomIntervals, rng: &mut R) -> PercentRect {
    let top = uniform(rng, intervals.top);
    let left = uniform(rng, intervals.left);
    let dim = &intervals.dimension;

    let (width, height) = if rng.random_bool(0.5) {
        let width = uniform(rng, dim.width.range());
        let height = uniform(rng, pinned_interval(dim.width.fixed_height));
        (width, height)
    } else {
        let height = uniform(rng, dim.width.range());
        let width = uniform(rng, pinned_interval(dim.height.fixed_width));
        (width, height)
    };

    PercentRect {
        top,
        left,
        width,
        height,
    }
}

/// `[max(fixed - 0.1, 0.1), fixed + 0.1]`.
pub fn pinned_interval(fixed: f64) -> Interval {
    Interval::new(
        f64::max(fixed - PINNED_SPREAD, PINNED_FLOOR),
        fixed + PINNED_SPREAD,
    )
}

/// Draw a translation uniformly within `range`, axes independent.
pub fn draw_translation<R: Rng + ?Sized>(range: &TranslationRange, rng: &mut R) -> Translation {
    let x = uniform(rng, range.x);
    let y = uniform(rng, range.y);
    Translation { x, y }
}

/// Uniform draw between the interval's bounds.
///
/// Never panics: a reversed interval draws between its ends, an empty one
/// returns its single value.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, interval: Interval) -> f64 {
    let t: f64 = rng.random();
    let v = interval.min + t * (interval.max - interval.min);
    // Rounding can land one ulp outside; NaN passes through untouched.
    if v < interval.low() {
        interval.low()
    } else if v > interval.high() {
        interval.high()
    } else {
        v
    }
}
