//! Clip regions, translations, and their CSS forms.
//!
//! Percent rectangles are the source of truth. A clip region is either a
//! four-point polygon in percent (for environments with CSS shape clipping)
//! or an edge-ordered pixel rectangle derived from the same percentages.
//!
//! # Example
//!
//! ```
//! use fragmentfx::{ClipRegion, ClipSupport, ContainerSize, PercentRect};
//!
//! let area = PercentRect::new(10.0, 10.0, 50.0, 50.0);
//! let container = ContainerSize::new(400.0, 300.0);
//!
//! let clip = ClipRegion::resolve(&area, container, ClipSupport::Polygon);
//! assert_eq!(clip.to_string(), "polygon(10% 10%, 60% 10%, 60% 60%, 10% 60%)");
//!
//! let clip = ClipRegion::resolve(&area, container, ClipSupport::RectOnly);
//! assert_eq!(clip.to_string(), "rect(30px,240px,180px,40px)");
//! ```

use core::fmt;

/// Container dimensions in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ContainerSize {
    /// Create a new container size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Closed interval `[min, max]`.
///
/// Bounds are not required to be ordered; a reversed interval still
/// describes the values between its two ends. A bound missing from
/// deserialized options is NaN, and draws from it are NaN.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Interval {
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub min: f64,
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub max: f64,
}

impl Interval {
    /// Create a new interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower end, whichever bound is smaller.
    pub fn low(&self) -> f64 {
        if self.min <= self.max { self.min } else { self.max }
    }

    /// Upper end, whichever bound is larger.
    pub fn high(&self) -> f64 {
        if self.min <= self.max { self.max } else { self.min }
    }

    /// Whether `value` lies between the two bounds (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low() && value <= self.high()
    }

    /// Whether `min > max`.
    pub fn is_reversed(&self) -> bool {
        self.min > self.max
    }

    /// Whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Rectangle in percent of the container.
///
/// `top` and `height` are relative to container height, `left` and `width`
/// to container width. Fields missing from deserialized options are NaN,
/// which renders as an invalid (ignored) clip.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PercentRect {
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub top: f64,
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub left: f64,
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub width: f64,
    #[cfg_attr(feature = "serde", serde(default = "missing"))]
    pub height: f64,
}

impl PercentRect {
    /// Zero-area rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rect (CSS-ish argument order: top, left, width, height).
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge in percent.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge in percent.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether every field is finite.
    pub fn is_finite(&self) -> bool {
        [self.top, self.left, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Corner points, clockwise from top-left.
    pub fn quad(&self) -> Quad {
        Quad([
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ])
    }

    /// Resolve to pixel edges for a container.
    pub fn to_pixels(&self, container: ContainerSize) -> PixelRect {
        let top = self.top / 100.0 * container.height;
        let left = self.left / 100.0 * container.width;
        PixelRect {
            top,
            right: self.width / 100.0 * container.width + left,
            bottom: self.height / 100.0 * container.height + top,
            left,
        }
    }
}

/// 2D point. Units depend on context (percent in polygons, pixels elsewhere).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Four polygon points in percent, clockwise from top-left.
///
/// Displays as a CSS point list: `10% 10%, 60% 10%, 60% 60%, 10% 60%`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Axis-aligned bounding box in percent.
    pub fn bounds(&self) -> PercentRect {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.0 {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        PercentRect::new(min_y, min_x, max_x - min_x, max_y - min_y)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}% {}%", css_number(p.x), css_number(p.y))?;
        }
        Ok(())
    }
}

/// Pixel rectangle by edges, in CSS `rect()` order (top, right, bottom, left).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PixelRect {
    /// Convert back to percent of a container.
    ///
    /// Zero container dimensions produce non-finite values.
    pub fn to_percent(&self, container: ContainerSize) -> PercentRect {
        PercentRect {
            top: self.top / container.height * 100.0,
            left: self.left / container.width * 100.0,
            width: (self.right - self.left) / container.width * 100.0,
            height: (self.bottom - self.top) / container.height * 100.0,
        }
    }
}

/// Which clip syntax the rendering environment understands.
///
/// Probed once per environment and injected into the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipSupport {
    /// `clip-path: polygon(...)` works (possibly vendor-prefixed).
    #[default]
    Polygon,
    /// Only the legacy `clip: rect(...)` property is available.
    RectOnly,
}

/// Visible sub-area of a fragment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClipRegion {
    /// Polygon in percent of the container.
    Polygon(Quad),
    /// Rectangle in container pixels.
    Rect(PixelRect),
}

impl ClipRegion {
    /// Clip region for `area` in the form `support` calls for.
    ///
    /// Pure: identical inputs give identical output.
    pub fn resolve(area: &PercentRect, container: ContainerSize, support: ClipSupport) -> Self {
        match support {
            ClipSupport::Polygon => Self::Polygon(area.quad()),
            ClipSupport::RectOnly => Self::Rect(area.to_pixels(container)),
        }
    }

    /// CSS property this region is written to.
    pub fn css_property(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "clip-path",
            Self::Rect(_) => "clip",
        }
    }

    /// Logical region in percent of `container`, whichever form it is in.
    pub fn percent_bounds(&self, container: ContainerSize) -> PercentRect {
        match self {
            Self::Polygon(quad) => quad.bounds(),
            Self::Rect(rect) => rect.to_percent(container),
        }
    }

    /// Logical region in container pixels, whichever form it is in.
    pub fn pixel_bounds(&self, container: ContainerSize) -> PixelRect {
        match self {
            Self::Polygon(quad) => quad.bounds().to_pixels(container),
            Self::Rect(rect) => *rect,
        }
    }
}

impl fmt::Display for ClipRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polygon(quad) => write!(f, "polygon({quad})"),
            Self::Rect(r) => write!(
                f,
                "rect({}px,{}px,{}px,{}px)",
                css_number(r.top),
                css_number(r.right),
                css_number(r.bottom),
                css_number(r.left)
            ),
        }
    }
}

/// Pixel offset applied as a 3D translation.
///
/// Displays as `translate3d(Xpx,Ypx,0)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    /// No offset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new translation.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate3d({}px,{}px,0)",
            css_number(self.x),
            css_number(self.y)
        )
    }
}

/// Pixel slack added to a fragment's translation range, per side.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Boundaries {
    /// Extra room to the left.
    pub x1: f64,
    /// Extra room to the right.
    pub x2: f64,
    /// Extra room above.
    pub y1: f64,
    /// Extra room below.
    pub y2: f64,
}

impl Default for Boundaries {
    fn default() -> Self {
        Self {
            x1: 100.0,
            x2: 100.0,
            y1: 50.0,
            y2: 50.0,
        }
    }
}

/// Allowed translation per axis for one fragment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TranslationRange {
    pub x: Interval,
    pub y: Interval,
}

impl TranslationRange {
    /// Range that keeps `area` loosely inside the container grown by `boundaries`.
    ///
    /// On x: from `-left·W - x1` (piece pushed past the left edge) to
    /// `W - left·W + x2 - width·W` (piece pushed past the right edge).
    /// Same on y with top, height, `y1` and `y2`.
    pub fn for_area(area: &PercentRect, container: ContainerSize, boundaries: &Boundaries) -> Self {
        let (w, h) = (container.width, container.height);
        let left_px = area.left / 100.0 * w;
        let top_px = area.top / 100.0 * h;
        Self {
            x: Interval::new(
                -left_px - boundaries.x1,
                w - left_px + boundaries.x2 - area.width / 100.0 * w,
            ),
            y: Interval::new(
                -top_px - boundaries.y1,
                h - top_px + boundaries.y2 - area.height / 100.0 * h,
            ),
        }
    }

    /// Whether `t` lies inside the range on both axes.
    pub fn contains(&self, t: Translation) -> bool {
        self.x.contains(t.x) && self.y.contains(t.y)
    }
}

/// Value of a numeric option field that was left out.
#[cfg(feature = "serde")]
fn missing() -> f64 {
    f64::NAN
}

/// Normalize `-0.0` so CSS output never reads `-0px`.
fn css_number(v: f64) -> f64 {
    v + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const CONTAINER: ContainerSize = ContainerSize::new(400.0, 300.0);

    #[test]
    fn polygon_css_matches_percent_corners() {
        let area = PercentRect::new(10.0, 10.0, 50.0, 50.0);
        let clip = ClipRegion::resolve(&area, CONTAINER, ClipSupport::Polygon);
        assert_eq!(
            clip.to_string(),
            "polygon(10% 10%, 60% 10%, 60% 60%, 10% 60%)"
        );
        assert_eq!(clip.css_property(), "clip-path");
    }

    #[test]
    fn rect_fallback_in_edge_order() {
        // top = 10% of 300, left = 10% of 400, right = left + 50% of 400,
        // bottom = top + 50% of 300.
        let area = PercentRect::new(10.0, 10.0, 50.0, 50.0);
        let clip = ClipRegion::resolve(&area, CONTAINER, ClipSupport::RectOnly);
        assert_eq!(
            clip,
            ClipRegion::Rect(PixelRect {
                top: 30.0,
                right: 240.0,
                bottom: 180.0,
                left: 40.0,
            })
        );
        assert_eq!(clip.to_string(), "rect(30px,240px,180px,40px)");
        assert_eq!(clip.css_property(), "clip");
    }

    #[test]
    fn fractional_percentages_keep_precision() {
        let area = PercentRect::new(2.5, 0.0, 3.0, 1.05);
        let clip = ClipRegion::resolve(&area, CONTAINER, ClipSupport::Polygon);
        assert_eq!(
            clip.to_string(),
            "polygon(0% 2.5%, 3% 2.5%, 3% 3.55%, 0% 3.55%)"
        );
    }

    #[test]
    fn quad_bounds_roundtrip() {
        let area = PercentRect::new(80.0, 10.0, 3.0, 20.0);
        assert_eq!(area.quad().bounds(), area);
    }

    #[test]
    fn translation_css_has_no_negative_zero() {
        assert_eq!(Translation::ZERO.to_string(), "translate3d(0px,0px,0)");
        assert_eq!(
            Translation::new(-0.0, -0.0).to_string(),
            "translate3d(0px,0px,0)"
        );
        assert_eq!(
            Translation::new(-12.5, 40.0).to_string(),
            "translate3d(-12.5px,40px,0)"
        );
    }

    #[test]
    fn translation_range_is_asymmetric_around_piece() {
        let area = PercentRect::new(10.0, 10.0, 50.0, 50.0);
        let range = TranslationRange::for_area(&area, CONTAINER, &Boundaries::default());
        // x: -40 - 100 .. 400 - 40 + 100 - 200
        assert_eq!(range.x, Interval::new(-140.0, 260.0));
        // y: -30 - 50 .. 300 - 30 + 50 - 150
        assert_eq!(range.y, Interval::new(-80.0, 170.0));
    }

    #[test]
    fn reversed_interval_still_contains_between() {
        let i = Interval::new(5.0, -5.0);
        assert!(i.is_reversed());
        assert!(i.contains(0.0));
        assert!(!i.contains(6.0));
        assert_eq!(i.low(), -5.0);
        assert_eq!(i.high(), 5.0);
    }

    #[test]
    fn pixel_rect_back_to_percent() {
        let area = PercentRect::new(12.0, 33.0, 7.0, 41.0);
        let back = area.to_pixels(CONTAINER).to_percent(CONTAINER);
        assert!((back.top - area.top).abs() < 1e-9);
        assert!((back.left - area.left).abs() < 1e-9);
        assert!((back.width - area.width).abs() < 1e-9);
        assert!((back.height - area.height).abs() < 1e-9);
    }

    #[test]
    fn finiteness_checks() {
        assert!(PercentRect::new(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!PercentRect::new(1.0, f64::NAN, 3.0, 4.0).is_finite());
        assert!(Interval::new(0.0, 90.0).is_finite());
        assert!(!Interval::new(5.0, f64::NAN).is_finite());
    }
}
