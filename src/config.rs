//! Widget configuration with documented defaults.
//!
//! Every field has a default; a partial configuration (including partial
//! nested objects when deserialized) fills the rest from [`Default`].
//!
//! # Example
//!
//! ```
//! use fragmentfx::{Area, FragmentsConfig, PercentRect};
//!
//! let config = FragmentsConfig::default()
//!     .fragments(2)
//!     .area(Area::Explicit(vec![
//!         PercentRect::new(80.0, 10.0, 3.0, 20.0),
//!         PercentRect::new(2.0, 2.0, 4.0, 40.0),
//!     ]))
//!     .parallax(true);
//!
//! assert!(config.validate().is_empty());
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::geometry::{Boundaries, Interval, PercentRect};
use crate::timing::DebouncePolicy;

/// Random width range, with height pinned near `fixed_height`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct WidthPolicy {
    pub min: f64,
    pub max: f64,
    /// Height drawn within ±0.1 of this value (never below 0.1).
    pub fixed_height: f64,
}

impl WidthPolicy {
    /// Range the free width is drawn from.
    pub fn range(&self) -> Interval {
        Interval::new(self.min, self.max)
    }
}

impl Default for WidthPolicy {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 60.0,
            fixed_height: 1.1,
        }
    }
}

/// Height-free strip policy: width pinned near `fixed_width`.
///
/// The free height is drawn from [`WidthPolicy`]'s range; `min` and `max`
/// here are accepted for option compatibility and do not affect layout.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct HeightPolicy {
    pub min: f64,
    pub max: f64,
    /// Width drawn within ±0.1 of this value (never below 0.1).
    pub fixed_width: f64,
}

impl Default for HeightPolicy {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 60.0,
            fixed_width: 1.1,
        }
    }
}

/// Paired width/height policies. One axis is free, the other is pinned.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DimensionIntervals {
    pub width: WidthPolicy,
    pub height: HeightPolicy,
}

/// Ranges for randomly generated areas (percent values).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomIntervals {
    pub top: Interval,
    pub left: Interval,
    pub dimension: DimensionIntervals,
}

impl Default for RandomIntervals {
    fn default() -> Self {
        Self {
            top: Interval::new(0.0, 90.0),
            left: Interval::new(0.0, 90.0),
            dimension: DimensionIntervals::default(),
        }
    }
}

/// Where fragments are clipped.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "AreaRepr"))]
pub enum Area {
    /// Draw a fresh area from [`RandomIntervals`] on every layout pass.
    #[default]
    Random,
    /// One rectangle per fragment, by index.
    Explicit(Vec<PercentRect>),
    /// Neither the `"random"` keyword nor a list. Holds the keyword when the
    /// value was a string. Every fragment lays out as zero-area.
    Unrecognized(String),
}

impl Area {
    /// Keyword selecting [`Area::Random`] in serialized options.
    pub const RANDOM_KEYWORD: &'static str = "random";

    /// Whether areas are drawn randomly.
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum AreaRepr {
    Keyword(String),
    List(Vec<PercentRect>),
    Other(serde::de::IgnoredAny),
}

#[cfg(feature = "serde")]
impl From<AreaRepr> for Area {
    fn from(repr: AreaRepr) -> Self {
        match repr {
            AreaRepr::Keyword(k) if k == Area::RANDOM_KEYWORD => Area::Random,
            AreaRepr::Keyword(k) => Area::Unrecognized(k),
            AreaRepr::List(list) => Area::Explicit(list),
            AreaRepr::Other(_) => Area::Unrecognized(String::new()),
        }
    }
}

/// Widget options.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FragmentsConfig {
    /// Number of fragments. Default 25.
    pub fragments: u32,
    /// Translation slack in pixels. Default `{x1: 100, x2: 100, y1: 50, y2: 50}`.
    pub boundaries: Boundaries,
    /// Clip areas. Default random.
    pub area: Area,
    /// Ranges used when `area` is random.
    pub random_intervals: RandomIntervals,
    /// Pointer parallax. Default off.
    pub parallax: bool,
    /// Range each fragment's parallax factor is drawn from, in pixels. Default `{10, 150}`.
    pub random_parallax: Interval,
    /// Quiet period before a resize relayout, in milliseconds. Default 10.
    pub resize_debounce_ms: u32,
}

impl Default for FragmentsConfig {
    fn default() -> Self {
        Self {
            fragments: 25,
            boundaries: Boundaries::default(),
            area: Area::Random,
            random_intervals: RandomIntervals::default(),
            parallax: false,
            random_parallax: Interval::new(10.0, 150.0),
            resize_debounce_ms: DebouncePolicy::DEFAULT_DELAY_MS,
        }
    }
}

impl FragmentsConfig {
    /// Upper bound on fragments actually laid out.
    pub const MAX_FRAGMENTS: u32 = 10_000;

    /// Fragments laid out: the configured count, capped at
    /// [`MAX_FRAGMENTS`](Self::MAX_FRAGMENTS).
    pub fn fragment_count(&self) -> usize {
        self.fragments.min(Self::MAX_FRAGMENTS) as usize
    }

    /// Set the fragment count.
    pub fn fragments(mut self, count: u32) -> Self {
        self.fragments = count;
        self
    }

    /// Set translation boundaries.
    pub fn boundaries(mut self, boundaries: Boundaries) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// Set the area policy.
    pub fn area(mut self, area: Area) -> Self {
        self.area = area;
        self
    }

    /// Set random generation ranges.
    pub fn random_intervals(mut self, intervals: RandomIntervals) -> Self {
        self.random_intervals = intervals;
        self
    }

    /// Enable or disable pointer parallax.
    pub fn parallax(mut self, enabled: bool) -> Self {
        self.parallax = enabled;
        self
    }

    /// Set the parallax factor range.
    pub fn random_parallax(mut self, range: Interval) -> Self {
        self.random_parallax = range;
        self
    }

    /// Set the resize quiet period.
    pub fn resize_debounce_ms(mut self, ms: u32) -> Self {
        self.resize_debounce_ms = ms;
        self
    }

    /// Debounce policy for resize relayouts.
    pub fn resize_policy(&self) -> DebouncePolicy {
        DebouncePolicy::trailing(self.resize_debounce_ms)
    }

    /// Parse options from a JSON object.
    ///
    /// Field names follow the widget's option names (`fragments`, `boundaries`,
    /// `area`, `randomIntervals`, `parallax`, `randomParallax`,
    /// `resizeDebounceMs`). Missing or unrecognized values degrade into
    /// geometry that [`validate`](Self::validate) reports; only input that is
    /// not an options object, or a field of the wrong type, is an error.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, crate::FragmentsError> {
        serde_json::from_str(json).map_err(|e| crate::FragmentsError::InvalidOptions(e.to_string()))
    }

    /// Check for configuration that will lay out degenerate fragments.
    ///
    /// Nothing here is fatal; layout proceeds regardless.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.fragments == 0 {
            warnings.push(ConfigWarning::NoFragments);
        } else if self.fragments > Self::MAX_FRAGMENTS {
            warnings.push(ConfigWarning::TooManyFragments {
                requested: self.fragments,
                max: Self::MAX_FRAGMENTS,
            });
        }

        match &self.area {
            Area::Explicit(list) => {
                if list.len() != self.fragments as usize {
                    warnings.push(ConfigWarning::AreaCountMismatch {
                        fragments: self.fragments,
                        areas: list.len(),
                    });
                }
                for (index, rect) in list.iter().enumerate() {
                    if !rect.is_finite() {
                        warnings.push(ConfigWarning::NonFiniteArea { index });
                    }
                }
            }
            Area::Random => {
                let ri = &self.random_intervals;
                let ranges = [
                    ("randomIntervals.top", ri.top),
                    ("randomIntervals.left", ri.left),
                    ("randomIntervals.dimension.width", ri.dimension.width.range()),
                ];
                for (field, range) in ranges {
                    check_interval(field, range, &mut warnings);
                }
            }
            Area::Unrecognized(value) => {
                warnings.push(ConfigWarning::UnrecognizedArea {
                    value: value.clone(),
                });
            }
        }

        if self.parallax {
            check_interval("randomParallax", self.random_parallax, &mut warnings);
        }

        let b = &self.boundaries;
        if [b.x1, b.x2, b.y1, b.y2].iter().any(|v| !v.is_finite()) {
            warnings.push(ConfigWarning::NonFiniteBoundaries);
        }

        warnings
    }
}

fn check_interval(field: &'static str, range: Interval, warnings: &mut Vec<ConfigWarning>) {
    if !range.is_finite() {
        warnings.push(ConfigWarning::NonFiniteInterval { field });
    } else if range.is_reversed() {
        warnings.push(ConfigWarning::ReversedInterval { field });
    }
}

/// Non-fatal configuration warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Fragment count is zero; nothing will render.
    NoFragments,
    /// Fragment count exceeds the cap; only `max` fragments are laid out.
    TooManyFragments { requested: u32, max: u32 },
    /// Explicit area list length differs from the fragment count.
    /// Missing entries lay out as zero-area fragments; extra entries are ignored.
    AreaCountMismatch { fragments: u32, areas: usize },
    /// Explicit area at `index` has a NaN or infinite value.
    NonFiniteArea { index: usize },
    /// An interval has `min > max`. Values are still drawn between the bounds.
    ReversedInterval { field: &'static str },
    /// An interval bound is missing, NaN or infinite.
    NonFiniteInterval { field: &'static str },
    /// `area` is neither `"random"` nor a list; fragments lay out as zero-area.
    UnrecognizedArea { value: String },
    /// A boundary value is NaN or infinite.
    NonFiniteBoundaries,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFragments => f.write_str("fragment count is zero"),
            Self::TooManyFragments { requested, max } => {
                write!(f, "{requested} fragments requested, laying out {max}")
            }
            Self::AreaCountMismatch { fragments, areas } => write!(
                f,
                "{areas} explicit areas for {fragments} fragments"
            ),
            Self::NonFiniteArea { index } => write!(f, "area {index} has a non-finite value"),
            Self::ReversedInterval { field } => write!(f, "{field} has min > max"),
            Self::NonFiniteInterval { field } => write!(f, "{field} has a missing or non-finite bound"),
            Self::UnrecognizedArea { value } => {
                write!(f, "area {value:?} is neither \"random\" nor a list of rectangles")
            }
            Self::NonFiniteBoundaries => f.write_str("boundaries have a non-finite value"),
        }
    }
}
