//! Fragmented background-image layout: clip geometry, scatter translation,
//! and pointer parallax.
//!
//! The core is pure geometry over a caller-supplied RNG, `no_std` + `alloc`
//! compatible. Rendering environments plug in at two seams: the clip
//! capability ([`ClipSupport`]) and the event timing policy ([`timing`]).
//!
//! # Modules
//!
//! - [`geometry`]: Percent/pixel rectangles, clip regions, translations, CSS forms
//! - [`config`]: Widget options with documented defaults
//! - [`layout`]: Per-fragment area selection, clip, and scatter translation
//! - [`engine`]: Fragment set with resize relayout and pointer parallax
//! - [`timing`]: Trailing debounce and per-frame coalescing policy
//! - `svg`: Layout preview as an SVG document (feature `svg`)
//! - `web`: Browser binding via `wasm-bindgen` (feature `web`)

#![cfg_attr(not(feature = "std"), no_std)]
// wasm-bindgen glue expands to unsafe code.
#![cfg_attr(not(feature = "web"), forbid(unsafe_code))]

extern crate alloc;

pub mod config;
pub mod engine;
mod error;
pub mod geometry;
pub mod layout;
pub mod timing;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "web")]
pub mod web;

pub use config::{
    Area, ConfigWarning, DimensionIntervals, FragmentsConfig, HeightPolicy, RandomIntervals,
    WidthPolicy,
};
pub use engine::{ContainerBounds, Fragment, FragmentLayoutEngine};
pub use error::FragmentsError;
pub use geometry::{
    Boundaries, ClipRegion, ClipSupport, ContainerSize, Interval, PercentRect, PixelRect, Point,
    Quad, Translation, TranslationRange,
};
pub use layout::{FragmentGeometry, compute_fragment_geometry};
pub use timing::{DebouncePolicy, Debouncer, FrameCoalescer};
