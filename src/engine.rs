//! Fragment layout engine: owns the fragments and recomputes them on
//! resize and pointer movement.
//!
//! # Example
//!
//! ```
//! use fragmentfx::{
//!     Area, ClipSupport, ContainerSize, FragmentLayoutEngine, FragmentsConfig, PercentRect,
//! };
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let config = FragmentsConfig::default()
//!     .fragments(1)
//!     .area(Area::Explicit(vec![PercentRect::new(10.0, 10.0, 50.0, 50.0)]));
//!
//! let engine = FragmentLayoutEngine::new(
//!     config,
//!     ClipSupport::Polygon,
//!     ContainerSize::new(400.0, 300.0),
//!     SmallRng::seed_from_u64(7),
//! );
//!
//! let clip = engine.fragments()[0].geometry.clip;
//! assert_eq!(clip.to_string(), "polygon(10% 10%, 60% 10%, 60% 60%, 10% 60%)");
//! ```

use alloc::vec::Vec;

use rand::Rng;

use crate::config::FragmentsConfig;
use crate::geometry::{ClipSupport, ContainerSize, Point, Translation};
use crate::layout::{FragmentGeometry, compute_fragment_geometry, uniform};

/// One fragment's runtime state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Clip and scatter translation of the inner piece.
    pub geometry: FragmentGeometry,
    /// Parallax factor in pixels, drawn once at creation. `None` when
    /// parallax is disabled.
    pub parallax_factor: Option<f64>,
    /// Pointer-driven translation of the fragment itself.
    pub parallax_offset: Translation,
}

/// Where the container sits on the page when a pointer sample is taken.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerBounds {
    /// Viewport-relative left edge.
    pub left: f64,
    /// Viewport-relative top edge.
    pub top: f64,
    /// Horizontal document scroll.
    pub scroll_left: f64,
    /// Vertical document scroll.
    pub scroll_top: f64,
}

impl ContainerBounds {
    /// Pointer position relative to the container's top-left corner.
    ///
    /// `page` is in document coordinates (viewport position plus scroll).
    pub fn relative(&self, page: Point) -> Point {
        Point::new(
            page.x - self.left - self.scroll_left,
            page.y - self.top - self.scroll_top,
        )
    }
}

/// Lays out a fixed number of fragments over one container.
///
/// The clip capability is probed once by the caller and injected here.
#[derive(Debug)]
pub struct FragmentLayoutEngine<R> {
    config: FragmentsConfig,
    support: ClipSupport,
    container: ContainerSize,
    fragments: Vec<Fragment>,
    rng: R,
}

impl<R: Rng> FragmentLayoutEngine<R> {
    /// Create every fragment and lay it out.
    ///
    /// Configuration warnings are logged; layout proceeds regardless.
    pub fn new(
        config: FragmentsConfig,
        support: ClipSupport,
        container: ContainerSize,
        mut rng: R,
    ) -> Self {
        for warning in config.validate() {
            tracing::warn!(%warning, "degenerate fragment configuration");
        }

        let count = config.fragment_count();
        let mut fragments = Vec::with_capacity(count);
        for index in 0..count {
            let parallax_factor = config
                .parallax
                .then(|| uniform(&mut rng, config.random_parallax));
            let geometry = compute_fragment_geometry(index, &config, container, support, &mut rng);
            fragments.push(Fragment {
                geometry,
                parallax_factor,
                parallax_offset: Translation::ZERO,
            });
        }

        tracing::debug!(
            fragments = count,
            width = container.width,
            height = container.height,
            ?support,
            "laid out fragments"
        );

        Self {
            config,
            support,
            container,
            fragments,
            rng,
        }
    }

    /// Recompute clip and scatter for every fragment at a new container size.
    ///
    /// Random areas are re-rolled; explicit areas give the same clip as before.
    /// Parallax factors and offsets are kept.
    pub fn recompute_on_resize(&mut self, container: ContainerSize) {
        self.container = container;
        for (index, fragment) in self.fragments.iter_mut().enumerate() {
            fragment.geometry = compute_fragment_geometry(
                index,
                &self.config,
                container,
                self.support,
                &mut self.rng,
            );
        }
        tracing::debug!(
            width = container.width,
            height = container.height,
            "relaid fragments after resize"
        );
    }

    /// Shift each fragment by its parallax factor according to the pointer.
    ///
    /// `x = t / W * rel_x - t / 2`, same on y. Replaces any previous
    /// offset. Does nothing when parallax is disabled.
    pub fn parallax_translate(&mut self, pointer: Point, bounds: &ContainerBounds) {
        let rel = bounds.relative(pointer);
        let ContainerSize { width, height } = self.container;
        for fragment in &mut self.fragments {
            if let Some(t) = fragment.parallax_factor {
                fragment.parallax_offset = Translation {
                    x: parallax_axis(t, width, rel.x),
                    y: parallax_axis(t, height, rel.y),
                };
            }
        }
    }

    /// Pointer left the container: every parallax offset returns to zero.
    pub fn pointer_leave(&mut self) {
        for fragment in &mut self.fragments {
            fragment.parallax_offset = Translation::ZERO;
        }
    }
}

impl<R> FragmentLayoutEngine<R> {
    /// Configuration the engine was built with.
    pub fn config(&self) -> &FragmentsConfig {
        &self.config
    }

    /// Injected clip capability.
    pub fn support(&self) -> ClipSupport {
        self.support
    }

    /// Container size of the most recent layout.
    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// All fragments, in creation order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Whether pointer parallax is on.
    pub fn parallax_enabled(&self) -> bool {
        self.config.parallax
    }
}

/// One axis of the parallax offset. A zero-sized axis only applies the
/// centering term.
fn parallax_axis(factor: f64, extent: f64, rel: f64) -> f64 {
    if extent > 0.0 {
        factor / extent * rel - factor / 2.0
    } else {
        -factor / 2.0
    }
}
