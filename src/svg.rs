//! SVG preview of a fragment layout.
//!
//! Draws two stacked panels over the container: the clip areas where they
//! sit in the source image, then the same pieces after scatter and parallax
//! translation. Useful for inspecting layouts without a browser.
//!
//! # Example
//!
//! ```
//! use fragmentfx::{ClipSupport, ContainerSize, FragmentLayoutEngine, FragmentsConfig};
//! use fragmentfx::svg::render_fragments_svg;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let container = ContainerSize::new(800.0, 500.0);
//! let engine = FragmentLayoutEngine::new(
//!     FragmentsConfig::default(),
//!     ClipSupport::Polygon,
//!     container,
//!     SmallRng::seed_from_u64(3),
//! );
//!
//! let svg = render_fragments_svg(container, engine.fragments());
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::engine::Fragment;
use crate::geometry::{ContainerSize, PixelRect};

/// Maximum pixel width for a panel's container box.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for a panel's container box.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels (room for pieces scattered below the box).
const PANEL_GAP: f64 = 90.0;
/// Horizontal margin (room for pieces scattered sideways).
const MARGIN_X: f64 = 90.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// A single panel in the preview.
struct Panel {
    label: String,
    annotation: String,
    /// Piece rectangles in container pixels.
    pieces: Vec<PixelRect>,
}

/// Render a complete SVG document for `fragments` laid out over `container`.
pub fn render_fragments_svg(container: ContainerSize, fragments: &[Fragment]) -> String {
    let panels = build_panels(container, fragments);
    render_panels(container, &panels)
}

fn build_panels(container: ContainerSize, fragments: &[Fragment]) -> Vec<Panel> {
    let clipped: Vec<PixelRect> = fragments
        .iter()
        .map(|f| f.geometry.clip.pixel_bounds(container))
        .collect();

    let moved: Vec<PixelRect> = fragments
        .iter()
        .zip(&clipped)
        .map(|(f, r)| {
            let dx = f.geometry.translation.x + f.parallax_offset.x;
            let dy = f.geometry.translation.y + f.parallax_offset.y;
            PixelRect {
                top: r.top + dy,
                right: r.right + dx,
                bottom: r.bottom + dy,
                left: r.left + dx,
            }
        })
        .collect();

    vec![
        Panel {
            label: format!(
                "Clip  {}×{}",
                container.width as i64, container.height as i64
            ),
            annotation: format!("{} fragments", fragments.len()),
            pieces: clipped,
        },
        Panel {
            label: String::from("Scatter"),
            annotation: String::from("piece translation + parallax offset"),
            pieces: moved,
        },
    ]
}

/// Scale factor fitting the container into MAX_PANEL_W × MAX_PANEL_H.
fn scale_to_fit(container: ContainerSize) -> (f64, f64, f64) {
    let (w, h) = (container.width, container.height);
    if !(w > 0.0 && h > 0.0) {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn render_panels(container: ContainerSize, panels: &[Panel]) -> String {
    let (bw, bh, scale) = scale_to_fit(container);

    let panel_h = LABEL_H + MAX_PANEL_H;
    let total_h = MARGIN_TOP * 2.0
        + panel_h * panels.len() as f64
        + PANEL_GAP * panels.len().saturating_sub(1) as f64;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .piece { fill: #6ba3d6; fill-opacity: 0.8; stroke: #2c6faa; stroke-width: 0.75; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .piece { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;

    for panel in panels {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let box_x = center_x - bw / 2.0;
        let box_y = y;
        svg.push_str(&format!(
            r#"<rect x="{box_x:.1}" y="{box_y:.1}" width="{bw:.1}" height="{bh:.1}" class="outer" rx="2"/>"#
        ));
        svg.push('\n');

        for piece in &panel.pieces {
            let w = (piece.right - piece.left) * scale;
            let h = (piece.bottom - piece.top) * scale;
            if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
                continue;
            }
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.2}" height="{:.2}" class="piece"/>"#,
                box_x + piece.left * scale,
                box_y + piece.top * scale,
                w,
                h
            ));
            svg.push('\n');
        }

        if !panel.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                box_y + bh + 14.0,
                escape_xml(&panel.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H + PANEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Area, FragmentsConfig};
    use crate::engine::FragmentLayoutEngine;
    use crate::geometry::{ClipSupport, PercentRect};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn engine(support: ClipSupport, area: Area, count: u32) -> FragmentLayoutEngine<SmallRng> {
        FragmentLayoutEngine::new(
            FragmentsConfig::default().fragments(count).area(area),
            support,
            ContainerSize::new(400.0, 300.0),
            SmallRng::seed_from_u64(11),
        )
    }

    #[test]
    fn svg_has_both_panels() {
        let e = engine(ClipSupport::Polygon, Area::Random, 5);
        let svg = render_fragments_svg(e.container(), e.fragments());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Clip  400×300"));
        assert!(svg.contains("Scatter"));
        assert!(svg.contains("5 fragments"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn svg_draws_one_rect_per_piece_per_panel() {
        let e = engine(
            ClipSupport::RectOnly,
            Area::Explicit(vec![
                PercentRect::new(10.0, 10.0, 50.0, 50.0),
                PercentRect::new(0.0, 0.0, 5.0, 90.0),
            ]),
            2,
        );
        let svg = render_fragments_svg(e.container(), e.fragments());
        assert_eq!(svg.matches(r#"class="piece""#).count(), 4);
    }

    #[test]
    fn svg_skips_zero_area_pieces() {
        // Second fragment has no explicit area and lays out empty.
        let e = engine(
            ClipSupport::Polygon,
            Area::Explicit(vec![PercentRect::new(10.0, 10.0, 50.0, 50.0)]),
            2,
        );
        let svg = render_fragments_svg(e.container(), e.fragments());
        assert_eq!(svg.matches(r#"class="piece""#).count(), 2);
    }

    #[test]
    fn svg_same_for_both_clip_forms() {
        let area = Area::Explicit(vec![PercentRect::new(10.0, 10.0, 50.0, 50.0)]);
        let poly = engine(ClipSupport::Polygon, area.clone(), 1);
        let rect = engine(ClipSupport::RectOnly, area, 1);
        let a = render_fragments_svg(poly.container(), poly.fragments());
        let b = render_fragments_svg(rect.container(), rect.fragments());
        assert_eq!(a, b);
    }

    #[test]
    fn svg_zero_container_is_still_valid() {
        let svg = render_fragments_svg(ContainerSize::new(0.0, 0.0), &[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<<"));
    }
}
