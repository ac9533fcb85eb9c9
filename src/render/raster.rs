//! Raster backend: draws a [`ScenePlan`](super::ScenePlan) into an RGBA
//! surface with per-pixel alpha blending.
//!
//! The surface is externally owned and mutated in place, so a render call
//! needs exclusive access; PNG export goes through [`render_png`]. Geometry
//! is produced in the 600×600 canvas space of the plan and scaled uniformly
//! to the surface, with distance-based coverage for smooth circle and line
//! edges and a smooth disc clip matching the vector backend's `clipPath`.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use nalgebra::Point2;
use tracing::debug;

use super::font;
use super::{Color, Primitive, RenderScene};
use crate::error::StarMapError;
use crate::position::{DISC_CENTER, DISC_RADIUS, FRAME_SIZE};

/// Render the scene into an externally owned surface.
///
/// Fails with [`StarMapError::RenderSurfaceUnavailable`] when the surface
/// has a zero dimension. The whole surface is overwritten: background fill
/// first, then the clipped plan, then border and text.
pub fn render(scene: &RenderScene, surface: &mut RgbaImage) -> Result<(), StarMapError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(StarMapError::RenderSurfaceUnavailable { width, height });
    }

    let plan = scene.plan();
    let scale = width.min(height) as f64 / FRAME_SIZE;
    debug!(
        "raster render: {}x{} surface, scale {scale:.3}, {} clipped + {} overlay primitives",
        width,
        height,
        plan.clipped.len(),
        plan.overlay.len()
    );

    let bg = Rgba([plan.background.r, plan.background.g, plan.background.b, 255]);
    for pixel in surface.pixels_mut() {
        *pixel = bg;
    }

    let clip = Clip {
        cx: DISC_CENTER.0 * scale,
        cy: DISC_CENTER.1 * scale,
        radius: DISC_RADIUS * scale,
    };

    let mut canvas = Canvas {
        surface,
        scale,
        clip: Some(clip),
    };
    for primitive in &plan.clipped {
        canvas.draw(primitive);
    }
    canvas.clip = None;
    for primitive in &plan.overlay {
        canvas.draw(primitive);
    }
    Ok(())
}

/// Allocate a surface, render, and encode as PNG bytes.
pub fn render_png(scene: &RenderScene, width: u32, height: u32) -> Result<Vec<u8>, StarMapError> {
    if width == 0 || height == 0 {
        return Err(StarMapError::RenderSurfaceUnavailable { width, height });
    }
    let mut surface = RgbaImage::new(width, height);
    render(scene, &mut surface)?;

    let mut buffer = Cursor::new(Vec::new());
    surface.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[derive(Clone, Copy)]
struct Clip {
    cx: f64,
    cy: f64,
    radius: f64,
}

struct Canvas<'a> {
    surface: &'a mut RgbaImage,
    /// Device pixels per canvas unit.
    scale: f64,
    clip: Option<Clip>,
}

impl Canvas<'_> {
    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Vignette {
                center,
                inner_radius,
                outer_radius,
                max_opacity,
            } => self.vignette(*center, *inner_radius, *outer_radius, *max_opacity),
            Primitive::StrokedCircle {
                center,
                radius,
                color,
                opacity,
                width,
            } => self.stroke_circle(*center, *radius, *color, *opacity, *width),
            Primitive::LineSegment {
                from,
                to,
                color,
                opacity,
                width,
            } => self.line(*from, *to, *color, *opacity, *width),
            Primitive::FilledCircle {
                center,
                radius,
                color,
                opacity,
            } => self.fill_circle(*center, *radius, *color, *opacity),
            Primitive::Halo {
                center,
                radius,
                color,
                opacity,
            } => self.halo(*center, *radius, *color, *opacity),
            Primitive::TextRun {
                anchor,
                content,
                size,
                bold,
                color,
                opacity,
            } => self.text(*anchor, content, *size, *bold, *color, *opacity),
        }
    }

    /// Source-over blend of one device pixel, including clip coverage.
    fn blend(&mut self, x: i64, y: i64, color: Color, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let (w, h) = self.surface.dimensions();
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return;
        }
        let alpha = match self.clip {
            Some(clip) => {
                let d = ((x as f64 + 0.5 - clip.cx).powi(2)
                    + (y as f64 + 0.5 - clip.cy).powi(2))
                .sqrt();
                alpha * (clip.radius + 0.5 - d).clamp(0.0, 1.0)
            }
            None => alpha,
        };
        if alpha <= 0.0 {
            return;
        }

        let pixel = self.surface.get_pixel_mut(x as u32, y as u32);
        let mix = |dst: u8, src: u8| -> u8 {
            (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
        };
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([
            mix(r, color.r),
            mix(g, color.g),
            mix(b, color.b),
            (255.0 * alpha + a as f64 * (1.0 - alpha)).round() as u8,
        ]);
    }

    /// Scan a device-space bounding box, blending per-pixel coverage
    /// computed from the pixel center.
    fn scan(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Color,
        coverage: impl Fn(f64, f64) -> f64,
    ) {
        let xs = x0.floor() as i64;
        let ys = y0.floor() as i64;
        let xe = x1.ceil() as i64;
        let ye = y1.ceil() as i64;
        for y in ys..=ye {
            for x in xs..=xe {
                let alpha = coverage(x as f64 + 0.5, y as f64 + 0.5);
                self.blend(x, y, color, alpha);
            }
        }
    }

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Color, opacity: f64) {
        let (cx, cy, r) = (center.x * self.scale, center.y * self.scale, radius * self.scale);
        self.scan(cx - r - 1.0, cy - r - 1.0, cx + r + 1.0, cy + r + 1.0, color, |px, py| {
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            opacity * (r + 0.5 - d).clamp(0.0, 1.0)
        });
    }

    fn stroke_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
        width: f64,
    ) {
        let (cx, cy) = (center.x * self.scale, center.y * self.scale);
        let r = radius * self.scale;
        let half = (width * self.scale / 2.0).max(0.25);
        let reach = r + half + 1.0;
        self.scan(cx - reach, cy - reach, cx + reach, cy + reach, color, |px, py| {
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            opacity * (half + 0.5 - (d - r).abs()).clamp(0.0, 1.0)
        });
    }

    fn line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color, opacity: f64, width: f64) {
        let a = Point2::new(from.x * self.scale, from.y * self.scale);
        let b = Point2::new(to.x * self.scale, to.y * self.scale);
        let half = (width * self.scale / 2.0).max(0.25);
        let (x0, x1) = (a.x.min(b.x) - half - 1.0, a.x.max(b.x) + half + 1.0);
        let (y0, y1) = (a.y.min(b.y) - half - 1.0, a.y.max(b.y) + half + 1.0);
        let ab = b - a;
        let len_sq = ab.norm_squared().max(1e-12);
        self.scan(x0, y0, x1, y1, color, |px, py| {
            let ap = Point2::new(px, py) - a;
            let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
            let d = (ap - ab * t).norm();
            opacity * (half + 0.5 - d).clamp(0.0, 1.0)
        });
    }

    fn vignette(&mut self, center: Point2<f64>, inner: f64, outer: f64, max_opacity: f64) {
        let (cx, cy) = (center.x * self.scale, center.y * self.scale);
        let (inner, outer) = (inner * self.scale, outer * self.scale);
        let reach = outer + 1.0;
        self.scan(cx - reach, cy - reach, cx + reach, cy + reach, Color::BLACK, |px, py| {
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            let t = ((d - inner) / (outer - inner)).clamp(0.0, 1.0);
            max_opacity * t
        });
    }

    fn halo(&mut self, center: Point2<f64>, radius: f64, color: Color, opacity: f64) {
        let (cx, cy, r) = (center.x * self.scale, center.y * self.scale, radius * self.scale);
        self.scan(cx - r - 1.0, cy - r - 1.0, cx + r + 1.0, cy + r + 1.0, color, |px, py| {
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            opacity * (1.0 - d / r).clamp(0.0, 1.0)
        });
    }

    /// Axis-aligned rectangle in device space with edge coverage.
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color, opacity: f64) {
        self.scan(x0, y0, x1, y1, color, |px, py| {
            let cov_x = (px + 0.5).min(x1) - (px - 0.5).max(x0);
            let cov_y = (py + 0.5).min(y1) - (py - 0.5).max(y0);
            opacity * cov_x.clamp(0.0, 1.0) * cov_y.clamp(0.0, 1.0)
        });
    }

    /// Center-anchored text at `anchor` (x = center, y = baseline), drawn
    /// with the built-in 5×7 font scaled so the glyph height matches
    /// `size` canvas units.
    fn text(
        &mut self,
        anchor: Point2<f64>,
        content: &str,
        size: f64,
        bold: bool,
        color: Color,
        opacity: f64,
    ) {
        if content.is_empty() {
            return;
        }
        // Canvas units per glyph pixel, then device units.
        let cell = size / font::GLYPH_HEIGHT as f64 * self.scale;
        let width = font::text_width(content, cell);
        let left = anchor.x * self.scale - width / 2.0;
        let top = anchor.y * self.scale - size * self.scale;

        // Faux bold: a second pass shifted half a glyph pixel.
        let passes: &[f64] = if bold { &[0.0, cell * 0.5] } else { &[0.0] };
        for (i, c) in content.chars().enumerate() {
            let columns = font::glyph(c);
            let origin_x = left + (i * font::GLYPH_ADVANCE) as f64 * cell;
            for col in 0..font::GLYPH_WIDTH {
                for row in 0..font::GLYPH_HEIGHT {
                    if !font::pixel_set(columns, col, row) {
                        continue;
                    }
                    for offset in passes {
                        let x0 = origin_x + col as f64 * cell + offset;
                        let y0 = top + row as f64 * cell;
                        self.fill_rect(x0, y0, x0 + cell, y0 + cell, color, opacity);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Location, StarMapConfig, StyleConfig, TextConfig};
    use crate::position::ProjectedStar;
    use chrono::{TimeZone, Utc};

    fn scene_with_one_star() -> RenderScene {
        let config = StarMapConfig {
            location: Location {
                name: "Test".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            },
            instant: Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap(),
            text: TextConfig::default(),
            style: StyleConfig::default(),
        };
        RenderScene::from_parts(
            vec![ProjectedStar {
                position: Point2::new(300.0, 250.0),
                magnitude: 0.0,
                name: Some("Vega"),
            }],
            vec![],
            config,
        )
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let scene = scene_with_one_star();
        let mut surface = RgbaImage::new(0, 600);
        assert!(matches!(
            render(&scene, &mut surface),
            Err(StarMapError::RenderSurfaceUnavailable { width: 0, .. })
        ));
        assert!(render_png(&scene, 600, 0).is_err());
    }

    #[test]
    fn background_fills_the_frame_and_star_is_painted() {
        let scene = scene_with_one_star();
        let mut surface = RgbaImage::new(600, 600);
        render(&scene, &mut surface).unwrap();

        // Corner (outside the disc): untouched background #0F172A.
        assert_eq!(*surface.get_pixel(2, 2), Rgba([15, 23, 42, 255]));
        // Star center: white dot at full opacity.
        let star = surface.get_pixel(300, 250);
        assert!(star.0[0] > 200 && star.0[1] > 200 && star.0[2] > 200);
        // Disc center away from the star: background, no vignette there.
        assert_eq!(*surface.get_pixel(300, 300), Rgba([15, 23, 42, 255]));
    }

    #[test]
    fn vignette_darkens_the_rim() {
        let scene = scene_with_one_star();
        let mut surface = RgbaImage::new(600, 600);
        render(&scene, &mut surface).unwrap();
        // Just inside the rim along +x, far from stars, lines, and text.
        let rim = surface.get_pixel(575, 300);
        let center = surface.get_pixel(310, 300);
        assert!(rim.0[2] < center.0[2], "rim {rim:?} not darker than {center:?}");
    }

    #[test]
    fn png_export_round_trips() {
        let scene = scene_with_one_star();
        let bytes = render_png(&scene, 300, 300).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 300);
        assert_eq!(decoded.height(), 300);
    }
}
