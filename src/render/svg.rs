//! Vector backend: emits the scene as a self-contained SVG document.
//!
//! A pure string builder with no drawing surface, freely reentrant. The
//! document declares a disc `clipPath` matching the raster clip, a
//! Gaussian-blur filter for glow halos, and a radial gradient for the
//! vignette, then one element per plan primitive. By export convention the
//! document carries no background fill; everything else mirrors the raster
//! output element-for-element.

use std::fmt::Write;

use super::{Primitive, RenderScene, ScenePlan};
use crate::position::{DISC_CENTER, DISC_RADIUS, FRAME_SIZE};

/// Render the scene as an SVG document string.
pub fn render(scene: &RenderScene) -> String {
    let plan = scene.plan();
    let mut out = String::with_capacity(16 * 1024);

    let _ = writeln!(
        out,
        r#"<svg width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.0} {size:.0}" xmlns="http://www.w3.org/2000/svg">"#,
        size = FRAME_SIZE,
    );
    write_defs(&mut out, &plan);

    let _ = writeln!(out, r#"  <g clip-path="url(#discClip)">"#);
    for primitive in &plan.clipped {
        write_primitive(&mut out, primitive, "    ");
    }
    let _ = writeln!(out, "  </g>");

    for primitive in &plan.overlay {
        write_primitive(&mut out, primitive, "  ");
    }
    let _ = writeln!(out, "</svg>");
    out
}

fn write_defs(out: &mut String, plan: &ScenePlan) {
    let _ = writeln!(out, "  <defs>");
    let _ = writeln!(
        out,
        r#"    <filter id="glow"><feGaussianBlur stdDeviation="3" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
    );
    let _ = writeln!(
        out,
        r#"    <clipPath id="discClip"><circle cx="{:.2}" cy="{:.2}" r="{:.2}"/></clipPath>"#,
        DISC_CENTER.0, DISC_CENTER.1, DISC_RADIUS,
    );

    // The vignette gradient mirrors the plan's radial fade parameters.
    if let Some(Primitive::Vignette {
        inner_radius,
        outer_radius,
        max_opacity,
        ..
    }) = plan
        .clipped
        .iter()
        .find(|p| matches!(p, Primitive::Vignette { .. }))
    {
        let _ = writeln!(
            out,
            concat!(
                r#"    <radialGradient id="vignette">"#,
                r##"<stop offset="{:.0}%" stop-color="#000" stop-opacity="0"/>"##,
                r##"<stop offset="100%" stop-color="#000" stop-opacity="{:.2}"/>"##,
                r#"</radialGradient>"#
            ),
            inner_radius / outer_radius * 100.0,
            max_opacity,
        );
    }
    let _ = writeln!(out, "  </defs>");
}

fn write_primitive(out: &mut String, primitive: &Primitive, indent: &str) {
    match primitive {
        Primitive::Vignette {
            center,
            outer_radius,
            ..
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="url(#vignette)"/>"#,
                center.x, center.y, outer_radius,
            );
        }
        Primitive::StrokedCircle {
            center,
            radius,
            color,
            opacity,
            width,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-opacity="{:.2}" stroke-width="{}"/>"#,
                center.x,
                center.y,
                radius,
                color.to_hex(),
                opacity,
                width,
            );
        }
        Primitive::LineSegment {
            from,
            to,
            color,
            opacity,
            width,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.2}" stroke-width="{}"/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                color.to_hex(),
                opacity,
                width,
            );
        }
        Primitive::FilledCircle {
            center,
            radius,
            color,
            opacity,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" opacity="{:.2}"/>"#,
                center.x,
                center.y,
                radius,
                color.to_hex(),
                opacity,
            );
        }
        Primitive::Halo {
            center,
            radius,
            color,
            opacity,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" opacity="{:.2}" filter="url(#glow)"/>"#,
                center.x,
                center.y,
                radius,
                color.to_hex(),
                opacity,
            );
        }
        Primitive::TextRun {
            anchor,
            content,
            size,
            bold,
            color,
            opacity,
        } => {
            let family = if *bold {
                "Playfair Display, serif"
            } else {
                "Inter, sans-serif"
            };
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            let _ = writeln!(
                out,
                r#"{indent}<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="{family}" font-size="{:.0}"{weight} fill="{}" opacity="{:.2}">{}</text>"#,
                anchor.x,
                anchor.y,
                size,
                color.to_hex(),
                opacity,
                escape_text(content),
            );
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Location, StarMapConfig, StyleConfig, TextConfig};
    use crate::position::ProjectedStar;
    use nalgebra::Point2;
    use chrono::{TimeZone, Utc};

    fn test_scene(show_grid: bool) -> RenderScene {
        let config = StarMapConfig {
            location: Location {
                name: "Tokyo & Co".to_string(),
                latitude: 35.68,
                longitude: 139.69,
            },
            instant: Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap(),
            text: TextConfig::default(),
            style: StyleConfig {
                show_grid,
                constellation_lines: false,
                ..StyleConfig::default()
            },
        };
        RenderScene::from_parts(
            vec![
                ProjectedStar {
                    position: Point2::new(300.0, 200.0),
                    magnitude: 0.03,
                    name: Some("Vega"),
                },
                ProjectedStar {
                    position: Point2::new(250.0, 350.0),
                    magnitude: 3.2,
                    name: Some("Albireo"),
                },
            ],
            vec![ProjectedStar {
                position: Point2::new(400.0, 400.0),
                magnitude: 4.5,
                name: None,
            }],
            config,
        )
    }

    #[test]
    fn document_declares_clip_and_glow() {
        let doc = render(&test_scene(false));
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(r#"<clipPath id="discClip">"#));
        assert!(doc.contains("feGaussianBlur"));
        // Vignette gradient: transparent at 70% of the radius, 0.3 black rim.
        assert!(doc.contains(r#"<radialGradient id="vignette">"#));
        assert!(doc.contains(r##"<stop offset="70%" stop-color="#000" stop-opacity="0"/>"##));
        assert!(doc.contains(r##"stop-color="#000" stop-opacity="0.30"/>"##));
        assert!(doc.contains(r#"fill="url(#vignette)""#));
        assert!(doc.contains(r#"clip-path="url(#discClip)""#));
        // Transparent export: no background rectangle.
        assert!(!doc.contains("<rect"));
    }

    #[test]
    fn star_elements_match_the_plan() {
        let scene = test_scene(false);
        let doc = render(&scene);
        // 3 star dots (2 foreground + 1 background) and 1 halo (Vega only).
        assert_eq!(doc.matches(r#" opacity="1.00"/>"#).count(), 2);
        assert_eq!(doc.matches(r#" opacity="0.30"/>"#).count(), 1);
        assert_eq!(doc.matches("url(#glow)").count(), 1); // Vega's halo
    }

    #[test]
    fn grid_emits_three_circles_and_twelve_spokes() {
        let with_grid = render(&test_scene(true));
        let without = render(&test_scene(false));
        assert_eq!(
            with_grid.matches(r#" fill="none" stroke"#).count()
                - without.matches(r#" fill="none" stroke"#).count(),
            3
        );
        assert_eq!(with_grid.matches("<line ").count(), 12);
        assert_eq!(without.matches("<line ").count(), 0);
    }

    #[test]
    fn text_is_escaped_and_anchored() {
        let doc = render(&test_scene(false));
        assert!(doc.contains("Tokyo &amp; Co"));
        assert_eq!(doc.matches("<text ").count(), 3);
        assert!(doc.contains(r#"text-anchor="middle""#));
        assert!(doc.contains(r#"font-weight="bold""#));
    }
}
