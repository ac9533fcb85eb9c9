//! Scene assembly and the backend-agnostic drawing plan.
//!
//! Both backends consume the exact same [`ScenePlan`]: a background color,
//! a list of primitives clipped to the projection disc, and a list of
//! overlay primitives drawn outside the clip (border, text). The plan is
//! produced once per scene; the raster and vector emitters only translate
//! primitives into pixels or markup, so star counts, positions, and
//! conditional effects (grid, halos, constellation lines) agree between the
//! two outputs by construction.
//!
//! Layout, in plan order:
//! 1. background fill (raster only — the vector export stays transparent);
//! 2. radial vignette from 70% of the disc radius to the rim;
//! 3. optional grid: concentric circles at 1/4, 1/2, 3/4 radius plus 12
//!    spokes at 30° steps, half opacity;
//! 4. background stars at 30% opacity, then foreground stars at full
//!    opacity, dot size interpolated from magnitude;
//! 5. glow halo (3× dot size) for foreground stars brighter than mag 2;
//! 6. optional constellation lines, resolved by star name against the
//!    currently visible foreground set;
//! 7. border stroke at the disc boundary;
//! 8. three text lines anchored near the disc bottom.

pub mod font;
pub mod raster;
pub mod svg;

use std::collections::HashMap;

use nalgebra::Point2;
use tracing::debug;

use crate::background::background_field;
use crate::catalog;
use crate::config::{StarMapConfig, StarSize};
use crate::error::StarMapError;
use crate::position::{visible_stars, ProjectedStar, DISC_CENTER, DISC_RADIUS};

/// Number of synthetic background stars in a standard scene.
pub const BACKGROUND_STAR_COUNT: usize = 200;

/// Fraction of the disc radius where the vignette starts.
const VIGNETTE_START: f64 = 0.7;
/// Vignette darkness at the rim.
const VIGNETTE_OPACITY: f64 = 0.3;
/// Foreground stars brighter than this get a glow halo.
const HALO_MAGNITUDE_LIMIT: f64 = 2.0;
/// Halo radius as a multiple of the star dot radius.
const HALO_RADIUS_FACTOR: f64 = 3.0;
const HALO_OPACITY: f64 = 0.25;
const GRID_OPACITY: f64 = 0.5;
const LINE_OPACITY: f64 = 0.7;
const BACKGROUND_STAR_OPACITY: f64 = 0.3;

/// An opaque RGB color; opacity travels separately on each primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Parse a `#RRGGBB` or `#RGB` hex color. Returns `None` for anything
    /// else; callers fall back to a documented default rather than failing
    /// the render over a style string.
    pub fn parse(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color { r, g, b })
            }
            3 => {
                let component = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Color {
                    r: component(0)?,
                    g: component(1)?,
                    b: component(2)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A single backend-agnostic drawing operation in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Radial darkening, transparent at `inner_radius`, `max_opacity` black
    /// at `outer_radius`.
    Vignette {
        center: Point2<f64>,
        inner_radius: f64,
        outer_radius: f64,
        max_opacity: f64,
    },
    StrokedCircle {
        center: Point2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
        width: f64,
    },
    LineSegment {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
        opacity: f64,
        width: f64,
    },
    FilledCircle {
        center: Point2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
    },
    /// Soft glow fading from `opacity` at the center to transparent at
    /// `radius`.
    Halo {
        center: Point2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
    },
    TextRun {
        anchor: Point2<f64>,
        content: String,
        size: f64,
        bold: bool,
        color: Color,
        opacity: f64,
    },
}

/// The complete drawing plan for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlan {
    /// Raster background fill; the vector export carries no background.
    pub background: Color,
    /// Primitives clipped to the projection disc.
    pub clipped: Vec<Primitive>,
    /// Border and text, drawn outside the clip.
    pub overlay: Vec<Primitive>,
}

impl ScenePlan {
    /// Count primitives (clipped + overlay) matching a predicate.
    pub fn count_matching(&self, pred: impl Fn(&Primitive) -> bool) -> usize {
        self.clipped
            .iter()
            .chain(self.overlay.iter())
            .filter(|p| pred(p))
            .count()
    }
}

/// Everything both backends need to draw one star map.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub foreground: Vec<ProjectedStar>,
    pub background: Vec<ProjectedStar>,
    pub config: StarMapConfig,
}

/// Dot radius for a star of the given magnitude within a size class range.
pub fn star_radius(magnitude: f64, size: StarSize) -> f64 {
    let (min, max) = size.radius_range();
    let normalized = (magnitude + 2.0).clamp(0.0, 6.0) / 8.0;
    max - normalized * (max - min)
}

impl RenderScene {
    /// Run the full computation pipeline for a configuration: validate the
    /// observer, compute visible foreground stars, and generate the
    /// deterministic background field.
    pub fn new(config: StarMapConfig) -> Result<Self, StarMapError> {
        let observer = config.observer()?;
        let foreground = visible_stars(&observer, config.style.magnitude_limit);
        let background = background_field(BACKGROUND_STAR_COUNT, &observer);
        debug!(
            "scene for {}: {} foreground, {} background stars",
            config.location.name,
            foreground.len(),
            background.len()
        );
        Ok(Self {
            foreground,
            background,
            config,
        })
    }

    /// Assemble a scene from precomputed star lists. Used by tests and by
    /// callers that run the pipeline stages themselves.
    pub fn from_parts(
        foreground: Vec<ProjectedStar>,
        background: Vec<ProjectedStar>,
        config: StarMapConfig,
    ) -> Self {
        Self {
            foreground,
            background,
            config,
        }
    }

    fn star_color(&self) -> Color {
        Color::parse(&self.config.style.star_color).unwrap_or(Color::WHITE)
    }

    fn background_color(&self) -> Color {
        Color::parse(&self.config.style.background_color).unwrap_or(Color::BLACK)
    }

    /// Produce the shared drawing plan (see module docs for the layout).
    pub fn plan(&self) -> ScenePlan {
        let style = &self.config.style;
        let star_color = self.star_color();
        let center = Point2::new(DISC_CENTER.0, DISC_CENTER.1);

        let mut clipped = Vec::new();

        clipped.push(Primitive::Vignette {
            center,
            inner_radius: DISC_RADIUS * VIGNETTE_START,
            outer_radius: DISC_RADIUS,
            max_opacity: VIGNETTE_OPACITY,
        });

        if style.show_grid {
            for quarter in 1..4 {
                clipped.push(Primitive::StrokedCircle {
                    center,
                    radius: DISC_RADIUS * quarter as f64 / 4.0,
                    color: star_color,
                    opacity: GRID_OPACITY,
                    width: 0.5,
                });
            }
            for step in 0..12 {
                let angle = (step as f64 * 30.0).to_radians();
                clipped.push(Primitive::LineSegment {
                    from: center,
                    to: Point2::new(
                        center.x + DISC_RADIUS * angle.cos(),
                        center.y + DISC_RADIUS * angle.sin(),
                    ),
                    color: star_color,
                    opacity: GRID_OPACITY,
                    width: 0.5,
                });
            }
        }

        for star in &self.background {
            self.push_star(&mut clipped, star, BACKGROUND_STAR_OPACITY, star_color);
        }
        for star in &self.foreground {
            self.push_star(&mut clipped, star, 1.0, star_color);
        }

        if style.constellation_lines {
            let positions: HashMap<&str, Point2<f64>> = self
                .foreground
                .iter()
                .filter_map(|s| s.name.map(|n| (n, s.position)))
                .collect();
            for (_, pairs) in catalog::constellation_lines() {
                for (a, b) in pairs.iter() {
                    if let (Some(&from), Some(&to)) = (positions.get(a), positions.get(b)) {
                        clipped.push(Primitive::LineSegment {
                            from,
                            to,
                            color: star_color,
                            opacity: LINE_OPACITY,
                            width: 1.0,
                        });
                    }
                }
            }
        }

        let overlay = vec![
            Primitive::StrokedCircle {
                center,
                radius: DISC_RADIUS,
                color: star_color,
                opacity: 1.0,
                width: 2.0,
            },
            Primitive::TextRun {
                anchor: Point2::new(center.x, center.y + DISC_RADIUS - 80.0),
                content: self.config.title().to_string(),
                size: 24.0,
                bold: true,
                color: star_color,
                opacity: 1.0,
            },
            Primitive::TextRun {
                anchor: Point2::new(center.x, center.y + DISC_RADIUS - 50.0),
                content: self.config.subtitle(),
                size: 16.0,
                bold: false,
                color: star_color,
                opacity: 1.0,
            },
            Primitive::TextRun {
                anchor: Point2::new(center.x, center.y + DISC_RADIUS - 30.0),
                content: self.config.caption().to_string(),
                size: 12.0,
                bold: false,
                color: star_color,
                opacity: 0.75,
            },
        ];

        ScenePlan {
            background: self.background_color(),
            clipped,
            overlay,
        }
    }

    /// Emit one star dot (halo first so the dot stays crisp on top).
    fn push_star(
        &self,
        out: &mut Vec<Primitive>,
        star: &ProjectedStar,
        opacity: f64,
        color: Color,
    ) {
        let radius = star_radius(star.magnitude, self.config.style.star_size);
        if star.magnitude < HALO_MAGNITUDE_LIMIT && opacity > 0.5 {
            out.push(Primitive::Halo {
                center: star.position,
                radius: radius * HALO_RADIUS_FACTOR,
                color,
                opacity: HALO_OPACITY,
            });
        }
        out.push(Primitive::FilledCircle {
            center: star.position,
            radius,
            color,
            opacity,
        });
    }
}
