//! # starmap
//!
//! Renders a **personalized star map** for an observer location and instant:
//! which catalog stars are up, where they sit on a stereographic-style disc,
//! and two visually equivalent drawings of the result — an RGBA raster
//! surface (PNG-encodable) and a self-contained SVG document.
//!
//! ## Pipeline
//!
//! 1. **Convert** — civil UTC instant → Julian Day → Local Sidereal Time,
//!    then equatorial → horizontal coordinates per star ([`astro`])
//! 2. **Select** — filter the fixed 108-star catalog by magnitude limit and
//!    horizon, projecting survivors onto a 600×600 disc ([`position`])
//! 3. **Fill** — add a deterministic, location-seeded background star field
//!    rotated by sidereal time ([`background`])
//! 4. **Plan** — assemble one backend-agnostic list of drawing primitives
//!    ([`render`])
//! 5. **Emit** — rasterize ([`render::raster`]) and/or build SVG markup
//!    ([`render::svg`]) from the same plan, guaranteeing parity by
//!    construction
//!
//! The model is deliberately simple: a fixed-epoch catalog with simplified
//! sidereal-time math — no precession, refraction, or proper motion — which
//! is plenty for a decorative map and keeps every stage a pure function.
//!
//! ## Example
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use starmap::{export_file_name, Location, RenderScene, StarMapConfig, StyleConfig, TextConfig};
//!
//! let config = StarMapConfig {
//!     location: Location {
//!         name: "New York, USA".to_string(),
//!         latitude: 40.7128,
//!         longitude: -74.0060,
//!     },
//!     instant: Utc.with_ymd_and_hms(2024, 6, 21, 4, 0, 0).unwrap(),
//!     text: TextConfig::default(),
//!     style: StyleConfig::default(),
//! };
//!
//! let scene = RenderScene::new(config.clone())?;
//!
//! let svg = starmap::render::svg::render(&scene);
//! let png = starmap::render::raster::render_png(&scene, 600, 600)?;
//! std::fs::write(export_file_name("starmap", &config, "svg"), svg)?;
//! std::fs::write(export_file_name("starmap", &config, "png"), png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Concurrency
//!
//! Every computation stage is a side-effect-free function of its arguments
//! and safe to call from any thread. The raster backend mutates an
//! externally owned surface in place and needs exclusive access while
//! drawing; the vector backend is a pure string builder and freely
//! parallelizable. There is no cancellation model: results have no external
//! effects until applied, so a superseded render can simply be dropped.

pub mod astro;
pub mod background;
pub mod catalog;
pub mod config;
pub mod error;
pub mod position;
pub mod render;

pub use astro::{Horizontal, ObserverContext};
pub use background::{background_field, location_seed};
pub use catalog::{CatalogStar, Constellation};
pub use config::{export_file_name, Location, StarMapConfig, StarSize, StyleConfig, TextConfig};
pub use error::StarMapError;
pub use position::{visible_stars, ProjectedStar};
pub use render::{Color, Primitive, RenderScene, ScenePlan};
