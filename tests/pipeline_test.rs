//! Integration tests: run the full computation pipeline for real observer
//! configurations and verify the documented end-to-end properties —
//! determinism, the rotation-only time dependence of the background field,
//! boundary behavior of the visibility filters, and raster/vector parity.

use chrono::{DateTime, TimeZone, Utc};
use nalgebra::Point2;
use starmap::render::{raster, svg};
use starmap::{
    background_field, visible_stars, Location, ObserverContext, Primitive, RenderScene,
    StarMapConfig, StarMapError, StarSize, StyleConfig, TextConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
}

fn new_york_config(instant: DateTime<Utc>) -> StarMapConfig {
    StarMapConfig {
        location: Location {
            name: "New York, USA".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
        },
        instant,
        text: TextConfig {
            title: "Our Special Day".to_string(),
            subtitle: String::new(),
            caption: String::new(),
        },
        style: StyleConfig {
            star_color: "#FFFFFF".to_string(),
            background_color: "#0F172A".to_string(),
            constellation_lines: true,
            star_size: StarSize::Medium,
            show_grid: false,
            magnitude_limit: 3.0,
        },
    }
}

fn solstice() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap()
}

#[test]
fn background_field_is_deterministic() {
    init_tracing();
    let observer = ObserverContext::new(40.7128, -74.006, solstice()).unwrap();
    let a = background_field(200, &observer);
    let b = background_field(200, &observer);
    assert_eq!(a.len(), 200);
    assert_eq!(a, b);
}

#[test]
fn background_field_rotates_with_sidereal_time() {
    init_tracing();
    let d1 = solstice();
    let d2 = Utc.with_ymd_and_hms(2024, 12, 21, 8, 30, 0).unwrap();
    let o1 = ObserverContext::new(40.7128, -74.006, d1).unwrap();
    let o2 = ObserverContext::new(40.7128, -74.006, d2).unwrap();

    let f1 = background_field(200, &o1);
    let f2 = background_field(200, &o2);
    let expected = (o2.local_sidereal_time() - o1.local_sidereal_time()).to_radians();

    let center = Point2::new(300.0, 300.0);
    let tau = std::f64::consts::TAU;
    for (s1, s2) in f1.iter().zip(&f2) {
        let r1 = (s1.position - center).norm();
        let r2 = (s2.position - center).norm();
        assert!((r1 - r2).abs() < 1e-9);
        if r1 > 1e-6 {
            let a1 = (s1.position.y - center.y).atan2(s1.position.x - center.x);
            let a2 = (s2.position.y - center.y).atan2(s2.position.x - center.x);
            let delta = (a2 - a1 - expected).rem_euclid(tau);
            assert!(delta < 1e-6 || tau - delta < 1e-6, "rotation delta off: {delta}");
        }
    }
}

#[test]
fn magnitude_limit_below_catalog_minimum_sees_nothing() {
    init_tracing();
    // Documented scenario: equator, prime meridian, 2024-06-21, limit -2.
    let observer = ObserverContext::new(0.0, 0.0, solstice()).unwrap();
    assert!(visible_stars(&observer, -2.0).is_empty());

    let mut config = new_york_config(solstice());
    config.style.magnitude_limit = -2.0;
    let scene = RenderScene::new(config).unwrap();
    assert!(scene.foreground.is_empty());
    assert_eq!(scene.background.len(), 200);
}

#[test]
fn invalid_positions_fail_fast() {
    let mut config = new_york_config(solstice());
    config.location.latitude = -91.0;
    assert!(matches!(
        RenderScene::new(config),
        Err(StarMapError::InvalidObserverPosition { .. })
    ));
}

#[test]
fn raster_and_vector_agree_on_visible_content() {
    init_tracing();
    let mut config = new_york_config(solstice());
    config.style.show_grid = true;
    let scene = RenderScene::new(config).unwrap();
    let plan = scene.plan();
    let doc = svg::render(&scene);

    // Foreground dots: full-opacity filled circles.
    let foreground_dots = plan.count_matching(
        |p| matches!(p, Primitive::FilledCircle { opacity, .. } if *opacity == 1.0),
    );
    assert_eq!(foreground_dots, scene.foreground.len());
    assert_eq!(doc.matches(r#" opacity="1.00"/>"#).count(), foreground_dots);

    // Background dots at 30% opacity.
    assert_eq!(doc.matches(r#" opacity="0.30"/>"#).count(), 200);

    // Halos: every foreground star brighter than mag 2.
    let bright = scene.foreground.iter().filter(|s| s.magnitude < 2.0).count();
    assert_eq!(doc.matches("url(#glow)").count(), bright);
    assert_eq!(
        plan.count_matching(|p| matches!(p, Primitive::Halo { .. })),
        bright
    );

    // Grid: exactly 3 concentric circles and 12 spokes, regardless of stars.
    let grid_circles = plan.count_matching(
        |p| matches!(p, Primitive::StrokedCircle { radius, .. } if *radius < 280.0),
    );
    assert_eq!(grid_circles, 3);
    let lines = plan.count_matching(
        |p| matches!(p, Primitive::LineSegment { opacity, .. } if *opacity == 0.5),
    );
    assert_eq!(lines, 12);

    // Raster surface paints a bright pixel at every foreground star center.
    let mut surface = image::RgbaImage::new(600, 600);
    raster::render(&scene, &mut surface).unwrap();
    for star in &scene.foreground {
        let px = surface.get_pixel(star.position.x.round() as u32, star.position.y.round() as u32);
        let image::Rgba([r, g, b, _]) = *px;
        assert!(
            r > 100 && g > 100 && b > 100,
            "star {:?} at {:?} not painted: {px:?}",
            star.name,
            star.position
        );
    }
}

#[test]
fn constellation_lines_track_the_visible_subset() {
    init_tracing();
    // Lines are drawn only between currently visible stars, so tightening
    // the magnitude limit can only remove segments, never misdraw them.
    let mut config = new_york_config(solstice());
    config.style.magnitude_limit = 5.0;
    let loose = RenderScene::new(config.clone()).unwrap();
    config.style.magnitude_limit = 1.0;
    let tight = RenderScene::new(config).unwrap();

    let count_lines = |scene: &RenderScene| {
        scene.plan().count_matching(
            |p| matches!(p, Primitive::LineSegment { opacity, .. } if *opacity == 0.7),
        )
    };
    assert!(count_lines(&loose) > 0);
    assert!(count_lines(&tight) <= count_lines(&loose));
}

#[test]
fn png_export_decodes_to_the_requested_size() {
    init_tracing();
    let scene = RenderScene::new(new_york_config(solstice())).unwrap();
    let bytes = raster::render_png(&scene, 600, 600).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (600, 600));
    assert!(raster::render_png(&scene, 0, 600).is_err());
}

#[test]
fn scene_building_is_reproducible_end_to_end() {
    init_tracing();
    let config = new_york_config(solstice());
    let a = svg::render(&RenderScene::new(config.clone()).unwrap());
    let b = svg::render(&RenderScene::new(config.clone()).unwrap());
    assert_eq!(a, b);

    let mut s1 = image::RgbaImage::new(300, 300);
    let mut s2 = image::RgbaImage::new(300, 300);
    let scene = RenderScene::new(config).unwrap();
    raster::render(&scene, &mut s1).unwrap();
    raster::render(&scene, &mut s2).unwrap();
    assert_eq!(s1.as_raw(), s2.as_raw());
}
