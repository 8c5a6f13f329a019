use bevy_math::DVec2;
use image::{Rgba, RgbaImage};
use math::{Length, Position};

use super::{DropRequest, Planner, plan_drop};
use crate::maps::MapId;
use crate::mask::LandMask;
use crate::{AlwaysLand, Error, PlannerConfig, ScanParams};

fn request(start: [f64; 2], end: [f64; 2], target: [f64; 2], radius: f64) -> DropRequest {
    DropRequest {
        start:  Position::from_origin(start[0], start[1]),
        end:    Position::from_origin(end[0], end[1]),
        target: Position::from_origin(target[0], target[1]),
        radius: Length::new(radius),
    }
}

#[test]
fn from_parts_requires_every_point() {
    let point = Some(Position::from_origin(1., 2.));
    let radius = Length::new(5.);
    assert!(DropRequest::from_parts(point, point, point, radius).is_some());
    assert_eq!(DropRequest::from_parts(None, point, point, radius), None);
    assert_eq!(DropRequest::from_parts(point, None, point, radius), None);
    assert_eq!(DropRequest::from_parts(point, point, None, radius), None);
}

#[test]
fn plan_over_land_jumps_at_entry() {
    let drop = plan_drop(
        &request([0., 0.], [100., 0.], [50., 0.], 10.),
        &AlwaysLand,
        &ScanParams::default(),
    )
    .unwrap();

    assert!((drop.t() - 0.4).abs() < 1e-9);
    assert!(drop.position().distance_exact(Position::from_origin(40., 0.)).0 < 1e-9);
    assert!((drop.glide_vector().x().0 - 10.).abs() < 1e-9);
    assert!((drop.glide_distance().0 - 10.).abs() < 1e-9);
}

#[test]
fn plan_skips_water() {
    let classifier = |position: Position<DVec2>| position.x() >= 55.;
    let drop = plan_drop(
        &request([0., 0.], [100., 0.], [50., 0.], 10.),
        &classifier,
        &ScanParams::default(),
    )
    .unwrap();

    assert!((drop.t() - 0.55).abs() < 1e-4);
    assert!((drop.glide_distance().0 - 5.).abs() < 1e-2);
}

#[test]
fn plan_out_of_reach() {
    let drop = plan_drop(
        &request([0., 0.], [10., 0.], [100., 100.], 5.),
        &AlwaysLand,
        &ScanParams::default(),
    );
    assert_eq!(drop, None);
}

#[test]
fn planner_converts_radius_from_meters() {
    let config = PlannerConfig::default();
    let planner = Planner::new(&config, MapId::Erangel);
    let start = Position::from_origin(0., 0.);
    let request = planner.request(start, start, start, 700.).unwrap();
    assert!((request.radius.0 - 78.75).abs() < 1e-9);

    assert!(matches!(planner.request(start, start, start, -1.), Err(Error::InvalidRadius(_))));
}

#[test]
fn planner_without_mask_treats_everything_as_land() {
    let config = PlannerConfig { world_extent: 100., ..Default::default() };
    let planner = Planner::new(&config, MapId::Karakin);
    let request = planner
        .request(
            Position::from_origin(0., 50.),
            Position::from_origin(100., 50.),
            Position::from_origin(50., 50.),
            200.,
        )
        .unwrap();

    let drop = planner.plan(&request).unwrap();
    assert!((drop.t() - 0.4).abs() < 1e-9);
    assert!((planner.glide_distance_m(&drop) - 200.).abs() < 1e-6);
}

#[test]
fn planner_with_mask_skips_water() {
    // 10x10 raster over 100 units; pixel columns 5.. are land, i.e. x >= 45
    let raster =
        RgbaImage::from_fn(10, 10, |x, _| Rgba([255, 255, 255, if x >= 5 { 255 } else { 0 }]));
    let config = PlannerConfig { world_extent: 100., ..Default::default() };
    let mask = LandMask::new(raster, config.world_extent).unwrap();
    let planner = Planner::new(&config, MapId::Karakin).with_mask(Some(&mask));

    let request = planner
        .request(
            Position::from_origin(0., 50.),
            Position::from_origin(100., 50.),
            Position::from_origin(50., 50.),
            200.,
        )
        .unwrap();
    let drop = planner.plan(&request).unwrap();

    assert!((drop.t() - 0.45).abs() < 1e-4, "got t = {}", drop.t());
    assert!((planner.glide_distance_m(&drop) - 100.).abs() < 0.5);
}

#[test]
fn planner_accepts_zero_radius() {
    let config = PlannerConfig::default();
    let planner = Planner::new(&config, MapId::Erangel);

    let off_path = planner
        .request(
            Position::from_origin(0., 0.),
            Position::from_origin(100., 0.),
            Position::from_origin(50., 10.),
            0.,
        )
        .unwrap();
    assert_eq!(off_path.radius, Length::<f64>::ZERO);
    assert_eq!(planner.plan(&off_path), None);

    let on_path = DropRequest { target: Position::from_origin(50., 0.), ..off_path };
    let drop = planner.plan(&on_path).unwrap();
    assert!((drop.t() - 0.5).abs() < 1e-5, "got t = {}", drop.t());
    assert!(planner.glide_distance_m(&drop) < 0.01);
}
