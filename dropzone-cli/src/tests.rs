use std::fs;
use std::path::PathBuf;

use bevy_math::DVec2;
use clap::Parser;
use dropzone::maps::MapId;
use dropzone::{Classify, PlannerConfig};
use image::{Rgba, RgbaImage};
use math::Position;

use super::{Command, Options, PlanArgs, load_config, load_mask, parse_point, plan_output};

/// A file path unique to this test process.
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dropzone-{}-{name}", std::process::id()))
}

fn plan_args(extra: &[&str]) -> PlanArgs {
    let args = ["dropzone", "plan", "--start", "0,450", "--end", "900,450", "--target", "450,450"];
    let options = Options::try_parse_from(args.iter().chain(extra)).unwrap();
    let Command::Plan(args) = options.command else { panic!("expected plan command") };
    args
}

/// A 10x10 mask over the default world whose pixel columns 5.. are land, i.e. x >= 405.
fn write_half_land_mask(name: &str) -> PathBuf {
    let path = scratch_path(name);
    RgbaImage::from_fn(10, 10, |x, _| Rgba([255, 255, 255, if x >= 5 { 255 } else { 0 }]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn parse_point_accepts_pairs() {
    assert_eq!(parse_point("12.5,-3").unwrap(), Position::<DVec2>::from_origin(12.5, -3.));
    assert_eq!(parse_point(" 1 , 2 ").unwrap(), Position::<DVec2>::from_origin(1., 2.));
}

#[test]
fn parse_point_rejects_garbage() {
    assert!(parse_point("12").is_err());
    assert!(parse_point("a,1").is_err());
    assert!(parse_point("1,inf").is_err());
}

#[test]
fn plan_arguments() {
    let options = Options::try_parse_from([
        "dropzone", "plan", "--map", "sanhok", "--start", "0,0", "--end", "100,-5", "--target",
        "50,0", "--radius-m", "300",
    ])
    .unwrap();

    let Command::Plan(args) = options.command else { panic!("expected plan command") };
    assert_eq!(args.map, Some(MapId::Sanhok));
    assert_eq!(args.end, Position::from_origin(100., -5.));
    assert_eq!(args.radius_m, Some(300.));
    assert!(args.mask.is_none());
}

#[test]
fn unknown_map_is_rejected() {
    assert!(
        Options::try_parse_from([
            "dropzone", "plan", "--map", "atlantis", "--start", "0,0", "--end", "1,1", "--target",
            "0,0",
        ])
        .is_err()
    );
}

#[test]
fn load_config_defaults_without_file() {
    assert_eq!(load_config(None).unwrap(), PlannerConfig::default());
}

#[test]
fn load_config_reads_partial_json() {
    let path = scratch_path("partial-config.json");
    fs::write(&path, r#"{ "default_map": "karakin", "default_radius_m": 0 }"#).unwrap();
    let config = load_config(Some(path.as_path())).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.default_map, MapId::Karakin);
    assert_eq!(config.default_radius_m, 0.);
    assert_eq!(config.world_extent, 900.);
}

#[test]
fn load_config_rejects_bad_files() {
    assert!(load_config(Some(scratch_path("missing-config.json").as_path())).is_err());

    let path = scratch_path("invalid-config.json");
    fs::write(&path, r#"{ "world_extent": -1 }"#).unwrap();
    let result = load_config(Some(path.as_path()));
    fs::remove_file(&path).unwrap();
    assert!(result.is_err());
}

#[test]
fn load_mask_applies_config() {
    let path = write_half_land_mask("load-mask.png");
    let config = PlannerConfig { mask_alpha_threshold: 0, ..Default::default() };
    let mask = load_mask(&path, &config);
    fs::remove_file(&path).unwrap();

    let mask = mask.unwrap();
    assert_eq!(mask.world_extent(), 900.);
    assert!(!mask.is_land(Position::from_origin(100., 450.)));
    assert!(mask.is_land(Position::from_origin(800., 450.)));
}

#[test]
fn plan_without_mask() {
    let output = plan_output(&plan_args(&["--radius-m", "700"])).unwrap().unwrap();
    // 700 m on Erangel is 78.75 world units
    assert!((output.t - (450. - 78.75) / 900.).abs() < 1e-9, "got {output:?}");
    assert!((output.glide_distance_m - 700.).abs() < 1e-6);
    assert_eq!(output.target, Position::from_origin(450., 450.));

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["landing"][1], 450.);
    assert_eq!(json["target"], serde_json::json!([450., 450.]));
}

#[test]
fn plan_with_mask() {
    let path = write_half_land_mask("plan-mask.png");
    let mask = path.to_str().unwrap().to_owned();
    let output = plan_output(&plan_args(&["--mask", &mask]));
    fs::remove_file(&path).unwrap();

    let output = output.unwrap().unwrap();
    assert!((output.t - 0.45).abs() < 1e-4, "got {output:?}");
}

#[test]
fn plan_with_zero_radius() {
    let output = plan_output(&plan_args(&["--radius-m", "0"])).unwrap().unwrap();
    assert!((output.t - 0.5).abs() < 1e-5, "got {output:?}");

    let args = [
        "dropzone", "plan", "--start", "0,0", "--end", "900,0", "--target", "450,10",
        "--radius-m", "0",
    ];
    let Command::Plan(args) = Options::try_parse_from(args).unwrap().command else {
        panic!("expected plan command")
    };
    assert_eq!(plan_output(&args).unwrap(), None);
}

#[test]
fn plan_rejects_negative_radius() {
    assert!(plan_output(&plan_args(&["--radius-m=-1"])).is_err());
}
