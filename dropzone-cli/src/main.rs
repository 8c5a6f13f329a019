use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bevy::log::tracing_subscriber::{self, EnvFilter};
use bevy_math::DVec2;
use clap::{Parser, Subcommand};
use dropzone::maps::{self, MapId};
use dropzone::mask::{self, LandMask};
use dropzone::{DropPoint, Planner, PlannerConfig};
use math::Position;
use serde::Serialize;
use strum::IntoEnumIterator;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[clap(version, about)]
struct Options {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the earliest jump point on a flight path.
    Plan(PlanArgs),
    /// List the known maps.
    Maps,
    /// Generate a land mask from a map image.
    AutoMask {
        /// Map image to classify.
        map:  PathBuf,
        /// Where to write the mask PNG.
        mask: PathBuf,
        /// Planner config as JSON.
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PlanArgs {
    /// Map identifier, e.g. `erangel`. Defaults to the configured map.
    #[clap(long, value_parser = parse_map)]
    map:      Option<MapId>,
    /// Flight path start as `X,Y` in world units.
    #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
    start:    Position<DVec2>,
    /// Flight path end as `X,Y` in world units.
    #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
    end:      Position<DVec2>,
    /// Desired landing spot as `X,Y` in world units.
    #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
    target:   Position<DVec2>,
    /// Maximum glide distance in meters. Defaults to the configured radius.
    #[clap(long)]
    radius_m: Option<f64>,
    /// Land mask PNG; without one every point is land.
    #[clap(long)]
    mask:     Option<PathBuf>,
    /// Planner config as JSON.
    #[clap(long)]
    config:   Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Options::parse().command {
        Command::Plan(args) => plan(&args),
        Command::Maps => {
            list_maps();
            Ok(())
        }
        Command::AutoMask { map, mask, config } => auto_mask(&map, &mask, config.as_deref()),
    }
}

/// A planned drop as printed by the `plan` command.
#[derive(Debug, PartialEq, Serialize)]
struct DropOutput {
    landing:          Position<DVec2>,
    t:                f64,
    target:           Position<DVec2>,
    glide_distance_m: f64,
}

impl DropOutput {
    fn new(planner: &Planner<'_>, drop: &DropPoint) -> Self {
        Self {
            landing:          drop.position(),
            t:                drop.t(),
            target:           drop.target,
            glide_distance_m: planner.glide_distance_m(drop),
        }
    }
}

fn plan(args: &PlanArgs) -> Result<()> {
    let output = plan_output(args)?;
    println!("{}", serde_json::to_string_pretty(&output).context("serialize drop")?);
    Ok(())
}

fn plan_output(args: &PlanArgs) -> Result<Option<DropOutput>> {
    let config = load_config(args.config.as_deref())?;
    let map = args.map.unwrap_or(config.default_map);
    let mask = args.mask.as_deref().map(|path| load_mask(path, &config)).transpose()?;

    let planner = Planner::new(&config, map).with_mask(mask.as_ref());
    let radius_m = args.radius_m.unwrap_or(config.default_radius_m);
    let request = planner
        .request(args.start, args.end, args.target, radius_m)
        .context("invalid drop request")?;

    Ok(planner.plan(&request).map(|drop| DropOutput::new(&planner, &drop)))
}

fn list_maps() {
    let extent = maps::DEFAULT_WORLD_EXTENT;
    for map in MapId::iter() {
        println!(
            "{map:<8} {label:<8} {size} km  {scale:.3} m/unit",
            label = map.label(),
            size = map.size_km(),
            scale = map.meters_per_unit(extent),
        );
    }
    let radii: Vec<String> = maps::radius_options_m().map(|radius| radius.to_string()).collect();
    println!("drop radii (m): {}", radii.join(", "));
}

fn auto_mask(map_path: &Path, mask_path: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let map = image::open(map_path)
        .with_context(|| format!("open map image {}", map_path.display()))?
        .to_rgba8();
    let mask = mask::auto_mask(&map, &config.water, config.world_extent)
        .context("generate land mask")?;
    mask.image().save(mask_path).with_context(|| format!("write mask {}", mask_path.display()))?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => PlannerConfig::default(),
    };
    config.validate().context("invalid config")?;
    Ok(config)
}

fn load_mask(path: &Path, config: &PlannerConfig) -> Result<LandMask> {
    let image = image::open(path)
        .with_context(|| format!("open mask {}", path.display()))?
        .to_rgba8();
    let mask = LandMask::new(image, config.world_extent)
        .with_context(|| format!("load mask {}", path.display()))?;
    Ok(mask.with_alpha_threshold(config.mask_alpha_threshold))
}

fn parse_map(id: &str) -> Result<MapId> { Ok(MapId::parse(id)?) }

/// Parses `X,Y` into a world position.
fn parse_point(input: &str) -> Result<Position<DVec2>> {
    let Some((x, y)) = input.split_once(',') else {
        bail!("expected X,Y, got {input:?}");
    };
    let x: f64 = x.trim().parse().with_context(|| format!("invalid x coordinate {x:?}"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("invalid y coordinate {y:?}"))?;
    if !(x.is_finite() && y.is_finite()) {
        bail!("coordinates must be finite, got {input:?}");
    }
    Ok(Position::from_origin(x, y))
}
