use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use geodraw::cfg::{
    DEFAULT_DISTANCE, DEFAULT_DIVISIONS, DEFAULT_INTERPOLATE_DISTANCE, DEFAULT_SNAP_LIMIT,
};
use geodraw::geodesy::{interpolate, surface_distance};
use geodraw::prelude::*;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Map drawing geometry; prints JSON results")]
struct Cmd {
    /// Write the result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

/// Points are `lon,lat` in degrees; use `--flag=lon,lat` for negative longitudes.
#[derive(Subcommand, Debug, PartialEq)]
enum Action {
    /// Geographic → zoned planar coordinates
    Project {
        #[arg(long, value_parser = parse_point)]
        point: GeoPoint,
    },
    /// Zoned planar coordinates → geographic
    Unproject {
        #[arg(long)]
        zone: i32,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },
    /// Angle (radians) between segments A and C
    Angle {
        #[arg(long, value_parser = parse_point)]
        start_a: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end_a: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        start_c: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end_c: GeoPoint,
    },
    /// Candidate whose direction from the reference best matches the target
    Best {
        #[arg(long, value_parser = parse_point)]
        reference: GeoPoint,
        #[arg(long = "candidate", value_parser = parse_point, required = true)]
        candidates: Vec<GeoPoint>,
        #[arg(long, value_parser = parse_point)]
        target: GeoPoint,
    },
    /// Snap a target onto the line through start and end
    Snap {
        #[arg(long, value_parser = parse_point)]
        start: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        target: GeoPoint,
        #[arg(long, default_value_t = DEFAULT_SNAP_LIMIT)]
        limit: f64,
    },
    /// Regular polygon around end
    Polygon {
        #[arg(long, value_parser = parse_point)]
        start: Option<GeoPoint>,
        #[arg(long, value_parser = parse_point)]
        end: GeoPoint,
        #[arg(long, default_value_t = DEFAULT_DISTANCE)]
        distance: f64,
        #[arg(long, default_value_t = DEFAULT_DIVISIONS)]
        divisions: usize,
    },
    /// Four-point cross around end
    Rectangle {
        #[arg(long, value_parser = parse_point)]
        start: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end: GeoPoint,
        #[arg(long, default_value_t = DEFAULT_DISTANCE)]
        distance: f64,
    },
    /// Right-angle point at p2 towards p3
    Perpendicular {
        #[arg(long, value_parser = parse_point)]
        p1: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        p2: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        p3: GeoPoint,
    },
    /// Geodesic distance (m) on WGS84
    Distance {
        #[arg(long, value_parser = parse_point)]
        start: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end: GeoPoint,
    },
    /// Point a given distance along start → end
    Interpolate {
        #[arg(long, value_parser = parse_point)]
        start: GeoPoint,
        #[arg(long, value_parser = parse_point)]
        end: GeoPoint,
        #[arg(long, default_value_t = DEFAULT_INTERPOLATE_DISTANCE)]
        distance: f64,
    },
    /// Print version, zone table and defaults
    Report,
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lon,lat`, got `{s}`"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude `{lon}`: {e}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude `{lat}`: {e}"))?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("`{s}` is outside [-180,180]×[-90,90]"));
    }
    Ok(GeoPoint::new(lon, lat))
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    check_out(&cmd.out)?;
    let (op, params, result) = run(&cmd.action)?;
    match cmd.out {
        Some(out) => {
            let sidecar = provenance::write_with_sidecar(&out, op, params, &result)?;
            tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "written");
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

/// Execute one action; returns (operation name, parameters, result).
fn run(action: &Action) -> Result<(&'static str, Value, Value)> {
    let proj = default_projector();
    let out = match action {
        Action::Project { point } => {
            tracing::info!(%point, "project");
            let pp = proj.to_planar(*point)?;
            ("project", json!({ "point": point }), planar_json(&pp))
        }
        Action::Unproject { zone, x, y } => {
            tracing::info!(zone, x, y, "unproject");
            let p = proj.to_geographic(&PlanarPoint::new(Zone(*zone), *x, *y))?;
            (
                "unproject",
                json!({ "zone": zone, "x": x, "y": y }),
                json!(p),
            )
        }
        Action::Angle {
            start_a,
            end_a,
            start_c,
            end_c,
        } => {
            tracing::info!(%start_a, %end_a, %start_c, %end_c, "angle");
            let rad = angle_between(proj, *start_a, *end_a, *start_c, *end_c)?;
            (
                "angle",
                json!({ "start_a": start_a, "end_a": end_a, "start_c": start_c, "end_c": end_c }),
                json!({ "radians": rad, "degrees": rad.to_degrees() }),
            )
        }
        Action::Best {
            reference,
            candidates,
            target,
        } => {
            tracing::info!(%reference, candidates = candidates.len(), %target, "best");
            let best = best_point_by_angle(proj, *reference, candidates, *target)?;
            (
                "best",
                json!({ "reference": reference, "candidates": candidates, "target": target }),
                json!(best),
            )
        }
        Action::Snap {
            start,
            end,
            target,
            limit,
        } => {
            tracing::info!(%start, %end, %target, limit, "snap");
            let p = nearest_point_on_segment(proj, *start, *end, *target, *limit)?;
            (
                "snap",
                json!({ "start": start, "end": end, "target": target, "limit": limit }),
                json!({ "point": p, "snapped": p != *target }),
            )
        }
        Action::Polygon {
            start,
            end,
            distance,
            divisions,
        } => {
            tracing::info!(start = ?start, %end, distance, divisions, "polygon");
            let pts = draw_polygon_points(proj, *start, *end, *distance, *divisions)?;
            if pts.is_none() {
                tracing::warn!("start and end coincide; no polygon");
            }
            (
                "polygon",
                json!({ "start": start, "end": end, "distance": distance, "divisions": divisions }),
                json!(pts),
            )
        }
        Action::Rectangle {
            start,
            end,
            distance,
        } => {
            tracing::info!(%start, %end, distance, "rectangle");
            let cross = draw_rectangle_points(proj, *start, *end, *distance)?;
            if cross.is_none() {
                tracing::warn!("segment direction not defined; no cross");
            }
            (
                "rectangle",
                json!({ "start": start, "end": end, "distance": distance }),
                cross.as_ref().map_or(Value::Null, cross_json),
            )
        }
        Action::Perpendicular { p1, p2, p3 } => {
            tracing::info!(%p1, %p2, %p3, "perpendicular");
            let p = perpendicular_point(proj, *p1, *p2, *p3)?;
            (
                "perpendicular",
                json!({ "p1": p1, "p2": p2, "p3": p3 }),
                json!(p),
            )
        }
        Action::Distance { start, end } => {
            tracing::info!(%start, %end, "distance");
            let d = surface_distance(*start, *end)?;
            (
                "distance",
                json!({ "start": start, "end": end }),
                json!({ "meters": truncate_cm(d) }),
            )
        }
        Action::Interpolate {
            start,
            end,
            distance,
        } => {
            tracing::info!(%start, %end, distance, "interpolate");
            let p = interpolate(*start, *end, *distance)?;
            (
                "interpolate",
                json!({ "start": start, "end": end, "distance": distance }),
                json!(p),
            )
        }
        Action::Report => ("report", json!({}), report()),
    };
    Ok(out)
}

/// Drop everything below a centimetre (toward zero).
fn truncate_cm(meters: f64) -> f64 {
    (meters * 100.0).trunc() / 100.0
}

fn planar_json(pp: &PlanarPoint) -> Value {
    json!({ "zone": pp.zone.0, "x": pp.x(), "y": pp.y() })
}

fn cross_json(cross: &CrossPoints) -> Value {
    match cross {
        CrossPoints::Axes { west, south } => json!({
            "kind": "axes",
            "west": west,
            "south": south,
            "points": cross.to_vec(),
        }),
        CrossPoints::Cross {
            left,
            right,
            up,
            down,
        } => json!({
            "kind": "cross",
            "left": left,
            "right": right,
            "up": up,
            "down": down,
            "points": cross.to_vec(),
        }),
    }
}

fn report() -> Value {
    let cfg = DrawCfg::default();
    let zones: Vec<Value> = default_projector()
        .table()
        .zones()
        .filter_map(|z| default_projector().table().get(z))
        .map(|p| json!({ "zone": p.zone.0, "proj": p.proj_string() }))
        .collect();
    json!({
        "code_rev": provenance::code_rev(),
        "version": geodraw::VERSION,
        "zones": zones,
        "defaults": {
            "distance": cfg.distance,
            "divisions": cfg.divisions,
            "snap_limit": cfg.snap_limit,
            "interpolate_distance": cfg.interpolate_distance,
        },
    })
}

/// Reject `--out` pointing at a directory before doing any work.
fn check_out(out: &Option<PathBuf>) -> Result<()> {
    if let Some(p) = out {
        if p.is_dir() {
            bail!("--out {} is a directory", p.display());
        }
    }
    Ok(())
}
