//! Walk through the drawing tools for a pair of map clicks.
//!
//! Usage:
//!   cargo run -p geodraw --example two_clicks
//!   cargo run -p geodraw --example two_clicks -- 116.39 39.90 116.41 39.91
//!
//! Prints the octagon, the cross, a snapped point and a right-angle point for
//! the segment between the two clicks.

use geodraw::geodesy::surface_distance;
use geodraw::prelude::*;

fn main() {
    let args: Vec<f64> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    let (start, end) = match args.as_slice() {
        [a, b, c, d] => (GeoPoint::new(*a, *b), GeoPoint::new(*c, *d)),
        _ => (GeoPoint::new(120.0, 30.0), GeoPoint::new(120.01, 30.0)),
    };
    let cfg = DrawCfg::default();
    let proj = default_projector();

    match surface_distance(start, end) {
        Ok(d) => println!("segment {start} -> {end}: {d:.2} m"),
        Err(e) => println!("segment {start} -> {end}: {e}"),
    }

    match draw_polygon_points(proj, Some(start), end, cfg.distance, cfg.divisions) {
        Ok(Some(pts)) => {
            println!("polygon ({} points):", pts.len());
            for p in pts {
                println!("  {p}");
            }
        }
        Ok(None) => println!("polygon: no direction"),
        Err(e) => println!("polygon: {e}"),
    }

    match draw_rectangle_points(proj, start, end, cfg.distance) {
        Ok(Some(cross)) => println!("cross: {cross:?}"),
        Ok(None) => println!("cross: no direction"),
        Err(e) => println!("cross: {e}"),
    }

    let loose = GeoPoint::new(
        (start.longitude + end.longitude) / 2.0,
        (start.latitude + end.latitude) / 2.0 + 0.00002,
    );
    match nearest_point_on_segment(proj, start, end, loose, cfg.snap_limit) {
        Ok(p) => println!("snap {loose} -> {p}"),
        Err(e) => println!("snap: {e}"),
    }

    let third = GeoPoint::new(end.longitude + 0.005, end.latitude + 0.005);
    match perpendicular_point(proj, start, end, third) {
        Ok(p) => println!("right angle at {end} towards {third}: {p}"),
        Err(e) => println!("right angle: {e}"),
    }
}
