use super::*;
use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn zone_selection_rounds_longitude_over_three() {
    assert_eq!(Zone::of_longitude(120.0), Zone(40));
    assert_eq!(Zone::of_longitude(121.4), Zone(40));
    assert_eq!(Zone::of_longitude(121.6), Zone(41));
    assert_eq!(Zone::of_longitude(75.0), Zone(25));
}

#[test]
fn default_table_covers_cgcs2000_bands() {
    let table = ZoneTable::default();
    assert_eq!(table.len(), 21);
    let zones: Vec<_> = table.zones().collect();
    assert_eq!(zones.first(), Some(&Zone(25)));
    assert_eq!(zones.last(), Some(&Zone(45)));
    let p = table.get(Zone(40)).unwrap();
    assert_eq!(p.central_meridian, 120.0);
    assert_eq!(p.false_easting, 40_500_000.0);
    assert_eq!(p.false_northing, 0.0);
    assert_eq!(p.ellipsoid, GRS80);
    assert_eq!(
        p.proj_string(),
        "+proj=tmerc +lat_0=0 +lon_0=120 +k=1 +x_0=40500000 +y_0=0 +ellps=GRS80 +units=m +no_defs"
    );
}

#[test]
fn unsupported_zone_is_an_error() {
    let proj = Projector::default();
    let err = proj.to_planar(GeoPoint::new(-74.0, 40.7)).unwrap_err();
    assert_eq!(err, GeomError::UnsupportedZone { zone: -25 });
    let err = proj
        .to_geographic(&PlanarPoint::new(Zone(46), 46_500_000.0, 0.0))
        .unwrap_err();
    assert_eq!(err, GeomError::UnsupportedZone { zone: 46 });
}

#[test]
fn planar_point_carries_its_zone() {
    let pp = to_planar(GeoPoint::new(120.01, 30.0)).unwrap();
    assert_eq!(pp.zone, Zone(40));
    // Leading digits of x encode the zone for this table.
    assert_eq!((pp.x() / 1_000_000.0).floor() as i32, 40);
    assert!(pp.x() > 40_500_000.0);
}

#[test]
fn round_trip_within_zone_seeded() {
    let proj = Projector::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let zone = rng.gen_range(25..=45);
        let lon = f64::from(zone) * 3.0 + rng.gen_range(-1.5..1.5);
        let lat = rng.gen_range(-80.0..80.0);
        let p = GeoPoint::new(lon, lat);
        let back = proj.to_geographic(&proj.to_planar(p).unwrap()).unwrap();
        assert_abs_diff_eq!(back.longitude, lon, epsilon = 1e-6);
        assert_abs_diff_eq!(back.latitude, lat, epsilon = 1e-6);
    }
}

#[test]
fn projecting_into_neighbour_zone_still_round_trips() {
    let proj = Projector::default();
    let p = GeoPoint::new(121.49, 31.2);
    let pp = proj.to_planar_in(Zone(41), p).unwrap();
    assert_eq!(pp.zone, Zone(41));
    let back = proj.to_geographic(&pp).unwrap();
    assert_abs_diff_eq!(back.longitude, p.longitude, epsilon = 1e-9);
    assert_abs_diff_eq!(back.latitude, p.latitude, epsilon = 1e-9);
}

#[test]
fn custom_table_later_duplicates_win() {
    let table = ZoneTable::from_params([
        ZoneParams::three_degree(Zone(2), WGS84),
        ZoneParams {
            false_easting: 500_000.0,
            ..ZoneParams::three_degree(Zone(2), WGS84)
        },
        ZoneParams::three_degree(Zone(1), WGS84),
    ]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.zones().collect::<Vec<_>>(), vec![Zone(1), Zone(2)]);
    assert_eq!(table.get(Zone(2)).unwrap().false_easting, 500_000.0);

    let proj = Projector::new(table);
    let pp = proj.to_planar(GeoPoint::new(6.0, 0.0)).unwrap();
    assert_abs_diff_eq!(pp.x(), 500_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(pp.y(), 0.0, epsilon = 1e-6);
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let proj = Projector::default();
    for (x, y) in [(f64::NAN, f64::NAN), (40_500_000.0, f64::NAN), (f64::INFINITY, 3.3e6)] {
        assert_eq!(
            proj.to_geographic(&PlanarPoint::new(Zone(40), x, y)),
            Err(GeomError::NonFinite)
        );
    }
    assert_eq!(
        proj.to_planar_in(Zone(40), GeoPoint::new(120.0, f64::NAN)),
        Err(GeomError::NonFinite)
    );
    // NaN longitude must not fall through to a zone lookup.
    assert_eq!(
        proj.to_planar(GeoPoint::new(f64::NAN, 30.0)),
        Err(GeomError::NonFinite)
    );
}
