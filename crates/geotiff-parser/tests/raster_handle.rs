//! Fixture-driven tests for raster opening, georeferencing, and decode.

use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use geotiff_parser::{GeoTiffError, RasterHandle};
use raster_common::CrsModelType;
use test_utils::{assert_approx_eq, GeoKeySpec, GeoTiffFixture};

fn open(path: &Path) -> RasterHandle {
    RasterHandle::open(path).unwrap()
}

#[test]
fn test_open_reads_dimensions_and_bands() {
    let fixture = GeoTiffFixture::wgs84(64, 32, (-10.0, 40.0, -5.0, 45.0));
    let (_dir, path) = fixture.write_constant_to_temp(1.0).unwrap();

    let handle = open(&path);
    assert_eq!(handle.width(), 64);
    assert_eq!(handle.height(), 32);
    assert_eq!(handle.bands(), 1);
}

#[test]
fn test_three_band_fixture_reports_three_bands() {
    let fixture = GeoTiffFixture::wgs84(8, 8, (0.0, 0.0, 8.0, 8.0)).with_bands(3);
    let (_dir, path) = fixture.write_constant_to_temp(10.0).unwrap();

    let handle = open(&path);
    assert_eq!(handle.bands(), 3);
}

#[test]
fn test_non_tiff_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not-a-raster.tif");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"plain text, no TIFF magic")
        .unwrap();

    match RasterHandle::open(&path) {
        Err(GeoTiffError::NotGeoTiff(_)) => {}
        other => panic!("expected NotGeoTiff, got {other:?}"),
    }
}

#[test]
fn test_geographic_crs_definition() {
    let fixture = GeoTiffFixture::wgs84(16, 16, (-10.0, 40.0, -5.0, 45.0));
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    let def = open(&path).crs_definition().unwrap();
    assert_eq!(def.model, CrsModelType::Geographic);
    assert_eq!(def.geographic_code, Some(4326));
}

#[test]
fn test_projected_crs_definition() {
    let fixture = GeoTiffFixture::projected(32620, 16, 16, (700_000.0, 1_610_000.0, 716_000.0, 1_620_000.0));
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    let def = open(&path).crs_definition().unwrap();
    assert_eq!(def.model, CrsModelType::Projected);
    assert_eq!(def.projected_code, Some(32620));
}

#[test]
fn test_user_defined_crs_carries_citation() {
    let fixture = GeoTiffFixture::wgs84(16, 16, (0.0, 0.0, 1.0, 1.0)).with_geo_keys(
        GeoKeySpec::UserDefined {
            citation: Some("Custom Azimuthal Grid".to_string()),
        },
    );
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    let def = open(&path).crs_definition().unwrap();
    assert_eq!(def.projected_code, Some(32767));
    assert_eq!(def.name(), "Custom Azimuthal Grid");
}

#[test]
fn test_absent_geokeys_yield_empty_definition() {
    let fixture =
        GeoTiffFixture::wgs84(16, 16, (0.0, 0.0, 1.0, 1.0)).with_geo_keys(GeoKeySpec::Absent);
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    let def = open(&path).crs_definition().unwrap();
    assert!(def.is_empty());
    assert_eq!(def.name(), "Unknown");
}

#[test]
fn test_native_envelope_from_tiepoint_and_scale() {
    let fixture = GeoTiffFixture::wgs84(500, 500, (-10.0, 40.0, -5.0, 45.0));
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    let envelope = open(&path).native_envelope().unwrap();
    assert_approx_eq!(envelope.lower[0], -10.0, 1e-9);
    assert_approx_eq!(envelope.lower[1], 40.0, 1e-9);
    assert_approx_eq!(envelope.upper[0], -5.0, 1e-9);
    assert_approx_eq!(envelope.upper[1], 45.0, 1e-9);
}

#[test]
fn test_missing_georeferencing_is_an_error() {
    let mut fixture = GeoTiffFixture::wgs84(16, 16, (0.0, 0.0, 1.0, 1.0));
    fixture.georeferenced = false;
    let (_dir, path) = fixture.write_constant_to_temp(0.0).unwrap();

    match open(&path).native_envelope() {
        Err(GeoTiffError::MissingGeoreferencing(_)) => {}
        other => panic!("expected MissingGeoreferencing, got {other:?}"),
    }
}

#[test]
fn test_read_grid_round_trips_sample_values() {
    let fixture = GeoTiffFixture::wgs84(4, 3, (0.0, 0.0, 4.0, 3.0));
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradient.tif");
    fixture
        .write_with(&path, |x, y, _| f64::from(x) + 10.0 * f64::from(y))
        .unwrap();

    let grid = open(&path).read_grid().unwrap();
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.bands(), 1);
    assert_approx_eq!(grid.sample(0, 0, 0), 0.0, 1e-6);
    assert_approx_eq!(grid.sample(3, 0, 0), 3.0, 1e-6);
    assert_approx_eq!(grid.sample(1, 2, 0), 21.0, 1e-6);
}

#[test]
fn test_read_grid_interleaves_bands() {
    let fixture = GeoTiffFixture::wgs84(2, 2, (0.0, 0.0, 2.0, 2.0)).with_bands(3);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rgb.tif");
    fixture
        .write_with(&path, |_, _, band| f64::from(band) * 50.0)
        .unwrap();

    let grid = open(&path).read_grid().unwrap();
    assert_eq!(grid.bands(), 3);
    assert_approx_eq!(grid.sample(1, 1, 0), 0.0, 1e-6);
    assert_approx_eq!(grid.sample(1, 1, 1), 50.0, 1e-6);
    assert_approx_eq!(grid.sample(1, 1, 2), 100.0, 1e-6);
}
