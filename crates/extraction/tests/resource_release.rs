//! The raster handle counter is process-global, so all release
//! observations live in one ordered test.

use std::path::Path;

use extraction::{MetadataExtractor, RasterMetadata};
use geotiff_parser::open_handle_count;
use reprojection::BuiltinReprojector;
use test_utils::{GeoKeySpec, GeoTiffFixture};

#[test]
fn test_no_handle_survives_extraction() {
    let baseline = open_handle_count();
    let extractor = MetadataExtractor::new(BuiltinReprojector::new());

    // Successful extraction
    let fixture = GeoTiffFixture::wgs84(8, 8, (0.0, 0.0, 1.0, 1.0));
    let (_dir, path) = fixture.write_constant_to_temp(1.0).unwrap();
    let mut meta = RasterMetadata::new();
    extractor.extract(&path, &mut meta).unwrap();
    assert_eq!(open_handle_count(), baseline);

    // Resolution failure after the handle was opened
    let broken =
        GeoTiffFixture::wgs84(8, 8, (0.0, 0.0, 1.0, 1.0)).with_geo_keys(GeoKeySpec::Absent);
    let (_dir2, path2) = broken.write_constant_to_temp(1.0).unwrap();
    let mut meta = RasterMetadata::new();
    assert!(extractor.extract(&path2, &mut meta).is_err());
    assert_eq!(open_handle_count(), baseline);

    // Open failure
    let mut meta = RasterMetadata::new();
    assert!(extractor
        .extract(Path::new("/nonexistent/raster.tif"), &mut meta)
        .is_err());
    assert_eq!(open_handle_count(), baseline);
}
