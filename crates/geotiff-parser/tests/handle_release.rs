//! The open-handle counter is process-global, so every assertion lives in
//! one test to keep the observations ordered.

use geotiff_parser::{open_handle_count, RasterHandle};
use test_utils::GeoTiffFixture;

#[test]
fn test_handles_release_on_every_path() {
    let baseline = open_handle_count();

    let fixture = GeoTiffFixture::wgs84(8, 8, (0.0, 0.0, 1.0, 1.0));
    let (_dir, path) = fixture.write_constant_to_temp(1.0).unwrap();

    // Plain open and drop
    {
        let _handle = RasterHandle::open(&path).unwrap();
        assert_eq!(open_handle_count(), baseline + 1);
    }
    assert_eq!(open_handle_count(), baseline);

    // The decoded grid nests inside the handle scope; dropping both
    // releases everything
    {
        let mut handle = RasterHandle::open(&path).unwrap();
        let _grid = handle.read_grid().unwrap();
        assert_eq!(open_handle_count(), baseline + 1);
    }
    assert_eq!(open_handle_count(), baseline);

    // A failed open never registers a handle
    assert!(RasterHandle::open(std::path::Path::new("/nonexistent.tif")).is_err());
    assert_eq!(open_handle_count(), baseline);
}
