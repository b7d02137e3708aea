//! GeoTIFF tag and GeoKey identifiers.
//!
//! Tag numbers follow the GeoTIFF specification (OGC 19-008r4). The `tiff`
//! crate addresses them through `Tag::Unknown`.

/// ModelPixelScaleTag: [ScaleX, ScaleY, ScaleZ]
pub const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
/// ModelTiepointTag: [I, J, K, X, Y, Z] tuples tying raster to model space
pub const TAG_MODEL_TIEPOINT: u16 = 33922;
/// ModelTransformationTag: 4x4 row-major affine matrix
pub const TAG_MODEL_TRANSFORMATION: u16 = 34264;
/// GeoKeyDirectoryTag: array of SHORT key entries
pub const TAG_GEO_KEY_DIRECTORY: u16 = 34735;
/// GeoAsciiParamsTag: pipe-delimited ASCII values referenced by keys
pub const TAG_GEO_ASCII_PARAMS: u16 = 34737;

/// GTModelTypeGeoKey: overall model type (projected/geographic/geocentric)
pub const GEO_KEY_MODEL_TYPE: u16 = 1024;
/// GTCitationGeoKey: free-text description of the coordinate system
pub const GEO_KEY_CITATION: u16 = 1026;
/// GeographicTypeGeoKey: geographic CS code
pub const GEO_KEY_GEOGRAPHIC_TYPE: u16 = 2048;
/// GeogCitationGeoKey: geographic CS citation
pub const GEO_KEY_GEOG_CITATION: u16 = 2049;
/// ProjectedCSTypeGeoKey: projected CS code
pub const GEO_KEY_PROJECTED_CRS: u16 = 3072;
/// PCSCitationGeoKey: projected CS citation
pub const GEO_KEY_PCS_CITATION: u16 = 3073;

/// GTModelTypeGeoKey value for projected coordinate systems
pub const MODEL_TYPE_PROJECTED: u16 = 1;
/// GTModelTypeGeoKey value for geographic coordinate systems
pub const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
/// GTModelTypeGeoKey value for geocentric coordinate systems
pub const MODEL_TYPE_GEOCENTRIC: u16 = 3;

/// Key value meaning "user-defined", not a registry code
pub const USER_DEFINED: u16 = 32767;
