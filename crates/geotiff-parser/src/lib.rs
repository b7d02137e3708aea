//! GeoTIFF raster access.
//!
//! This crate wraps the `tiff` decoder with the georeferencing layer the
//! extraction pipeline needs:
//!
//! - `RasterHandle`: an open raster resource (file + decoder state) with
//!   RAII release and an observable open-handle count
//! - GeoKey directory parsing into a [`raster_common::CrsDefinition`]
//! - Native envelope computation from ModelTiepoint/ModelPixelScale (or a
//!   ModelTransformation matrix)
//! - Whole-grid decode into a `DecodedGrid` of `f64` samples
//! - A one-time, process-wide decoder backend toggle

pub mod backend;
pub mod error;
pub mod geokeys;
mod reader;
pub mod tags;

pub use backend::{init_decoder_backend, DecoderBackend};
pub use error::{GeoTiffError, Result};
pub use reader::{open_handle_count, DecodedGrid, NativeEnvelope, RasterHandle};
