//! Open raster handles and whole-grid decoding.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use num_traits::ToPrimitive;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use raster_common::CrsDefinition;

use crate::backend;
use crate::error::{GeoTiffError, Result};
use crate::geokeys;
use crate::tags::{
    TAG_GEO_ASCII_PARAMS, TAG_GEO_KEY_DIRECTORY, TAG_MODEL_PIXEL_SCALE, TAG_MODEL_TIEPOINT,
    TAG_MODEL_TRANSFORMATION,
};

static OPEN_HANDLES: AtomicUsize = AtomicUsize::new(0);

/// Number of raster handles currently open in this process.
///
/// Handles release on drop; after any extraction attempt the count returns
/// to its prior value, which tests use to prove the release discipline.
pub fn open_handle_count() -> usize {
    OPEN_HANDLES.load(Ordering::SeqCst)
}

/// The raster's bounding envelope in its native CRS.
///
/// A pair of corner positions; only axes 0 and 1 carry information for 2D
/// rasters, axis 2 is reserved for elevation-aware formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeEnvelope {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

/// An open raster resource.
///
/// Owns the file and the TIFF decoder state. The resource is released when
/// the handle drops, on every exit path.
#[derive(Debug)]
pub struct RasterHandle {
    decoder: Decoder<BufReader<File>>,
    width: u32,
    height: u32,
    bands: u16,
}

impl RasterHandle {
    /// Open a raster file and validate its header.
    ///
    /// Fails with [`GeoTiffError::NotGeoTiff`] when the file is not
    /// decodable as a TIFF at all, and rejects zero-sized rasters so later
    /// stages can divide by pixel counts unguarded.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| GeoTiffError::NotGeoTiff(e.to_string()))?
            .with_limits(backend::decoder_limits());

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| GeoTiffError::NotGeoTiff(e.to_string()))?;
        if width == 0 || height == 0 {
            return Err(GeoTiffError::ZeroDimensions { width, height });
        }

        let bands = match decoder.find_tag(Tag::SamplesPerPixel)? {
            Some(_) => decoder.get_tag_u32(Tag::SamplesPerPixel)? as u16,
            None => 1,
        };

        OPEN_HANDLES.fetch_add(1, Ordering::SeqCst);
        debug!(path = %path.display(), width, height, bands, "opened raster");

        Ok(Self {
            decoder,
            width,
            height,
            bands,
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of sample dimensions (bands) per pixel.
    pub fn bands(&self) -> u16 {
        self.bands
    }

    /// Decode the CRS definition embedded in the raster's GeoKeys.
    ///
    /// A raster without a GeoKey directory yields an empty definition; the
    /// resolver downstream turns that into an unknown-CRS failure.
    pub fn crs_definition(&mut self) -> Result<CrsDefinition> {
        if self
            .decoder
            .find_tag(Tag::from_u16_exhaustive(TAG_GEO_KEY_DIRECTORY))?
            .is_none()
        {
            return Ok(CrsDefinition::default());
        }

        let directory = self
            .decoder
            .get_tag_u16_vec(Tag::from_u16_exhaustive(TAG_GEO_KEY_DIRECTORY))?;

        let ascii = if self
            .decoder
            .find_tag(Tag::from_u16_exhaustive(TAG_GEO_ASCII_PARAMS))?
            .is_some()
        {
            Some(
                self.decoder
                    .get_tag_ascii_string(Tag::from_u16_exhaustive(TAG_GEO_ASCII_PARAMS))?,
            )
        } else {
            None
        };

        geokeys::crs_definition(&directory, ascii.as_deref())
    }

    /// Compute the raster's bounding envelope in its native CRS.
    ///
    /// Prefers ModelTiepoint + ModelPixelScale; falls back to a
    /// ModelTransformation matrix. The corner ordering follows the raster
    /// layout (row 0 at maximum Y), not min/max sorting.
    pub fn native_envelope(&mut self) -> Result<NativeEnvelope> {
        let scale = self.read_f64_tag(TAG_MODEL_PIXEL_SCALE, 3)?;
        let tiepoint = self.read_f64_tag(TAG_MODEL_TIEPOINT, 6)?;

        if let (Some(scale), Some(tie)) = (scale, tiepoint) {
            // Tiepoint maps raster (i, j) to model (x, y); Y decreases with
            // increasing row index.
            let origin_x = tie[3] - tie[0] * scale[0];
            let origin_y = tie[4] + tie[1] * scale[1];
            let far_x = origin_x + f64::from(self.width) * scale[0];
            let far_y = origin_y - f64::from(self.height) * scale[1];

            return Ok(NativeEnvelope {
                lower: [origin_x, far_y, 0.0],
                upper: [far_x, origin_y, 0.0],
            });
        }

        if let Some(m) = self.read_f64_tag(TAG_MODEL_TRANSFORMATION, 16)? {
            let w = f64::from(self.width);
            let h = f64::from(self.height);
            let corner0 = [m[3], m[7], 0.0];
            let corner1 = [m[0] * w + m[1] * h + m[3], m[4] * w + m[5] * h + m[7], 0.0];

            return Ok(NativeEnvelope {
                lower: corner0,
                upper: corner1,
            });
        }

        Err(GeoTiffError::MissingGeoreferencing(
            "ModelTiepoint/ModelPixelScale or ModelTransformation",
        ))
    }

    /// Decode the full pixel grid into interleaved `f64` samples.
    ///
    /// The grid is materialized whole; callers that cannot afford that for
    /// very large rasters should bound input sizes upstream.
    pub fn read_grid(&mut self) -> Result<DecodedGrid> {
        let decoded = self
            .decoder
            .read_image()
            .map_err(|e| GeoTiffError::Decode(e.to_string()))?;

        let samples = match decoded {
            DecodingResult::U8(v) => widen(v),
            DecodingResult::U16(v) => widen(v),
            DecodingResult::U32(v) => widen(v),
            DecodingResult::U64(v) => widen(v),
            DecodingResult::I8(v) => widen(v),
            DecodingResult::I16(v) => widen(v),
            DecodingResult::I32(v) => widen(v),
            DecodingResult::I64(v) => widen(v),
            DecodingResult::F32(v) => widen(v),
            DecodingResult::F64(v) => v,
        };

        let width = self.width as usize;
        let height = self.height as usize;
        let bands = self.bands as usize;
        let expected = width * height * bands;
        if samples.len() != expected {
            return Err(GeoTiffError::Decode(format!(
                "sample count mismatch: expected {expected}, decoded {}",
                samples.len()
            )));
        }

        debug!(samples = samples.len(), bands, "decoded raster grid");

        Ok(DecodedGrid {
            samples,
            width,
            height,
            bands,
        })
    }

    fn read_f64_tag(&mut self, tag: u16, min_len: usize) -> Result<Option<Vec<f64>>> {
        if self.decoder.find_tag(Tag::from_u16_exhaustive(tag))?.is_none() {
            return Ok(None);
        }
        let values = self.decoder.get_tag_f64_vec(Tag::from_u16_exhaustive(tag))?;
        if values.len() < min_len {
            return Ok(None);
        }
        Ok(Some(values))
    }
}

impl Drop for RasterHandle {
    fn drop(&mut self) {
        OPEN_HANDLES.fetch_sub(1, Ordering::SeqCst);
    }
}

fn widen<T: ToPrimitive>(values: Vec<T>) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .collect()
}

/// A decoded pixel grid with interleaved band samples.
///
/// Row-major, chunky layout: sample `(x, y, band)` lives at
/// `(y * width + x) * bands + band`. The grid's lifetime nests inside the
/// handle that produced it; dropping it frees the decoded buffer.
#[derive(Debug, Clone)]
pub struct DecodedGrid {
    samples: Vec<f64>,
    width: usize,
    height: usize,
    bands: usize,
}

impl DecodedGrid {
    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of bands per pixel.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Raw interleaved sample buffer.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample value at pixel `(x, y)` in the given band.
    pub fn sample(&self, x: usize, y: usize, band: usize) -> f64 {
        self.samples[(y * self.width + x) * self.bands + band]
    }

    /// Build a grid from an already-decoded sample buffer.
    ///
    /// # Panics
    ///
    /// Panics when the buffer length does not equal
    /// `width * height * bands`.
    pub fn from_parts(samples: Vec<f64>, width: usize, height: usize, bands: usize) -> Self {
        assert_eq!(samples.len(), width * height * bands);
        Self {
            samples,
            width,
            height,
            bands,
        }
    }
}
