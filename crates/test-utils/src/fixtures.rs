//! Synthetic GeoTIFF fixtures.
//!
//! Writes small, fully valid GeoTIFF files with configurable
//! georeferencing so tests never depend on external sample data. Tag
//! numbers are spelled locally because this crate sits below the parser
//! under test.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::TempDir;
use tiff::encoder::{colortype, DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;

const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
const TAG_MODEL_TIEPOINT: u16 = 33922;
const TAG_GEO_KEY_DIRECTORY: u16 = 34735;
const TAG_GEO_ASCII_PARAMS: u16 = 34737;

const GEO_KEY_MODEL_TYPE: u16 = 1024;
const GEO_KEY_CITATION: u16 = 1026;
const GEO_KEY_GEOGRAPHIC_TYPE: u16 = 2048;
const GEO_KEY_PROJECTED_CRS: u16 = 3072;

const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const USER_DEFINED: u16 = 32767;

/// What the fixture declares in its GeoKey directory.
#[derive(Debug, Clone)]
pub enum GeoKeySpec {
    /// Geographic model with the given EPSG code (e.g. 4326)
    Geographic(u16),
    /// Projected model with the given EPSG code (e.g. 32620)
    Projected(u16),
    /// Projected model with the user-defined sentinel code and an
    /// optional citation string
    UserDefined { citation: Option<String> },
    /// No GeoKey directory at all
    Absent,
}

/// Builder for a synthetic GeoTIFF file.
#[derive(Debug, Clone)]
pub struct GeoTiffFixture {
    pub width: u32,
    pub height: u32,
    /// 1 (Gray f32) or 3 (RGB u8) bands
    pub bands: u16,
    /// Native envelope as (min_x, min_y, max_x, max_y)
    pub envelope: (f64, f64, f64, f64),
    pub geo_keys: GeoKeySpec,
    /// Write ModelPixelScale/ModelTiepoint tags (off for broken fixtures)
    pub georeferenced: bool,
}

impl GeoTiffFixture {
    /// A WGS84 (EPSG:4326) single-band fixture.
    pub fn wgs84(width: u32, height: u32, envelope: (f64, f64, f64, f64)) -> Self {
        Self {
            width,
            height,
            bands: 1,
            envelope,
            geo_keys: GeoKeySpec::Geographic(4326),
            georeferenced: true,
        }
    }

    /// A projected single-band fixture with the given EPSG code.
    pub fn projected(epsg: u16, width: u32, height: u32, envelope: (f64, f64, f64, f64)) -> Self {
        Self {
            width,
            height,
            bands: 1,
            envelope,
            geo_keys: GeoKeySpec::Projected(epsg),
            georeferenced: true,
        }
    }

    pub fn with_bands(mut self, bands: u16) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_geo_keys(mut self, geo_keys: GeoKeySpec) -> Self {
        self.geo_keys = geo_keys;
        self
    }

    /// Write the fixture with every sample set to `value`.
    pub fn write_constant(&self, path: &Path, value: f64) -> Result<()> {
        self.write_with(path, |_, _, _| value)
    }

    /// Write the fixture, computing each sample from `(x, y, band)`.
    pub fn write_with(&self, path: &Path, fill: impl Fn(u32, u32, u16) -> f64) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("create fixture file {}", path.display()))?;
        let mut encoder = TiffEncoder::new(file)?;

        match self.bands {
            1 => {
                let mut data = Vec::with_capacity((self.width * self.height) as usize);
                for y in 0..self.height {
                    for x in 0..self.width {
                        data.push(fill(x, y, 0) as f32);
                    }
                }
                let mut image =
                    encoder.new_image::<colortype::Gray32Float>(self.width, self.height)?;
                self.write_geo_tags(image.encoder())?;
                image.write_data(&data)?;
            }
            3 => {
                let mut data = Vec::with_capacity((self.width * self.height * 3) as usize);
                for y in 0..self.height {
                    for x in 0..self.width {
                        for band in 0..3u16 {
                            data.push(fill(x, y, band).clamp(0.0, 255.0) as u8);
                        }
                    }
                }
                let mut image = encoder.new_image::<colortype::RGB8>(self.width, self.height)?;
                self.write_geo_tags(image.encoder())?;
                image.write_data(&data)?;
            }
            n => bail!("fixture supports 1 or 3 bands, got {n}"),
        }

        Ok(())
    }

    /// Write the fixture into a fresh temp directory and return both.
    ///
    /// The file lives as long as the returned `TempDir`.
    pub fn write_constant_to_temp(&self, value: f64) -> Result<(TempDir, PathBuf)> {
        let dir = TempDir::new()?;
        let path = dir.path().join("fixture.tif");
        self.write_constant(&path, value)?;
        Ok((dir, path))
    }

    fn write_geo_tags<W: Write + Seek, K: TiffKind>(
        &self,
        dir: &mut DirectoryEncoder<W, K>,
    ) -> Result<()> {
        let (min_x, min_y, max_x, max_y) = self.envelope;

        if self.georeferenced {
            let scale_x = (max_x - min_x) / f64::from(self.width);
            let scale_y = (max_y - min_y) / f64::from(self.height);
            dir.write_tag(
                Tag::Unknown(TAG_MODEL_PIXEL_SCALE),
                &[scale_x, scale_y, 0.0][..],
            )?;
            // Tie pixel (0, 0) to the envelope's top-left corner
            dir.write_tag(
                Tag::Unknown(TAG_MODEL_TIEPOINT),
                &[0.0, 0.0, 0.0, min_x, max_y, 0.0][..],
            )?;
        }

        let mut keys: Vec<[u16; 4]> = Vec::new();
        let mut ascii: Option<String> = None;

        match &self.geo_keys {
            GeoKeySpec::Geographic(code) => {
                keys.push([GEO_KEY_MODEL_TYPE, 0, 1, MODEL_TYPE_GEOGRAPHIC]);
                keys.push([GEO_KEY_GEOGRAPHIC_TYPE, 0, 1, *code]);
            }
            GeoKeySpec::Projected(code) => {
                keys.push([GEO_KEY_MODEL_TYPE, 0, 1, MODEL_TYPE_PROJECTED]);
                keys.push([GEO_KEY_PROJECTED_CRS, 0, 1, *code]);
            }
            GeoKeySpec::UserDefined { citation } => {
                keys.push([GEO_KEY_MODEL_TYPE, 0, 1, MODEL_TYPE_PROJECTED]);
                keys.push([GEO_KEY_PROJECTED_CRS, 0, 1, USER_DEFINED]);
                if let Some(text) = citation {
                    let value = format!("{text}|");
                    keys.push([GEO_KEY_CITATION, TAG_GEO_ASCII_PARAMS, value.len() as u16, 0]);
                    ascii = Some(value);
                }
            }
            GeoKeySpec::Absent => return Ok(()),
        }

        let mut directory: Vec<u16> = vec![1, 1, 0, keys.len() as u16];
        for key in &keys {
            directory.extend_from_slice(key);
        }
        dir.write_tag(Tag::Unknown(TAG_GEO_KEY_DIRECTORY), directory.as_slice())?;

        if let Some(value) = ascii {
            dir.write_tag(Tag::Unknown(TAG_GEO_ASCII_PARAMS), value.as_str())?;
        }

        Ok(())
    }
}
