//! GeoKey directory parsing.
//!
//! The GeoKey directory is an array of SHORT values: a four-entry header
//! (`KeyDirectoryVersion, KeyRevision, MinorRevision, NumberOfKeys`)
//! followed by one `(KeyID, TIFFTagLocation, Count, ValueOffset)` tuple per
//! key. Keys with `TIFFTagLocation == 0` carry their value inline in
//! `ValueOffset`; citation keys point into the GeoAsciiParams string.

use raster_common::{CrsDefinition, CrsModelType};

use crate::error::{GeoTiffError, Result};
use crate::tags::{
    GEO_KEY_CITATION, GEO_KEY_GEOGRAPHIC_TYPE, GEO_KEY_GEOG_CITATION, GEO_KEY_MODEL_TYPE,
    GEO_KEY_PCS_CITATION, GEO_KEY_PROJECTED_CRS, MODEL_TYPE_GEOCENTRIC, MODEL_TYPE_GEOGRAPHIC,
    MODEL_TYPE_PROJECTED, TAG_GEO_ASCII_PARAMS,
};

/// One entry of the GeoKey directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    pub location: u16,
    pub count: u16,
    pub value: u16,
}

/// Parse the raw SHORT array into key entries.
pub fn parse_directory(raw: &[u16]) -> Result<Vec<GeoKeyEntry>> {
    if raw.len() < 4 {
        return Err(GeoTiffError::MalformedGeoKeys(format!(
            "directory header truncated ({} values)",
            raw.len()
        )));
    }
    if raw[0] != 1 {
        return Err(GeoTiffError::MalformedGeoKeys(format!(
            "unsupported directory version {}",
            raw[0]
        )));
    }

    let num_keys = raw[3] as usize;
    let mut entries = Vec::with_capacity(num_keys);
    for i in 0..num_keys {
        let offset = 4 + i * 4;
        if offset + 4 > raw.len() {
            return Err(GeoTiffError::MalformedGeoKeys(format!(
                "directory declares {} keys but holds {}",
                num_keys, i
            )));
        }
        entries.push(GeoKeyEntry {
            key_id: raw[offset],
            location: raw[offset + 1],
            count: raw[offset + 2],
            value: raw[offset + 3],
        });
    }

    Ok(entries)
}

/// Decode the CRS definition declared by a GeoKey directory.
///
/// Code values are kept raw (including the user-defined sentinel);
/// resolving them to a canonical EPSG identifier is the caller's concern.
pub fn crs_definition(raw: &[u16], ascii: Option<&str>) -> Result<CrsDefinition> {
    let entries = parse_directory(raw)?;

    let mut def = CrsDefinition::default();
    let mut gt_citation = None;
    let mut pcs_citation = None;
    let mut geog_citation = None;

    for entry in entries {
        match entry.key_id {
            GEO_KEY_MODEL_TYPE if entry.location == 0 => {
                def.model = match entry.value {
                    MODEL_TYPE_PROJECTED => CrsModelType::Projected,
                    MODEL_TYPE_GEOGRAPHIC => CrsModelType::Geographic,
                    MODEL_TYPE_GEOCENTRIC => CrsModelType::Geocentric,
                    _ => CrsModelType::Unknown,
                };
            }
            GEO_KEY_GEOGRAPHIC_TYPE if entry.location == 0 => {
                def.geographic_code = Some(entry.value);
            }
            GEO_KEY_PROJECTED_CRS if entry.location == 0 => {
                def.projected_code = Some(entry.value);
            }
            GEO_KEY_CITATION if entry.location == TAG_GEO_ASCII_PARAMS => {
                gt_citation = extract_ascii(ascii, entry.value, entry.count);
            }
            GEO_KEY_PCS_CITATION if entry.location == TAG_GEO_ASCII_PARAMS => {
                pcs_citation = extract_ascii(ascii, entry.value, entry.count);
            }
            GEO_KEY_GEOG_CITATION if entry.location == TAG_GEO_ASCII_PARAMS => {
                geog_citation = extract_ascii(ascii, entry.value, entry.count);
            }
            _ => {}
        }
    }

    def.citation = gt_citation.or(pcs_citation).or(geog_citation);
    Ok(def)
}

/// Slice a citation out of the GeoAsciiParams string.
///
/// `offset` and `count` are in characters of the ASCII params value; the
/// GeoTIFF pipe terminator and any padding are stripped.
fn extract_ascii(params: Option<&str>, offset: u16, count: u16) -> Option<String> {
    let params = params?;
    let start = offset as usize;
    let end = (start + count as usize).min(params.len());
    let slice = params.get(start..end)?;
    let trimmed = slice.trim_end_matches(['|', '\0']).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
