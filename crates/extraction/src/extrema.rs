//! Strided min/max scan over a decoded raster grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use geotiff_parser::DecodedGrid;

use crate::error::{ExtractionError, Result};

/// Scan configuration for the extrema pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Sample every n-th column
    pub x_stride: usize,
    /// Sample every n-th row
    pub y_stride: usize,
    /// Rows per window when short-circuiting
    pub window_rows: usize,
    /// Stop after the first window that improves neither extremum
    pub short_circuit: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            x_stride: 10,
            y_stride: 10,
            window_rows: 256,
            short_circuit: false,
        }
    }
}

/// Minimum and maximum finite sample values observed by a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub min: f64,
    pub max: f64,
}

/// Scan the grid for its minimum and maximum finite sample values.
///
/// All bands contribute to a single pair of extrema. NaN and infinite
/// samples are skipped; a grid with no finite sample at any visited
/// position fails with [`ExtractionError::EmptyRaster`].
pub fn scan_extrema(grid: &DecodedGrid, config: &ScanConfig) -> Result<Extrema> {
    let x_stride = config.x_stride.max(1);
    let y_stride = config.y_stride.max(1);
    let window_rows = config.window_rows.max(1);

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    let mut y = 0;
    while y < grid.height() {
        let window_end = (y + window_rows).min(grid.height());
        let mut improved = false;

        while y < window_end {
            let mut x = 0;
            while x < grid.width() {
                for band in 0..grid.bands() {
                    let value = grid.sample(x, y, band);
                    if !value.is_finite() {
                        continue;
                    }
                    if value < min {
                        min = value;
                        improved = true;
                    }
                    if value > max {
                        max = value;
                        improved = true;
                    }
                }
                x += x_stride;
            }
            y += y_stride;
        }
        if config.short_circuit && !improved && min.is_finite() {
            debug!(rows_scanned = y, min, max, "extrema scan short-circuited");
            break;
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return Err(ExtractionError::EmptyRaster);
    }

    Ok(Extrema { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(samples: Vec<f64>, width: usize, height: usize, bands: usize) -> DecodedGrid {
        DecodedGrid::from_parts(samples, width, height, bands)
    }

    fn full_scan() -> ScanConfig {
        ScanConfig {
            x_stride: 1,
            y_stride: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_band_extrema() {
        let g = grid(vec![3.0, -1.0, 7.5, 0.0], 2, 2, 1);
        let extrema = scan_extrema(&g, &full_scan()).unwrap();
        assert_eq!(extrema.min, -1.0);
        assert_eq!(extrema.max, 7.5);
    }

    #[test]
    fn test_all_bands_contribute() {
        // Band 1 carries the minimum, band 0 the maximum.
        let g = grid(vec![10.0, -5.0, 20.0, 2.0], 2, 1, 2);
        let extrema = scan_extrema(&g, &full_scan()).unwrap();
        assert_eq!(extrema.min, -5.0);
        assert_eq!(extrema.max, 20.0);
    }

    #[test]
    fn test_non_finite_samples_skipped() {
        let g = grid(vec![f64::NAN, 4.0, f64::INFINITY, 1.0], 2, 2, 1);
        let extrema = scan_extrema(&g, &full_scan()).unwrap();
        assert_eq!(extrema.min, 1.0);
        assert_eq!(extrema.max, 4.0);
    }

    #[test]
    fn test_all_nan_grid_is_empty() {
        let g = grid(vec![f64::NAN; 4], 2, 2, 1);
        assert!(matches!(
            scan_extrema(&g, &full_scan()),
            Err(ExtractionError::EmptyRaster)
        ));
    }

    #[test]
    fn test_constant_grid_collapses_extrema() {
        let g = grid(vec![42.0; 9], 3, 3, 1);
        let extrema = scan_extrema(&g, &full_scan()).unwrap();
        assert_eq!(extrema.min, 42.0);
        assert_eq!(extrema.max, 42.0);
    }

    #[test]
    fn test_stride_visits_first_row_and_column() {
        // With a stride of 10 on a 3x3 grid only (0, 0) is visited.
        let mut samples = vec![5.0; 9];
        samples[0] = -2.0;
        let g = grid(samples, 3, 3, 1);
        let extrema = scan_extrema(&g, &ScanConfig::default()).unwrap();
        assert_eq!(extrema.min, -2.0);
        assert_eq!(extrema.max, -2.0);
    }

    #[test]
    fn test_short_circuit_matches_full_scan_on_constant_grid() {
        let samples = vec![7.0; 600 * 4];
        let g = grid(samples, 4, 600, 1);

        let full = scan_extrema(
            &g,
            &ScanConfig {
                x_stride: 1,
                y_stride: 1,
                short_circuit: false,
                ..Default::default()
            },
        )
        .unwrap();
        let short = scan_extrema(
            &g,
            &ScanConfig {
                x_stride: 1,
                y_stride: 1,
                short_circuit: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(full, short);
    }

    #[test]
    fn test_short_circuit_still_sees_early_extrema() {
        // Extremes in the first window, constant afterwards.
        let mut samples = vec![5.0; 600 * 2];
        samples[0] = -100.0;
        samples[3] = 100.0;
        let g = grid(samples, 2, 600, 1);

        let extrema = scan_extrema(
            &g,
            &ScanConfig {
                x_stride: 1,
                y_stride: 1,
                short_circuit: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(extrema.min, -100.0);
        assert_eq!(extrema.max, 100.0);
    }

    #[test]
    fn test_zero_stride_treated_as_one() {
        let g = grid(vec![1.0, 2.0], 2, 1, 1);
        let extrema = scan_extrema(
            &g,
            &ScanConfig {
                x_stride: 0,
                y_stride: 0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(extrema.max, 2.0);
    }
}
