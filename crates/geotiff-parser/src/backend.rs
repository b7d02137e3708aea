//! Process-wide decoder backend configuration.
//!
//! Large rasters can exceed the `tiff` decoder's default allocation limits.
//! The backend toggle is installed once per process, explicitly, before the
//! first raster is opened; every subsequent [`crate::RasterHandle::open`]
//! picks it up. There is no implicit static side effect.

use std::sync::OnceLock;

use tiff::decoder::Limits;

/// Decoder backend settings applied to every opened raster.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderBackend {
    /// Lift the decoder's intermediate-buffer allocation limits.
    ///
    /// Off by default; whole-grid decode of very large rasters requires it.
    pub unlimited_buffers: bool,
}

static BACKEND: OnceLock<DecoderBackend> = OnceLock::new();

/// Install the decoder backend configuration for this process.
///
/// Returns `true` when this call installed the configuration, `false` when
/// an earlier call (or a concurrent one) already did; the first
/// installation wins and later calls are ignored.
pub fn init_decoder_backend(config: DecoderBackend) -> bool {
    BACKEND.set(config).is_ok()
}

/// Decoder limits for the currently installed backend.
pub(crate) fn decoder_limits() -> Limits {
    let config = BACKEND.get().copied().unwrap_or_default();
    if config.unlimited_buffers {
        Limits::unlimited()
    } else {
        Limits::default()
    }
}
