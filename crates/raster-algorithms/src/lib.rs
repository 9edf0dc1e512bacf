//! Umbrella crate for the raster algorithms workspace.
//!
//! Re-exports the pixel buffer types, the smoothing filter, the adaptive
//! thresholder and the scan-conversion engine.

pub use ra_binarize::*;
pub use ra_core::*;
pub use ra_filter::*;
pub use ra_scan::*;
