//! Image optimization pipeline.
//!
//! Discovers raw images in a source directory and re-encodes each as a
//! width-capped JPEG for web delivery, reporting per-file compression
//! ratios.

mod discover;
mod optimizer;

pub use discover::discover_images;
pub use optimizer::{optimize_images, scaled_dimensions, ImageRunReport, OptimizedImage};
