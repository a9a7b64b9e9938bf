//! QR code generation pipeline.
//!
//! Encodes each configured page URL into three renditions (scalable SVG,
//! web PNG, high-resolution print PNG) and writes a printable HTML sheet
//! referencing the print renditions.

mod generator;
mod printable;
mod targets;

pub use generator::{generate_qr_codes, QrRunReport};
pub use printable::write_printable_sheet;
pub use targets::{enumerate_targets, renditions, QrTarget, Rendition, RenditionFormat};
